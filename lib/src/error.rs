use thiserror::Error;

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, MultisigError>;

/// Closed taxonomy of failure conditions surfaced by the engine.
///
/// Every guard check maps to exactly one variant so callers can branch
/// deterministically on cause. All failures are terminal and leave state
/// untouched: validation always precedes the first write.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MultisigError {
    // ==================== Structural / input validation ====================
    #[error("no owners provided")]
    NoOwners,

    #[error("too many owners: maximum {max} allowed")]
    TooManyOwners { max: usize },

    #[error("duplicate owners not allowed")]
    DuplicateOwners,

    #[error("invalid owner: account id cannot be empty")]
    InvalidOwner,

    #[error("invalid threshold: must be > 0, <= owner count, and standard <= admin")]
    InvalidThreshold,

    #[error("empty transaction payload")]
    EmptyTransaction,

    #[error("transaction payload too large: {size} bytes (max {max})")]
    TransactionTooLarge { size: usize, max: usize },

    #[error("transaction payload too complex: score {score} (max {max})")]
    TransactionTooComplex { score: u32, max: u32 },

    // ==================== Authorization ====================
    #[error("caller is not an owner of this multisig")]
    OwnerNotFound,

    // ==================== State-machine violations ====================
    #[error("invalid nonce: registry expects {expected}, got {provided}")]
    InvalidNonce { expected: u64, provided: u64 },

    #[error("nonce counter overflow")]
    NonceOverflow,

    #[error("transaction counter overflow")]
    TransactionCountOverflow,

    #[error("expiry timestamp overflow")]
    ExpiryOverflow,

    #[error("already approved by this owner")]
    AlreadyApproved,

    #[error("transaction already executed")]
    AlreadyExecuted,

    #[error("not enough approvals: have {have}, need {need}")]
    NotEnoughApprovals { have: usize, need: usize },

    #[error("transaction expired")]
    TransactionExpired,

    #[error("same-slot execution not allowed")]
    SameSlotExecution,

    #[error("multisig is paused")]
    MultisigPaused,

    #[error("multisig is not paused")]
    NotPaused,

    #[error("transaction {id} not found")]
    TransactionNotFound { id: u64 },

    #[error("transaction id mismatch")]
    InvalidTransactionId,

    #[error("transaction kind is not admin-class")]
    InvalidTransactionKind,

    #[error("approval slot not present for this owner")]
    ApprovalArrayMismatch,

    // ==================== Storage allocation ====================
    #[error("multisig registry not found")]
    RegistryNotFound,

    #[error("record already exists at this address")]
    AlreadyExists,

    // ==================== Policy ====================
    #[error("rate limit exceeded: proposal cooldown still active")]
    RateLimitExceeded,
}
