use crate::error::{MultisigError, Result};
use crate::validation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a participant, as validated by the platform's signature layer
/// before any engine call runs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Ledger-time marker passed into every state-mutating call.
///
/// The slot is the ledger's atomic progress unit; the timestamp is wall-clock
/// seconds. Both come from the host so the engine stays deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerClock {
    pub slot: u64,
    pub unix_timestamp: i64,
}

impl LedgerClock {
    pub fn new(slot: u64, unix_timestamp: i64) -> Self {
        Self {
            slot,
            unix_timestamp,
        }
    }

    /// Clock at the given slot with the current system time.
    pub fn system(slot: u64) -> Self {
        Self {
            slot,
            unix_timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Classifies a proposal's payload and selects the applicable threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Transfer,
    TokenTransfer,
    AdminAction,
    ChangeThreshold,
    AddOwner,
    RemoveOwner,
    Custom,
}

impl TransactionKind {
    /// Admin-class kinds require the admin threshold, may be proposed while
    /// the registry is paused, and are the only kinds the admin dispatcher
    /// accepts.
    pub fn is_admin(self) -> bool {
        matches!(
            self,
            Self::AdminAction | Self::ChangeThreshold | Self::AddOwner | Self::RemoveOwner
        )
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transfer => "transfer",
            Self::TokenTransfer => "token-transfer",
            Self::AdminAction => "admin-action",
            Self::ChangeThreshold => "change-threshold",
            Self::AddOwner => "add-owner",
            Self::RemoveOwner => "remove-owner",
            Self::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// One multisig group: owner set, thresholds, and the bookkeeping counters
/// that order every proposal made against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigRegistry {
    /// Identity that instantiated the registry. Immutable.
    pub creator: AccountId,
    /// Ordered set of authorized identities (1-10, no duplicates).
    pub owners: Vec<AccountId>,
    /// Approvals required to execute a standard proposal.
    pub threshold: u8,
    /// Approvals required for admin-class proposals. Never below `threshold`.
    pub admin_threshold: u8,
    /// Replay-protection and optimistic-concurrency token. Every accepted
    /// proposal must cite the current value; acceptance increments it.
    pub nonce: u64,
    /// Total proposals ever created; doubles as the next proposal's ordinal id.
    pub transaction_count: u64,
    /// Blocks creation of standard proposals while true.
    pub paused: bool,
    /// Who triggered the pause. Cleared on unpause.
    pub paused_by: Option<AccountId>,
    /// When the pause was triggered. Cleared on unpause.
    pub paused_at: Option<i64>,
    /// Creation timestamp (unix seconds).
    pub created_at: i64,
    /// Slot of the most recent accepted proposal, for rate limiting.
    pub last_proposal_slot: Option<u64>,
}

impl MultisigRegistry {
    /// Re-checks the structural invariants that every owner-set or threshold
    /// mutation must preserve.
    pub fn validate_state(&self) -> Result<()> {
        validation::validate_owner_set(&self.owners)?;
        if self.threshold == 0 || self.threshold as usize > self.owners.len() {
            return Err(MultisigError::InvalidThreshold);
        }
        if self.admin_threshold < self.threshold
            || self.admin_threshold as usize > self.owners.len()
        {
            return Err(MultisigError::InvalidThreshold);
        }
        Ok(())
    }

    pub fn is_owner(&self, account: &AccountId) -> bool {
        self.owners.contains(account)
    }

    /// Fails with `OwnerNotFound` unless the account is a current owner.
    pub fn require_owner(&self, account: &AccountId) -> Result<()> {
        if self.is_owner(account) {
            Ok(())
        } else {
            Err(MultisigError::OwnerNotFound)
        }
    }
}

/// One proposed action, bound to its registry's nonce and counter at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionProposal {
    /// Ordinal id, equal to the registry's `transaction_count` at creation.
    pub transaction_id: u64,
    /// Address of the owning registry. Lookup reference only.
    pub multisig: crate::address::Address,
    /// Identity that created the proposal. Was an owner at creation time.
    pub proposer: AccountId,
    /// Opaque action bytes, bounded by the rate & complexity guard.
    pub payload: Vec<u8>,
    pub kind: TransactionKind,
    /// Owner list frozen at creation time. Approval slots are index-aligned
    /// to this snapshot for the life of the proposal, so later owner-set
    /// mutation never shifts a recorded vote.
    pub owner_snapshot: Vec<AccountId>,
    /// One slot per snapshot member. Fixed length.
    pub approvals: Vec<bool>,
    /// Set exactly once, irreversible.
    pub executed: bool,
    pub created_at: i64,
    pub created_slot: u64,
    pub expires_at: i64,
}

impl TransactionProposal {
    /// Count of recorded approvals. Always computed as a fold over the
    /// bitmap rather than cached, so there is a single source of truth.
    pub fn approval_count(&self) -> usize {
        self.approvals.iter().filter(|&&approved| approved).count()
    }

    pub fn is_expired(&self, clock: &LedgerClock) -> bool {
        clock.unix_timestamp > self.expires_at
    }

    /// Index of the account in the frozen owner snapshot.
    pub fn snapshot_index(&self, account: &AccountId) -> Option<usize> {
        self.owner_snapshot.iter().position(|owner| owner == account)
    }

    pub fn has_approved(&self, account: &AccountId) -> bool {
        self.snapshot_index(account)
            .map(|idx| self.approvals[idx])
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(owners: &[&str], threshold: u8, admin_threshold: u8) -> MultisigRegistry {
        MultisigRegistry {
            creator: "alice".into(),
            owners: owners.iter().map(|&o| o.into()).collect(),
            threshold,
            admin_threshold,
            nonce: 0,
            transaction_count: 0,
            paused: false,
            paused_by: None,
            paused_at: None,
            created_at: 0,
            last_proposal_slot: None,
        }
    }

    #[test]
    fn validate_state_accepts_well_formed_registry() {
        assert!(registry(&["a", "b", "c"], 2, 3).validate_state().is_ok());
    }

    #[test]
    fn validate_state_rejects_zero_threshold() {
        assert_eq!(
            registry(&["a", "b"], 0, 1).validate_state(),
            Err(MultisigError::InvalidThreshold)
        );
    }

    #[test]
    fn validate_state_rejects_admin_below_standard() {
        assert_eq!(
            registry(&["a", "b", "c"], 2, 1).validate_state(),
            Err(MultisigError::InvalidThreshold)
        );
    }

    #[test]
    fn validate_state_rejects_duplicate_owners() {
        assert_eq!(
            registry(&["a", "b", "a"], 1, 1).validate_state(),
            Err(MultisigError::DuplicateOwners)
        );
    }

    #[test]
    fn approval_count_folds_over_bitmap() {
        let proposal = TransactionProposal {
            transaction_id: 0,
            multisig: crate::address::Address::from_hex("00"),
            proposer: "a".into(),
            payload: vec![1],
            kind: TransactionKind::Transfer,
            owner_snapshot: vec!["a".into(), "b".into(), "c".into()],
            approvals: vec![true, false, true],
            executed: false,
            created_at: 0,
            created_slot: 0,
            expires_at: 100,
        };
        assert_eq!(proposal.approval_count(), 2);
        assert!(proposal.has_approved(&"a".into()));
        assert!(!proposal.has_approved(&"b".into()));
        assert!(!proposal.has_approved(&"zed".into()));
    }

    #[test]
    fn expiry_is_a_strict_comparison() {
        let proposal = TransactionProposal {
            transaction_id: 0,
            multisig: crate::address::Address::from_hex("00"),
            proposer: "a".into(),
            payload: vec![1],
            kind: TransactionKind::Transfer,
            owner_snapshot: vec!["a".into()],
            approvals: vec![false],
            executed: false,
            created_at: 0,
            created_slot: 0,
            expires_at: 100,
        };
        assert!(!proposal.is_expired(&LedgerClock::new(1, 100)));
        assert!(proposal.is_expired(&LedgerClock::new(1, 101)));
    }
}
