//! Core multisig transaction-approval engine.
//!
//! A single-ledger authorization engine: each registry holds an owner set and
//! two quorum thresholds, proposals accumulate per-owner approvals against a
//! frozen owner snapshot, and a registry-scoped nonce orders every accepted
//! proposal. The engine is host-independent; ledger time (slot + unix
//! timestamp) is injected per call.

pub mod address;
pub mod engine;
pub mod error;
pub mod store;
pub mod types;
pub mod validation;

pub use address::{proposal_address, registry_address, Address};
pub use engine::{LoggingTransferExecutor, MultisigEngine, TransferExecutor};
pub use error::{MultisigError, Result};
pub use types::{
    AccountId, LedgerClock, MultisigRegistry, TransactionKind, TransactionProposal,
};
