//! The multisig authorization engine.
//!
//! Each state-mutating call runs to completion atomically against one
//! [`LedgerStore`]; the host serializes calls touching the same records, so
//! the engine takes no locks of its own. The registry nonce is the
//! application-level sequence number: of two concurrently-submitted proposals
//! citing the same nonce, only the first to be applied succeeds.
//!
//! Every operation validates completely before its first write, so a failed
//! call leaves no partial mutation behind.

use crate::address::{self, Address};
use crate::error::{MultisigError, Result};
use crate::store::LedgerStore;
use crate::types::{
    AccountId, LedgerClock, MultisigRegistry, TransactionKind, TransactionProposal,
};
use crate::validation::{self, DEFAULT_EXPIRY_HOURS, SECONDS_PER_HOUR};
use serde::{Deserialize, Serialize};
use tracing::info;

/// External effect boundary for transfer-class payloads.
///
/// Once quorum and timing checks pass, the engine hands the finalized
/// proposal to this collaborator (the token module in production). Admin
/// payloads never cross this boundary; they dispatch internally.
pub trait TransferExecutor {
    fn execute_transfer(&mut self, proposal: &TransactionProposal) -> Result<()>;
}

/// Executor that records the effect in the log and does nothing else.
/// Stands in wherever no token module is wired up.
#[derive(Debug, Default)]
pub struct LoggingTransferExecutor;

impl TransferExecutor for LoggingTransferExecutor {
    fn execute_transfer(&mut self, proposal: &TransactionProposal) -> Result<()> {
        info!(
            transaction_id = proposal.transaction_id,
            kind = %proposal.kind,
            payload_len = proposal.payload.len(),
            "transfer payload delegated to external module"
        );
        Ok(())
    }
}

/// One ledger's worth of multisig registries and proposals, plus the
/// lifecycle rules that govern them.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MultisigEngine {
    store: LedgerStore,
}

impl MultisigEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Registry creation ====================

    /// Creates the registry owned by `creator` and returns its address.
    ///
    /// `admin_threshold` defaults to `threshold` when omitted. The registry
    /// address is derived from the creator alone, so a second call by the
    /// same creator fails with `AlreadyExists`.
    pub fn create_multisig(
        &mut self,
        creator: &AccountId,
        owners: Vec<AccountId>,
        threshold: u8,
        admin_threshold: Option<u8>,
        clock: &LedgerClock,
    ) -> Result<Address> {
        validation::validate_owner_set(&owners)?;
        if threshold == 0 || threshold as usize > owners.len() {
            return Err(MultisigError::InvalidThreshold);
        }
        let admin_threshold = admin_threshold.unwrap_or(threshold);
        if admin_threshold < threshold || admin_threshold as usize > owners.len() {
            return Err(MultisigError::InvalidThreshold);
        }

        let registry = MultisigRegistry {
            creator: creator.clone(),
            owners,
            threshold,
            admin_threshold,
            nonce: 0,
            transaction_count: 0,
            paused: false,
            paused_by: None,
            paused_at: None,
            created_at: clock.unix_timestamp,
            last_proposal_slot: None,
        };
        registry.validate_state()?;

        let address = address::registry_address(creator);
        self.store.insert_registry(address.clone(), registry)?;

        info!(
            multisig = %address,
            creator = %creator,
            threshold,
            admin_threshold,
            "multisig registry created"
        );
        Ok(address)
    }

    // ==================== Proposal lifecycle ====================

    /// Creates a new proposal bound to the registry's current nonce and
    /// counter, and returns its ordinal id.
    ///
    /// The cited `nonce` must equal the registry's current value exactly:
    /// this is the replay and ordering guarantee. Standard-kind proposals
    /// are blocked while the registry is paused; admin-kind proposals pass
    /// through so a paused registry can still vote itself back open.
    #[allow(clippy::too_many_arguments)]
    pub fn propose_transaction(
        &mut self,
        multisig: &Address,
        proposer: &AccountId,
        payload: Vec<u8>,
        nonce: u64,
        kind: TransactionKind,
        expires_in_hours: Option<u16>,
        clock: &LedgerClock,
    ) -> Result<u64> {
        let registry = self.store.registry(multisig)?;
        registry.validate_state()?;
        registry.require_owner(proposer)?;

        if registry.paused && !kind.is_admin() {
            return Err(MultisigError::MultisigPaused);
        }
        if nonce != registry.nonce {
            return Err(MultisigError::InvalidNonce {
                expected: registry.nonce,
                provided: nonce,
            });
        }
        validation::check_rate_limit(registry, clock)?;
        validation::validate_payload(&payload)?;

        let hours = expires_in_hours.unwrap_or(DEFAULT_EXPIRY_HOURS);
        let expires_at = clock
            .unix_timestamp
            .checked_add(hours as i64 * SECONDS_PER_HOUR)
            .ok_or(MultisigError::ExpiryOverflow)?;

        let next_nonce = registry
            .nonce
            .checked_add(1)
            .ok_or(MultisigError::NonceOverflow)?;
        let transaction_id = registry.transaction_count;
        let next_count = transaction_id
            .checked_add(1)
            .ok_or(MultisigError::TransactionCountOverflow)?;

        let proposal = TransactionProposal {
            transaction_id,
            multisig: multisig.clone(),
            proposer: proposer.clone(),
            payload,
            kind,
            owner_snapshot: registry.owners.clone(),
            approvals: vec![false; registry.owners.len()],
            executed: false,
            created_at: clock.unix_timestamp,
            created_slot: clock.slot,
            expires_at,
        };

        // All checks passed; apply the writes together.
        let proposal_addr = address::proposal_address(multisig, transaction_id);
        self.store.insert_proposal(proposal_addr, proposal)?;
        let registry = self.store.registry_mut(multisig)?;
        registry.nonce = next_nonce;
        registry.transaction_count = next_count;
        registry.last_proposal_slot = Some(clock.slot);

        info!(
            multisig = %multisig,
            transaction_id,
            proposer = %proposer,
            kind = %kind,
            expires_at,
            "transaction proposed"
        );
        Ok(transaction_id)
    }

    /// Records one owner's approval on a pending proposal.
    ///
    /// Deliberately decoupled from execution: reaching quorum here never
    /// auto-executes, so casting a vote stays a bounded-cost operation.
    pub fn approve_transaction(
        &mut self,
        multisig: &Address,
        approver: &AccountId,
        transaction_id: u64,
    ) -> Result<()> {
        let registry = self.store.registry(multisig)?;
        registry.validate_state()?;
        registry.require_owner(approver)?;

        let proposal_addr = address::proposal_address(multisig, transaction_id);
        let proposal = self.store.proposal(&proposal_addr, transaction_id)?;
        if proposal.transaction_id != transaction_id {
            return Err(MultisigError::InvalidTransactionId);
        }
        if proposal.executed {
            return Err(MultisigError::AlreadyExecuted);
        }

        // Approval slots are aligned to the owner snapshot taken at creation;
        // an owner added since then has no slot on this proposal.
        let index = proposal
            .snapshot_index(approver)
            .ok_or(MultisigError::ApprovalArrayMismatch)?;
        if proposal.approvals[index] {
            return Err(MultisigError::AlreadyApproved);
        }

        let proposal = self.store.proposal_mut(&proposal_addr, transaction_id)?;
        proposal.approvals[index] = true;
        let count = proposal.approval_count();

        info!(
            multisig = %multisig,
            transaction_id,
            approver = %approver,
            approvals = count,
            "transaction approved"
        );
        Ok(())
    }

    /// Finalizes a proposal whose quorum and timing constraints are met.
    ///
    /// Transfer-class payloads are handed to `transfers` before the record
    /// is marked executed; if the external effect fails, the proposal stays
    /// pending and can be retried.
    pub fn execute_transaction(
        &mut self,
        multisig: &Address,
        executor: &AccountId,
        transaction_id: u64,
        clock: &LedgerClock,
        transfers: &mut dyn TransferExecutor,
    ) -> Result<()> {
        let registry = self.store.registry(multisig)?;
        registry.validate_state()?;
        registry.require_owner(executor)?;

        let proposal_addr = address::proposal_address(multisig, transaction_id);
        let proposal = self.store.proposal(&proposal_addr, transaction_id)?;
        if proposal.transaction_id != transaction_id {
            return Err(MultisigError::InvalidTransactionId);
        }
        if proposal.executed {
            return Err(MultisigError::AlreadyExecuted);
        }

        let required = if proposal.kind.is_admin() {
            registry.admin_threshold
        } else {
            registry.threshold
        } as usize;
        let have = proposal.approval_count();
        if have < required {
            return Err(MultisigError::NotEnoughApprovals {
                have,
                need: required,
            });
        }
        if proposal.is_expired(clock) {
            return Err(MultisigError::TransactionExpired);
        }
        // Temporal separation: creating and executing within one atomic unit
        // of ledger progress would collapse the separately-authorized steps.
        if clock.slot <= proposal.created_slot {
            return Err(MultisigError::SameSlotExecution);
        }

        if matches!(
            proposal.kind,
            TransactionKind::Transfer | TransactionKind::TokenTransfer
        ) {
            transfers.execute_transfer(proposal)?;
        }

        let kind = proposal.kind;
        let proposal = self.store.proposal_mut(&proposal_addr, transaction_id)?;
        proposal.executed = true;

        info!(
            multisig = %multisig,
            transaction_id,
            executor = %executor,
            kind = %kind,
            approvals = have,
            required,
            "transaction executed"
        );
        Ok(())
    }

    // ==================== Pause control ====================

    /// Single-owner incident fast path: pauses the registry immediately,
    /// without a proposal or quorum. Recovery runs through the normal
    /// admin-quorum machinery via [`Self::unpause`].
    pub fn emergency_pause(
        &mut self,
        multisig: &Address,
        caller: &AccountId,
        clock: &LedgerClock,
    ) -> Result<()> {
        let registry = self.store.registry_mut(multisig)?;
        registry.require_owner(caller)?;

        registry.paused = true;
        registry.paused_by = Some(caller.clone());
        registry.paused_at = Some(clock.unix_timestamp);

        info!(multisig = %multisig, caller = %caller, "multisig paused");
        Ok(())
    }

    /// Lifts a pause, driven by an admin-quorum-approved proposal.
    pub fn unpause(
        &mut self,
        multisig: &Address,
        caller: &AccountId,
        transaction_id: u64,
        clock: &LedgerClock,
    ) -> Result<()> {
        self.dispatch_admin(multisig, caller, transaction_id, clock, |registry| {
            if !registry.paused {
                return Err(MultisigError::NotPaused);
            }
            registry.paused = false;
            registry.paused_by = None;
            registry.paused_at = None;
            info!(multisig = %multisig, "multisig unpaused");
            Ok(())
        })
    }

    // ==================== Admin action dispatch ====================

    /// Applies an admin-quorum-approved change of the standard threshold.
    pub fn change_threshold(
        &mut self,
        multisig: &Address,
        caller: &AccountId,
        transaction_id: u64,
        new_threshold: u8,
        clock: &LedgerClock,
    ) -> Result<()> {
        self.dispatch_admin(multisig, caller, transaction_id, clock, |registry| {
            if new_threshold == 0
                || new_threshold as usize > registry.owners.len()
                || new_threshold > registry.admin_threshold
            {
                return Err(MultisigError::InvalidThreshold);
            }
            let old = registry.threshold;
            registry.threshold = new_threshold;
            info!(
                multisig = %multisig,
                old_threshold = old,
                new_threshold,
                "threshold changed"
            );
            Ok(())
        })
    }

    /// Adds an owner once an admin-class proposal has quorum.
    ///
    /// In-flight proposals keep their original approval snapshot: the new
    /// owner has no voting slot on anything proposed before they joined.
    pub fn add_owner(
        &mut self,
        multisig: &Address,
        caller: &AccountId,
        transaction_id: u64,
        new_owner: AccountId,
        clock: &LedgerClock,
    ) -> Result<()> {
        self.dispatch_admin(multisig, caller, transaction_id, clock, |registry| {
            if new_owner.is_empty() {
                return Err(MultisigError::InvalidOwner);
            }
            if registry.owners.len() >= validation::MAX_OWNERS {
                return Err(MultisigError::TooManyOwners {
                    max: validation::MAX_OWNERS,
                });
            }
            if registry.owners.contains(&new_owner) {
                return Err(MultisigError::DuplicateOwners);
            }
            registry.owners.push(new_owner.clone());
            info!(
                multisig = %multisig,
                owner = %new_owner,
                total = registry.owners.len(),
                "owner added"
            );
            Ok(())
        })
    }

    /// Removes an owner once an admin-class proposal has quorum. Both
    /// thresholds must still fit the reduced owner set.
    pub fn remove_owner(
        &mut self,
        multisig: &Address,
        caller: &AccountId,
        transaction_id: u64,
        owner_to_remove: AccountId,
        clock: &LedgerClock,
    ) -> Result<()> {
        self.dispatch_admin(multisig, caller, transaction_id, clock, |registry| {
            let index = registry
                .owners
                .iter()
                .position(|owner| *owner == owner_to_remove)
                .ok_or(MultisigError::OwnerNotFound)?;

            let remaining = registry.owners.len() - 1;
            if remaining == 0 {
                return Err(MultisigError::NoOwners);
            }
            if registry.threshold as usize > remaining
                || registry.admin_threshold as usize > remaining
            {
                return Err(MultisigError::InvalidThreshold);
            }

            registry.owners.remove(index);
            info!(
                multisig = %multisig,
                owner = %owner_to_remove,
                total = registry.owners.len(),
                "owner removed"
            );
            Ok(())
        })
    }

    /// Shared admin-dispatch path: verifies the driving proposal is an
    /// unexecuted, unexpired admin-class proposal with admin quorum, applies
    /// `action` to the registry, then marks the proposal executed exactly
    /// once. The action's own validation runs before any write, so a failed
    /// dispatch consumes nothing.
    fn dispatch_admin<F>(
        &mut self,
        multisig: &Address,
        caller: &AccountId,
        transaction_id: u64,
        clock: &LedgerClock,
        action: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut MultisigRegistry) -> Result<()>,
    {
        let registry = self.store.registry(multisig)?;
        registry.require_owner(caller)?;

        let proposal_addr = address::proposal_address(multisig, transaction_id);
        let proposal = self.store.proposal(&proposal_addr, transaction_id)?;
        if proposal.transaction_id != transaction_id {
            return Err(MultisigError::InvalidTransactionId);
        }
        if !proposal.kind.is_admin() {
            return Err(MultisigError::InvalidTransactionKind);
        }
        if proposal.executed {
            return Err(MultisigError::AlreadyExecuted);
        }
        if proposal.is_expired(clock) {
            return Err(MultisigError::TransactionExpired);
        }
        let have = proposal.approval_count();
        let need = registry.admin_threshold as usize;
        if have < need {
            return Err(MultisigError::NotEnoughApprovals { have, need });
        }

        let registry = self.store.registry_mut(multisig)?;
        action(registry)?;
        registry.validate_state()?;

        let proposal = self.store.proposal_mut(&proposal_addr, transaction_id)?;
        proposal.executed = true;
        Ok(())
    }

    // ==================== View methods ====================

    pub fn registry(&self, multisig: &Address) -> Result<&MultisigRegistry> {
        self.store.registry(multisig)
    }

    pub fn proposal(
        &self,
        multisig: &Address,
        transaction_id: u64,
    ) -> Result<&TransactionProposal> {
        let addr = address::proposal_address(multisig, transaction_id);
        self.store.proposal(&addr, transaction_id)
    }

    pub fn is_owner(&self, multisig: &Address, account: &AccountId) -> bool {
        self.store
            .registry(multisig)
            .map(|registry| registry.is_owner(account))
            .unwrap_or(false)
    }

    pub fn has_approved(
        &self,
        multisig: &Address,
        transaction_id: u64,
        account: &AccountId,
    ) -> bool {
        self.proposal(multisig, transaction_id)
            .map(|proposal| proposal.has_approved(account))
            .unwrap_or(false)
    }

    pub fn approval_count(&self, multisig: &Address, transaction_id: u64) -> Result<usize> {
        self.proposal(multisig, transaction_id)
            .map(|proposal| proposal.approval_count())
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }
}
