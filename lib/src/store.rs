//! Content-addressed record storage.
//!
//! Registries and proposals are independently addressed records in two maps,
//! keyed by the digests from [`crate::address`]. Creation at an occupied
//! address fails, which is what makes the `(creator)` and
//! `(registry, transaction_id)` tuples behave as primary keys. Records are
//! never deleted; executed or expired proposals simply become inert.

use crate::address::Address;
use crate::error::{MultisigError, Result};
use crate::types::{MultisigRegistry, TransactionProposal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// In-memory record store for one ledger.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LedgerStore {
    registries: BTreeMap<Address, MultisigRegistry>,
    proposals: BTreeMap<Address, TransactionProposal>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a registry record. Fails if the address is occupied, which
    /// is how a second `create_multisig` by the same creator is rejected.
    pub fn insert_registry(
        &mut self,
        address: Address,
        registry: MultisigRegistry,
    ) -> Result<()> {
        if self.registries.contains_key(&address) {
            return Err(MultisigError::AlreadyExists);
        }
        self.registries.insert(address, registry);
        Ok(())
    }

    pub fn registry(&self, address: &Address) -> Result<&MultisigRegistry> {
        self.registries
            .get(address)
            .ok_or(MultisigError::RegistryNotFound)
    }

    pub fn registry_mut(&mut self, address: &Address) -> Result<&mut MultisigRegistry> {
        self.registries
            .get_mut(address)
            .ok_or(MultisigError::RegistryNotFound)
    }

    /// Allocates a proposal record at its derived address.
    pub fn insert_proposal(
        &mut self,
        address: Address,
        proposal: TransactionProposal,
    ) -> Result<()> {
        if self.proposals.contains_key(&address) {
            return Err(MultisigError::AlreadyExists);
        }
        self.proposals.insert(address, proposal);
        Ok(())
    }

    pub fn proposal(&self, address: &Address, id: u64) -> Result<&TransactionProposal> {
        self.proposals
            .get(address)
            .ok_or(MultisigError::TransactionNotFound { id })
    }

    pub fn proposal_mut(
        &mut self,
        address: &Address,
        id: u64,
    ) -> Result<&mut TransactionProposal> {
        self.proposals
            .get_mut(address)
            .ok_or(MultisigError::TransactionNotFound { id })
    }

    pub fn registry_count(&self) -> usize {
        self.registries.len()
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// All registries, in address order. Used by read-only front ends.
    pub fn registries(&self) -> impl Iterator<Item = (&Address, &MultisigRegistry)> {
        self.registries.iter()
    }
}
