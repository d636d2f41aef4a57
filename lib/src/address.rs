//! Deterministic record addressing.
//!
//! Records are located by hashing seed tuples instead of through explicit
//! index collections: `("multisig", creator)` yields a registry's address and
//! `("transaction", registry, id)` yields a proposal's. The pair is the
//! primary key, so at most one record can ever occupy an address and lookup
//! is O(1) with no back-pointer bookkeeping on the registry side.

use crate::types::AccountId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

const REGISTRY_SEED: &[u8] = b"multisig";
const PROPOSAL_SEED: &[u8] = b"transaction";

/// Hex-encoded SHA-256 digest identifying one record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wraps an already-encoded digest. Used when reading addresses back
    /// from persisted state or user input.
    pub fn from_hex(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address of the registry owned by `creator`. One registry per creator:
/// a second creation attempt lands on the same address and fails at the
/// storage layer.
pub fn registry_address(creator: &AccountId) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(REGISTRY_SEED);
    hasher.update(creator.as_str().as_bytes());
    Address(hex::encode(hasher.finalize()))
}

/// Address of proposal `transaction_id` under the given registry.
pub fn proposal_address(multisig: &Address, transaction_id: u64) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(PROPOSAL_SEED);
    hasher.update(multisig.as_str().as_bytes());
    hasher.update(transaction_id.to_le_bytes());
    Address(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_addresses_are_deterministic() {
        let a = registry_address(&"alice".into());
        let b = registry_address(&"alice".into());
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn different_creators_get_different_addresses() {
        assert_ne!(
            registry_address(&"alice".into()),
            registry_address(&"bob".into())
        );
    }

    #[test]
    fn proposal_addresses_vary_by_id_and_registry() {
        let alice = registry_address(&"alice".into());
        let bob = registry_address(&"bob".into());
        assert_ne!(proposal_address(&alice, 0), proposal_address(&alice, 1));
        assert_ne!(proposal_address(&alice, 0), proposal_address(&bob, 0));
    }
}
