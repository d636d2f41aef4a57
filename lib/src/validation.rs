use crate::error::{MultisigError, Result};
use crate::types::{AccountId, LedgerClock, MultisigRegistry};

// ==================== Security Limits ====================
// These constants bound submission frequency and payload shape so a single
// registry cannot be spammed into unbounded storage or processing cost.

/// Maximum number of multisig owners.
/// Keeps approval bitmaps and owner scans small.
pub const MAX_OWNERS: usize = 10;

/// Maximum payload size in bytes.
/// Prevents storage bloat from oversized action data.
pub const MAX_PAYLOAD_BYTES: usize = 1000;

/// Maximum structural complexity score for a payload.
/// Byte length alone is not enough: a small payload can still be engineered
/// to maximize downstream processing cost.
pub const MAX_COMPLEXITY_SCORE: u32 = 100;

/// Minimum slot gap between accepted proposals on one registry.
pub const PROPOSAL_COOLDOWN_SLOTS: u64 = 10;

/// Validity window applied when the proposer does not supply one.
pub const DEFAULT_EXPIRY_HOURS: u16 = 72;

/// Seconds per expiry hour.
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Validates an owner list: non-empty, within the size cap, no empty
/// identities, no duplicates.
pub fn validate_owner_set(owners: &[AccountId]) -> Result<()> {
    if owners.is_empty() {
        return Err(MultisigError::NoOwners);
    }
    if owners.len() > MAX_OWNERS {
        return Err(MultisigError::TooManyOwners { max: MAX_OWNERS });
    }
    for owner in owners {
        if owner.is_empty() {
            return Err(MultisigError::InvalidOwner);
        }
    }
    for i in 0..owners.len() {
        for j in i + 1..owners.len() {
            if owners[i] == owners[j] {
                return Err(MultisigError::DuplicateOwners);
            }
        }
    }
    Ok(())
}

/// Checks a proposal payload against the emptiness, size, and complexity
/// bounds. Pure: produces no side effects.
pub fn validate_payload(payload: &[u8]) -> Result<()> {
    if payload.is_empty() {
        return Err(MultisigError::EmptyTransaction);
    }
    if payload.len() > MAX_PAYLOAD_BYTES {
        return Err(MultisigError::TransactionTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD_BYTES,
        });
    }
    let score = complexity_score(payload);
    if score > MAX_COMPLEXITY_SCORE {
        return Err(MultisigError::TransactionTooComplex {
            score,
            max: MAX_COMPLEXITY_SCORE,
        });
    }
    Ok(())
}

/// Structural complexity heuristic: one point per 10 bytes, plus a penalty
/// for each 4-byte little-endian chunk decoding to a large integer. Large
/// encoded integers tend to indicate loop bounds or repeated adversarial
/// patterns.
pub fn complexity_score(payload: &[u8]) -> u32 {
    let mut complexity = (payload.len() as u32) / 10;

    for chunk in payload.chunks(4) {
        if chunk.len() == 4 {
            let value = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            if value > 1_000_000 {
                complexity += 10;
            }
        }
    }

    complexity
}

/// Enforces the per-registry proposal cooldown. Pure: the caller records the
/// new slot only after the whole proposal is accepted.
pub fn check_rate_limit(registry: &MultisigRegistry, clock: &LedgerClock) -> Result<()> {
    if let Some(last) = registry.last_proposal_slot {
        if clock.slot <= last + PROPOSAL_COOLDOWN_SLOTS {
            return Err(MultisigError::RateLimitExceeded);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_rejected() {
        assert_eq!(validate_payload(&[]), Err(MultisigError::EmptyTransaction));
    }

    #[test]
    fn oversized_payload_rejected() {
        let payload = vec![0u8; MAX_PAYLOAD_BYTES + 1];
        assert!(matches!(
            validate_payload(&payload),
            Err(MultisigError::TransactionTooLarge { size: 1001, .. })
        ));
    }

    #[test]
    fn payload_at_size_ceiling_passes_size_check() {
        // All zeros: complexity is len/10 = 100, exactly at the ceiling.
        let payload = vec![0u8; MAX_PAYLOAD_BYTES];
        assert!(validate_payload(&payload).is_ok());
    }

    #[test]
    fn complexity_counts_large_little_endian_chunks() {
        // 8 bytes = 0 base points; two chunks decoding to u32::MAX = 20.
        let payload = vec![0xFF; 8];
        assert_eq!(complexity_score(&payload), 20);
    }

    #[test]
    fn complexity_ignores_trailing_partial_chunk() {
        let payload = vec![0xFF; 6];
        assert_eq!(complexity_score(&payload), 10);
    }

    #[test]
    fn repeated_large_integers_trip_the_complexity_ceiling() {
        // 44 bytes of 0xFF: base 4 points + 11 chunks * 10 = 114 > 100.
        let payload = vec![0xFF; 44];
        assert!(matches!(
            validate_payload(&payload),
            Err(MultisigError::TransactionTooComplex { score: 114, .. })
        ));
    }

    #[test]
    fn owner_set_bounds() {
        let owners: Vec<AccountId> = (0..11).map(|i| AccountId::new(format!("o{i}"))).collect();
        assert_eq!(
            validate_owner_set(&owners),
            Err(MultisigError::TooManyOwners { max: MAX_OWNERS })
        );
        assert_eq!(validate_owner_set(&[]), Err(MultisigError::NoOwners));
        assert_eq!(
            validate_owner_set(&["a".into(), "".into()]),
            Err(MultisigError::InvalidOwner)
        );
    }

    #[test]
    fn rate_limit_requires_cooldown_after_first_proposal() {
        let mut registry = MultisigRegistry {
            creator: "alice".into(),
            owners: vec!["alice".into()],
            threshold: 1,
            admin_threshold: 1,
            nonce: 0,
            transaction_count: 0,
            paused: false,
            paused_by: None,
            paused_at: None,
            created_at: 0,
            last_proposal_slot: None,
        };

        // No prior proposal: any slot is fine.
        assert!(check_rate_limit(&registry, &LedgerClock::new(0, 0)).is_ok());

        registry.last_proposal_slot = Some(5);
        assert_eq!(
            check_rate_limit(&registry, &LedgerClock::new(15, 0)),
            Err(MultisigError::RateLimitExceeded)
        );
        assert!(check_rate_limit(&registry, &LedgerClock::new(16, 0)).is_ok());
    }
}
