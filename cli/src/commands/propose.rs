use crate::state::LedgerState;
use anyhow::{Context, Result};
use quorumsig_lib::{AccountId, Address, TransactionKind};
use std::path::Path;

fn parse_kind(kind: &str) -> Result<TransactionKind> {
    Ok(match kind {
        "transfer" => TransactionKind::Transfer,
        "token-transfer" => TransactionKind::TokenTransfer,
        "admin-action" => TransactionKind::AdminAction,
        "change-threshold" => TransactionKind::ChangeThreshold,
        "add-owner" => TransactionKind::AddOwner,
        "remove-owner" => TransactionKind::RemoveOwner,
        "custom" => TransactionKind::Custom,
        other => anyhow::bail!("Unknown transaction kind: {other}"),
    })
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    state_path: &Path,
    signer: &str,
    multisig: &str,
    payload: &str,
    kind: &str,
    nonce: Option<u64>,
    expires_in_hours: Option<u16>,
) -> Result<()> {
    let mut state = LedgerState::load(state_path)?;
    let clock = state.tick();

    let multisig = Address::from_hex(multisig);
    let payload = hex::decode(payload).context("Payload must be hex-encoded")?;
    let kind = parse_kind(kind)?;

    // A client that does not track the nonce re-reads it from current state,
    // exactly as it would after an InvalidNonce rejection.
    let nonce = match nonce {
        Some(nonce) => nonce,
        None => state.engine.registry(&multisig)?.nonce,
    };

    let transaction_id = state.engine.propose_transaction(
        &multisig,
        &AccountId::new(signer),
        payload,
        nonce,
        kind,
        expires_in_hours,
        &clock,
    )?;

    println!("✓ Transaction {transaction_id} proposed (kind: {kind}, nonce {nonce} consumed)");

    state.save(state_path)?;
    Ok(())
}
