use crate::state::LedgerState;
use anyhow::Result;
use quorumsig_lib::{AccountId, Address};
use std::path::Path;

pub fn pause(state_path: &Path, signer: &str, multisig: &str) -> Result<()> {
    let mut state = LedgerState::load(state_path)?;
    let clock = state.tick();

    let multisig = Address::from_hex(multisig);
    state
        .engine
        .emergency_pause(&multisig, &AccountId::new(signer), &clock)?;

    println!("✓ Multisig paused by {signer}");

    state.save(state_path)?;
    Ok(())
}

pub fn unpause(state_path: &Path, signer: &str, multisig: &str, transaction_id: u64) -> Result<()> {
    let mut state = LedgerState::load(state_path)?;
    let clock = state.tick();

    let multisig = Address::from_hex(multisig);
    state
        .engine
        .unpause(&multisig, &AccountId::new(signer), transaction_id, &clock)?;

    println!("✓ Multisig unpaused (transaction {transaction_id} consumed)");

    state.save(state_path)?;
    Ok(())
}

pub fn set_threshold(
    state_path: &Path,
    signer: &str,
    multisig: &str,
    transaction_id: u64,
    new_threshold: u8,
) -> Result<()> {
    let mut state = LedgerState::load(state_path)?;
    let clock = state.tick();

    let multisig = Address::from_hex(multisig);
    state.engine.change_threshold(
        &multisig,
        &AccountId::new(signer),
        transaction_id,
        new_threshold,
        &clock,
    )?;

    println!("✓ Threshold changed to {new_threshold}");

    state.save(state_path)?;
    Ok(())
}

pub fn add_owner(
    state_path: &Path,
    signer: &str,
    multisig: &str,
    transaction_id: u64,
    owner: &str,
) -> Result<()> {
    let mut state = LedgerState::load(state_path)?;
    let clock = state.tick();

    let multisig = Address::from_hex(multisig);
    state.engine.add_owner(
        &multisig,
        &AccountId::new(signer),
        transaction_id,
        AccountId::new(owner),
        &clock,
    )?;

    let total = state.engine.registry(&multisig)?.owners.len();
    println!("✓ Owner {owner} added ({total} total)");

    state.save(state_path)?;
    Ok(())
}

pub fn remove_owner(
    state_path: &Path,
    signer: &str,
    multisig: &str,
    transaction_id: u64,
    owner: &str,
) -> Result<()> {
    let mut state = LedgerState::load(state_path)?;
    let clock = state.tick();

    let multisig = Address::from_hex(multisig);
    state.engine.remove_owner(
        &multisig,
        &AccountId::new(signer),
        transaction_id,
        AccountId::new(owner),
        &clock,
    )?;

    let total = state.engine.registry(&multisig)?.owners.len();
    println!("✓ Owner {owner} removed ({total} remaining)");

    state.save(state_path)?;
    Ok(())
}
