use crate::state::LedgerState;
use anyhow::Result;
use quorumsig_lib::{AccountId, Address, LoggingTransferExecutor};
use std::path::Path;

pub fn run(state_path: &Path, signer: &str, multisig: &str, transaction_id: u64) -> Result<()> {
    let mut state = LedgerState::load(state_path)?;
    let clock = state.tick();

    let multisig = Address::from_hex(multisig);
    state.engine.execute_transaction(
        &multisig,
        &AccountId::new(signer),
        transaction_id,
        &clock,
        &mut LoggingTransferExecutor,
    )?;

    println!("✓ Transaction {transaction_id} executed");

    state.save(state_path)?;
    Ok(())
}
