use crate::state::LedgerState;
use anyhow::Result;
use quorumsig_lib::{AccountId, Address};
use std::path::Path;

pub fn run(state_path: &Path, signer: &str, multisig: &str, transaction_id: u64) -> Result<()> {
    let mut state = LedgerState::load(state_path)?;
    state.tick();

    let multisig = Address::from_hex(multisig);
    state
        .engine
        .approve_transaction(&multisig, &AccountId::new(signer), transaction_id)?;

    let approvals = state.engine.approval_count(&multisig, transaction_id)?;
    let registry = state.engine.registry(&multisig)?;
    println!(
        "✓ Transaction {transaction_id} approved ({approvals}/{} standard threshold)",
        registry.threshold
    );

    state.save(state_path)?;
    Ok(())
}
