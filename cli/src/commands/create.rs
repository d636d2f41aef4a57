use crate::state::LedgerState;
use anyhow::Result;
use quorumsig_lib::AccountId;
use std::path::Path;

pub fn run(
    state_path: &Path,
    signer: &str,
    owners: &[String],
    threshold: u8,
    admin_threshold: Option<u8>,
) -> Result<()> {
    let mut state = LedgerState::load(state_path)?;
    let clock = state.tick();

    let owners: Vec<AccountId> = owners.iter().map(|o| AccountId::new(o.clone())).collect();
    let address = state.engine.create_multisig(
        &AccountId::new(signer),
        owners,
        threshold,
        admin_threshold,
        &clock,
    )?;

    let registry = state.engine.registry(&address)?;
    println!("✓ Multisig created: {address}");
    println!(
        "  owners: {} | threshold: {} | admin threshold: {}",
        registry.owners.len(),
        registry.threshold,
        registry.admin_threshold
    );

    state.save(state_path)?;
    Ok(())
}
