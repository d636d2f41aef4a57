use crate::state::LedgerState;
use anyhow::Result;
use chrono::DateTime;
use quorumsig_lib::Address;
use std::path::Path;

fn format_timestamp(unix: i64) -> String {
    DateTime::from_timestamp(unix, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| unix.to_string())
}

pub fn run(state_path: &Path, multisig: &str, transaction_id: Option<u64>) -> Result<()> {
    let state = LedgerState::load(state_path)?;
    let multisig = Address::from_hex(multisig);

    match transaction_id {
        Some(id) => {
            let proposal = state.engine.proposal(&multisig, id)?;
            println!("Transaction {id}");
            println!("  kind:       {}", proposal.kind);
            println!("  proposer:   {}", proposal.proposer);
            println!("  payload:    {} bytes", proposal.payload.len());
            println!(
                "  approvals:  {}/{}",
                proposal.approval_count(),
                proposal.approvals.len()
            );
            println!("  executed:   {}", proposal.executed);
            println!("  created:    slot {}", proposal.created_slot);
            println!("  expires at: {}", format_timestamp(proposal.expires_at));
        }
        None => {
            let registry = state.engine.registry(&multisig)?;
            println!("Multisig {multisig}");
            println!("  creator:          {}", registry.creator);
            println!(
                "  owners ({}):       {}",
                registry.owners.len(),
                registry
                    .owners
                    .iter()
                    .map(|o| o.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!("  threshold:        {}", registry.threshold);
            println!("  admin threshold:  {}", registry.admin_threshold);
            println!("  nonce:            {}", registry.nonce);
            println!("  transactions:     {}", registry.transaction_count);
            match (&registry.paused_by, registry.paused) {
                (Some(by), true) => println!("  paused:           yes (by {by})"),
                _ => println!("  paused:           no"),
            }
        }
    }

    Ok(())
}

pub fn list(state_path: &Path) -> Result<()> {
    let state = LedgerState::load(state_path)?;
    let store = state.engine.store();

    if store.registry_count() == 0 {
        println!("No registries in {}", state_path.display());
        return Ok(());
    }

    for (address, registry) in store.registries() {
        let status = if registry.paused { "paused" } else { "active" };
        println!(
            "{address}  owners {}  threshold {}/{}  transactions {}  {status}",
            registry.owners.len(),
            registry.threshold,
            registry.admin_threshold,
            registry.transaction_count,
        );
    }
    Ok(())
}
