use anyhow::{Context, Result};
use quorumsig_lib::{LedgerClock, MultisigEngine};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk ledger: the engine plus the slot counter that orders every
/// mutating command. One CLI invocation advances the ledger by one slot.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LedgerState {
    pub slot: u64,
    pub engine: MultisigEngine,
}

impl LedgerState {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid state file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write state file {}", path.display()))?;
        Ok(())
    }

    /// Advances the ledger by one slot and returns the clock for this call.
    pub fn tick(&mut self) -> LedgerClock {
        self.slot += 1;
        LedgerClock::system(self.slot)
    }
}
