use anyhow::{Context, Result};
use ledger_core::{Ledger, Transaction};
use std::fs;
use std::path::{Path, PathBuf};

/// `$LEDGER_HOME`, or `~/.ledger`
pub fn ledger_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("LEDGER_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".ledger"))
}

pub fn ensure_ledger_home() -> Result<PathBuf> {
    let dir = ledger_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Local JSON copy of the canonical collection
pub fn store_path() -> Result<PathBuf> {
    Ok(ensure_ledger_home()?.join("transactions.json"))
}

/// Missing store reads as an empty ledger.
pub fn read_store(path: &Path) -> Result<Ledger> {
    if !path.exists() {
        return Ok(Ledger::new());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let txns: Vec<Transaction> =
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Ledger::from_transactions(txns))
}

pub fn write_store(path: &Path, ledger: &Ledger) -> Result<()> {
    let json = serde_json::to_string_pretty(ledger)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    log::debug!("stored {} transaction(s) in {}", ledger.len(), path.display());
    Ok(())
}
