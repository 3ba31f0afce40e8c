use anyhow::{Context, Result};
use ledger_core::{CategoryRegistry, FALLBACK_CATEGORY, Normalizer, SystemClock, UuidIds};
use ledger_report::DEFAULT_MONTHLY_BUDGET;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::state::{ensure_ledger_home, ledger_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub org: OrgSection,
    pub report: ReportSection,
    pub categories: CategorySection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrgSection {
    /// Used as the export file name prefix
    pub name: String,
    /// IANA timezone that decides what "today" is
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportSection {
    pub monthly_budget: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CategorySection {
    /// Suggested labels; unknown labels are still accepted
    pub known: Vec<String>,
    /// Label for records without a category
    pub fallback: String,
}

impl Default for OrgSection {
    fn default() -> Self {
        Self {
            name: "학생회_회계".to_string(),
            timezone: "Asia/Seoul".to_string(),
        }
    }
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            monthly_budget: DEFAULT_MONTHLY_BUDGET,
        }
    }
}

impl Default for CategorySection {
    fn default() -> Self {
        Self {
            known: CategoryRegistry::default().labels().to_vec(),
            fallback: FALLBACK_CATEGORY.to_string(),
        }
    }
}

impl Config {
    pub fn clock(&self) -> Result<SystemClock> {
        SystemClock::from_tz_name(&self.org.timezone)
            .with_context(|| format!("org.timezone in {}", display_config_path()))
    }

    pub fn normalizer(&self) -> Result<Normalizer> {
        Ok(Normalizer::new(self.clock()?, UuidIds).with_fallback_category(&self.categories.fallback))
    }

    pub fn registry(&self) -> CategoryRegistry {
        CategoryRegistry::new(self.categories.known.iter().cloned())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_ledger_home()?.join("config.toml"))
}

fn display_config_path() -> String {
    ledger_home()
        .map(|p| p.join("config.toml").display().to_string())
        .unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// A missing file reads as defaults; a present one must parse.
pub fn load_config_from(path: &Path) -> Result<Config> {
    match fs::read_to_string(path) {
        Ok(body) => parse_config(&body).with_context(|| path.display().to_string()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
    }
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

fn write_config_to(path: &Path, cfg: &Config) -> Result<()> {
    let body = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, format!("# ledger settings; every key is optional\n\n{body}"))
        .with_context(|| format!("write {}", path.display()))
}

/// Write the defaults to `path` unless a file is already there.
/// Returns whether anything was written.
pub fn init_config_at(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    write_config_to(path, &Config::default())?;
    Ok(true)
}
