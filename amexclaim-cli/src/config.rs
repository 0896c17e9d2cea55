use amexclaim_finance::{ClaimLayout, ExportFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

const HOME_OVERRIDE_VAR: &str = "AMEXCLAIM_HOME";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub columns: ColumnsSection,
    pub literals: LiteralsSection,
    pub export: ExportSection,
}

/// Statement column names. Matching tolerates wrapped headers and case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsSection {
    pub amount: String,
    pub date: String,
    pub description: String,
    pub reference: String,
    pub group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiteralsSection {
    pub paid_with: String,
    pub branch: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub format: ExportFormat,
}

impl Default for ColumnsSection {
    fn default() -> Self {
        let layout = ClaimLayout::default();
        Self {
            amount: layout.amount_column,
            date: layout.date_column,
            description: layout.description_column,
            reference: layout.reference_column,
            group: layout.group_column,
        }
    }
}

impl Default for LiteralsSection {
    fn default() -> Self {
        let layout = ClaimLayout::default();
        Self {
            paid_with: layout.paid_with,
            branch: layout.branch,
        }
    }
}

impl Config {
    pub fn layout(&self) -> ClaimLayout {
        ClaimLayout {
            amount_column: self.columns.amount.clone(),
            date_column: self.columns.date.clone(),
            description_column: self.columns.description.clone(),
            reference_column: self.columns.reference.clone(),
            group_column: self.columns.group.clone(),
            paid_with: self.literals.paid_with.clone(),
            branch: self.literals.branch.clone(),
        }
    }
}

/// `$AMEXCLAIM_HOME` when set and non-empty, else `$HOME/.amexclaim`.
fn resolve_home(override_dir: Option<OsString>, home: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = home
        .filter(|h| !h.is_empty())
        .with_context(|| format!("neither {HOME_OVERRIDE_VAR} nor HOME is set"))?;
    Ok(PathBuf::from(home).join(".amexclaim"))
}

pub fn config_dir() -> Result<PathBuf> {
    resolve_home(env::var_os(HOME_OVERRIDE_VAR), env::var_os("HOME"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Explicit path if given, else ~/.amexclaim/config.toml when present, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = config_path()?;
            if !p.exists() {
                return Ok(Config::default());
            }
            p
        }
    };
    read_config(&p)
}

pub fn read_config(p: &Path) -> Result<Config> {
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if write_default_config(&p)? {
        println!("Wrote {}", p.display());
    } else {
        println!("Config already exists: {}", p.display());
    }
    Ok(())
}

/// Write the default config to `p`, creating parent directories. Returns false
/// and leaves the file alone when it already exists.
fn write_default_config(p: &Path) -> Result<bool> {
    if p.exists() {
        return Ok(false);
    }
    if let Some(dir) = p.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(&Config::default()).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(true)
}
