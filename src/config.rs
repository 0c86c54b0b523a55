//! Run configuration: `config.json` plus command-line overrides.
//!
//! JSON shape:
//! {
//!   "log_file_path": "logs/beeline.log",   // transcript to parse
//!   "save_path": "out/",                   // directory for the summaries
//!   "verbosity": 0                         // optional, 0 or 1
//! }

use anyhow::{Context, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Config file as written on disk; every key is optional here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub log_file_path: Option<PathBuf>,
    pub save_path: Option<PathBuf>,
    pub verbosity: Option<u8>,
}

impl FileConfig {
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> crate::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parse config file {}", path.display()))
    }

    /// Load an explicitly named config, or `config.json` if it exists.
    pub fn discover(explicit: Option<&Path>) -> crate::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load(default)
                } else {
                    log::debug!("No {} found, using command-line values only", DEFAULT_CONFIG_PATH);
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Values given on the command line; they win over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_file_path: Option<PathBuf>,
    pub save_path: Option<PathBuf>,
    pub verbosity: Option<u8>,
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_file_path: PathBuf,
    pub save_path: Option<PathBuf>,
    pub verbosity: u8,
}

impl Settings {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> crate::Result<Self> {
        let Some(log_file_path) = overrides.log_file_path.or(file.log_file_path) else {
            bail!("missing config key log_file_path (or pass --log)");
        };
        let verbosity = overrides.verbosity.or(file.verbosity).unwrap_or(0);
        if verbosity > 1 {
            bail!("verbosity must be 0 or 1, got {}", verbosity);
        }

        Ok(Self {
            log_file_path,
            save_path: overrides.save_path.or(file.save_path),
            verbosity,
        })
    }

    pub fn require_save_path(&self) -> crate::Result<&Path> {
        match &self.save_path {
            Some(p) => Ok(p.as_path()),
            None => bail!("missing config key save_path (or pass --out)"),
        }
    }
}
