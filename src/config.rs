use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::models::EdgePolicy;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub lookup: LookupConfig,
}

/// Tuning for [`BorderIndex`](crate::pip::BorderIndex) lookups.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LookupConfig {
    /// Edge handling for the hierarchy-level box test
    pub edge_policy: EdgePolicy,
    /// Confirm bounding-box hits with the exact polygon test
    pub exact: bool,
    /// Batches smaller than this are looked up on the calling thread
    pub parallel_min_batch: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            edge_policy: EdgePolicy::Strict,
            exact: true,
            parallel_min_batch: 64,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;
        Ok(config)
    }
}
