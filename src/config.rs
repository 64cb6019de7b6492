//! Resource manager configuration
//!
//! ```toml
//! max_cache_size = 4194304
//! search_paths = ["game", "game/patch"]
//! packages = ["local.pak", "act1.pak"]
//! ```

use crate::cache::DEFAULT_MAX_CACHE_SIZE;
use crate::error::{PakError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for a [`ResourceManager`](crate::ResourceManager)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Cache budget in bytes
    pub max_cache_size: usize,
    /// Roots searched for loose overrides and packages, in order
    pub search_paths: Vec<PathBuf>,
    /// Packages opened at startup; their order is the search order
    pub packages: Vec<PathBuf>,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            max_cache_size: DEFAULT_MAX_CACHE_SIZE,
            search_paths: Vec::new(),
            packages: Vec::new(),
        }
    }
}

impl ResourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_cache_size(mut self, bytes: usize) -> Self {
        self.max_cache_size = bytes;
        self
    }

    pub fn with_search_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.search_paths.push(path.into());
        self
    }

    pub fn with_package<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.packages.push(path.into());
        self
    }

    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PakError::open(path, e))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
