//! Host configuration, read from TOML (or JSON when the file ends in `.json`).
//!
//! ```toml
//! module_path = "target/wasm32-unknown-unknown/release/median_wasm.wasm"
//! encoding = "raw"
//! max_memory_bytes = 1048576
//! ```

use median_wasm::OutputEncoding;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HostError, HostResult};

/// One wasm page.
pub const WASM_PAGE_SIZE: usize = 64 * 1024;

pub const DEFAULT_MAX_MEMORY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Compiled guest module.
    pub module_path: Option<PathBuf>,
    /// Which entry point to call: `exec` (structured) or `exec_raw` (raw).
    pub encoding: OutputEncoding,
    /// Upper bound on the guest's linear memory.
    pub max_memory_bytes: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            module_path: None,
            encoding: OutputEncoding::Structured,
            max_memory_bytes: DEFAULT_MAX_MEMORY_BYTES,
        }
    }
}

impl HostConfig {
    pub fn from_toml_str(text: &str) -> HostResult<Self> {
        let config: HostConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> HostResult<Self> {
        let data = fs::read_to_string(path)?;
        let config: HostConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&data).map_err(|e| HostError::Config(e.to_string()))?
        } else {
            toml::from_str(&data)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> HostResult<()> {
        if self.max_memory_bytes < WASM_PAGE_SIZE {
            return Err(HostError::Config(format!(
                "max_memory_bytes must be at least one wasm page ({} bytes), got {}",
                WASM_PAGE_SIZE, self.max_memory_bytes
            )));
        }
        Ok(())
    }
}
