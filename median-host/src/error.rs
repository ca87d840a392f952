use median_wasm::MedianError;
use thiserror::Error;

pub type HostResult<T> = Result<T, HostError>;

/// Errors raised while loading or driving the guest module.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Wasm error: {0}")]
    Wasm(String),
    #[error("Missing export: {0}")]
    MissingExport(String),
    #[error("Trap: {0}")]
    Trap(String),
    #[error("Memory access error: {0}")]
    Memory(String),
    #[error("Module returned status {0}")]
    Status(i32),
    #[error("Invalid module output: {0}")]
    Output(String),
    #[error("Invalid input: {0}")]
    Input(String),
}

impl From<std::io::Error> for HostError {
    fn from(e: std::io::Error) -> Self {
        HostError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for HostError {
    fn from(e: serde_json::Error) -> Self {
        HostError::Input(e.to_string())
    }
}

impl From<toml::de::Error> for HostError {
    fn from(e: toml::de::Error) -> Self {
        HostError::Config(e.to_string())
    }
}

impl From<MedianError> for HostError {
    fn from(e: MedianError) -> Self {
        HostError::Output(e.to_string())
    }
}
