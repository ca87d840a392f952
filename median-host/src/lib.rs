//! Host harness for the median compute module.
//!
//! Loads the compiled module with wasmtime, writes a sample into its linear
//! memory through the exported `allocate`, calls `exec` or `exec_raw`, and
//! reads the median back.

pub mod config;
pub mod error;
pub mod input;
pub mod runner;

pub use config::HostConfig;
pub use error::{HostError, HostResult};
pub use input::load_sample;
pub use runner::MedianRunner;
