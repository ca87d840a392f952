//! Median host CLI
//!
//! Usage:
//!   median-host --module median_wasm.wasm 3 1 2
//!   median-host --config host.toml --input data.json --column Column_1

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use median_host::{load_sample, HostConfig, MedianRunner};
use median_wasm::OutputEncoding;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EncodingArg {
    Raw,
    Structured,
}

impl From<EncodingArg> for OutputEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Raw => OutputEncoding::Raw,
            EncodingArg::Structured => OutputEncoding::Structured,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "median-host")]
#[command(about = "Compute a median by calling the median wasm module")]
struct Args {
    /// Path to host configuration file (TOML, or JSON by extension)
    #[arg(long, env = "MEDIAN_HOST_CONFIG")]
    config: Option<PathBuf>,

    /// Compiled median module (overrides `module_path` from the config)
    #[arg(long, env = "MEDIAN_WASM_MODULE")]
    module: Option<PathBuf>,

    /// Output encoding requested from the module
    #[arg(long, value_enum)]
    encoding: Option<EncodingArg>,

    /// JSON file holding the sample
    #[arg(long)]
    input: Option<PathBuf>,

    /// Column to read when the input file is a JSON object
    #[arg(long, requires = "input")]
    column: Option<String>,

    /// Sample values, used when no input file is given
    #[arg(allow_negative_numbers = true, conflicts_with = "input")]
    values: Vec<i32>,
}

impl Args {
    /// CLI flags win over the config file, which wins over defaults.
    fn resolve_config(&self) -> anyhow::Result<HostConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let config = HostConfig::load(path)
                    .with_context(|| format!("loading config {}", path.display()))?;
                info!("Loaded host configuration from: {}", path.display());
                config
            }
            None => HostConfig::default(),
        };
        if let Some(module) = &self.module {
            config.module_path = Some(module.clone());
        }
        if let Some(encoding) = self.encoding {
            config.encoding = encoding.into();
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("median_host=info".parse()?),
        )
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.resolve_config()?;

    let module_path = config
        .module_path
        .clone()
        .context("no module given: pass --module or set module_path in the config")?;

    let sample = match &args.input {
        Some(path) => load_sample(path, args.column.as_deref())
            .with_context(|| format!("reading sample from {}", path.display()))?,
        None => args.values.clone(),
    };
    if sample.is_empty() {
        bail!("no sample values given");
    }

    let runner = MedianRunner::from_file(&module_path, config)?;
    let median = runner.median(&sample)?;
    info!(count = sample.len(), median, "median computed");
    println!("{}", median);
    Ok(())
}
