//! CLI for dsget.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dsget_core::config::{self, DsgetConfig};
use std::path::PathBuf;

use commands::{run_extract, run_fetch, run_pipeline, RunOverrides};

/// Top-level CLI for dsget.
#[derive(Debug, Parser)]
#[command(name = "dsget")]
#[command(
    about = "dsget: fetch dataset descriptors, extract their download.file() calls, download the files",
    long_about = None
)]
pub struct Cli {
    /// Use this config file instead of ~/.config/dsget/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Process every descriptor in the configured range.
    Run {
        /// First descriptor index (overrides range.first).
        #[arg(long, value_name = "N")]
        first: Option<u32>,
        /// Last descriptor index, inclusive (overrides range.last).
        #[arg(long, value_name = "N")]
        last: Option<u32>,
        /// Base output directory (overrides output_dir).
        #[arg(long, short = 'o', value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Fetch one descriptor and print its text.
    Fetch {
        /// Descriptor index (1 for data0001).
        index: u32,
        /// Print the extracted download directives instead of the text.
        #[arg(long)]
        directives: bool,
    },

    /// Extract download directives from a local descriptor file.
    Extract {
        /// Path to the descriptor (R script).
        path: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<DsgetConfig> {
    let cfg = match path {
        Some(p) => config::load_from_path(p)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run {
                first,
                last,
                output,
            } => {
                let cfg = load_config(cli.config.as_ref())?;
                let overrides = RunOverrides {
                    first,
                    last,
                    output,
                };
                run_pipeline(overrides.apply(cfg))?;
            }
            CliCommand::Fetch { index, directives } => {
                let cfg = load_config(cli.config.as_ref())?;
                run_fetch(&cfg, index, directives)?;
            }
            CliCommand::Extract { path } => run_extract(&path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
