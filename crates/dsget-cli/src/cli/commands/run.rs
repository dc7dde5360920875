//! `dsget run` – process the configured descriptor range.

use anyhow::Result;
use dsget_core::config::DsgetConfig;
use dsget_core::pipeline::{self, RunEvent};
use std::path::PathBuf;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub first: Option<u32>,
    pub last: Option<u32>,
    pub output: Option<PathBuf>,
}

impl RunOverrides {
    pub fn apply(self, mut cfg: DsgetConfig) -> DsgetConfig {
        if let Some(first) = self.first {
            cfg.range.first = first;
        }
        if let Some(last) = self.last {
            cfg.range.last = last;
        }
        if let Some(output) = self.output {
            cfg.output_dir = output;
        }
        cfg
    }
}

/// Progress line for an event.
pub(crate) fn render(event: &RunEvent) -> String {
    match event {
        RunEvent::DescriptorAbsent { name } => format!("Could not find {}", name),
        RunEvent::DescriptorFailed { name, reason } => {
            format!("Failed to process {}: {}", name, reason)
        }
        RunEvent::NoDirectives { name, dropped: 0 } => {
            format!("No download URLs found in {}", name)
        }
        RunEvent::NoDirectives { name, dropped } => format!(
            "No download URLs found in {} ({} unresolved call(s))",
            name, dropped
        ),
        RunEvent::DescriptorStarted { name, .. } => format!("\nProcessing {}:", name),
        RunEvent::DirectiveStarted { url, filename } => {
            format!("  Downloading {} from {}", filename, url)
        }
        RunEvent::DirectiveFinished {
            filename, result, ..
        } => match &result.error {
            None => format!("  ✓ Successfully downloaded {}", filename),
            Some(reason) => format!("  ✗ Failed to download {}: {}", filename, reason),
        },
    }
}

pub fn run_pipeline(cfg: DsgetConfig) -> Result<()> {
    let summary = pipeline::run(&cfg, |event| println!("{}", render(event)))?;
    println!(
        "\nDone: {} descriptor(s) processed, {} missing, {} failed; {} file(s) downloaded, {} failed, {} call(s) unresolved.",
        summary.descriptors_found,
        summary.descriptors_absent,
        summary.descriptors_failed,
        summary.directives_succeeded,
        summary.directives_failed,
        summary.directives_dropped,
    );
    tracing::info!("run completed: {:?}", summary);
    Ok(())
}
