//! Sequential driver: fetch, extract and download every descriptor in the configured range.
//!
//! Failures are contained per directive and per descriptor; only creating the
//! base output directory can abort a run.

use crate::config::DsgetConfig;
use crate::descriptor::DescriptorId;
use crate::download::{self, DownloadResult};
use crate::extract::{self, Directive};
use crate::fetch::{self, FetchOutcome};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Progress notifications, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// 404 for this descriptor.
    DescriptorAbsent { name: String },
    /// Transport or HTTP failure fetching the descriptor, or its directory could not be created.
    DescriptorFailed { name: String, reason: String },
    /// Descriptor fetched but no directive resolved; `dropped` calls were recognized but unusable.
    NoDirectives { name: String, dropped: usize },
    /// Descriptor fetched and `directives` downloads are about to start.
    DescriptorStarted {
        name: String,
        directives: usize,
        dropped: usize,
    },
    DirectiveStarted { url: String, filename: String },
    DirectiveFinished {
        url: String,
        filename: String,
        result: DownloadResult,
    },
}

/// Totals for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub descriptors_found: u32,
    pub descriptors_absent: u32,
    pub descriptors_failed: u32,
    pub directives_succeeded: u32,
    pub directives_failed: u32,
    pub directives_dropped: u32,
}

/// Output directory for one descriptor (`<output_dir>/data0007`).
pub fn descriptor_dir(cfg: &DsgetConfig, id: DescriptorId) -> PathBuf {
    cfg.output_dir.join(id.stem(&cfg.source))
}

/// Processes `cfg.range` in order. `observer` sees every [`RunEvent`].
pub fn run<F>(cfg: &DsgetConfig, mut observer: F) -> Result<RunSummary>
where
    F: FnMut(&RunEvent),
{
    cfg.validate()?;
    fs::create_dir_all(&cfg.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            cfg.output_dir.display()
        )
    })?;
    tracing::info!(
        first = cfg.range.first,
        last = cfg.range.last,
        output = %cfg.output_dir.display(),
        "run started"
    );

    let mut summary = RunSummary::default();
    for index in cfg.range.indices() {
        process_descriptor(cfg, DescriptorId::new(index), &mut summary, &mut observer);
    }

    tracing::info!(?summary, "run finished");
    Ok(summary)
}

fn process_descriptor<F>(
    cfg: &DsgetConfig,
    id: DescriptorId,
    summary: &mut RunSummary,
    observer: &mut F,
) where
    F: FnMut(&RunEvent),
{
    let name = id.stem(&cfg.source);

    let text = match fetch::fetch_descriptor(&cfg.source, &cfg.http, id) {
        Ok(FetchOutcome::Found(text)) => text,
        Ok(FetchOutcome::Absent) => {
            tracing::info!(descriptor = %name, "descriptor not found, skipping");
            summary.descriptors_absent += 1;
            observer(&RunEvent::DescriptorAbsent { name });
            return;
        }
        Err(e) => {
            tracing::warn!(descriptor = %name, "descriptor fetch failed: {}", e);
            summary.descriptors_failed += 1;
            observer(&RunEvent::DescriptorFailed {
                name,
                reason: e.to_string(),
            });
            return;
        }
    };
    summary.descriptors_found += 1;

    let dir = descriptor_dir(cfg, id);
    if let Err(e) = fs::create_dir_all(&dir) {
        tracing::warn!(descriptor = %name, "cannot create {}: {}", dir.display(), e);
        summary.descriptors_failed += 1;
        observer(&RunEvent::DescriptorFailed {
            name,
            reason: format!("cannot create {}: {}", dir.display(), e),
        });
        return;
    }

    let extraction = extract::extract_directives(&text);
    drop(text);
    let dropped = extraction.dropped_count();
    summary.directives_dropped += dropped as u32;

    if extraction.is_empty() {
        tracing::info!(descriptor = %name, dropped, "no download directives");
        observer(&RunEvent::NoDirectives { name, dropped });
        return;
    }

    tracing::info!(
        descriptor = %name,
        directives = extraction.directives.len(),
        dropped,
        "processing descriptor"
    );
    observer(&RunEvent::DescriptorStarted {
        name,
        directives: extraction.directives.len(),
        dropped,
    });

    for directive in extraction.directives {
        let result = download_directive(cfg, &dir, &directive, observer);
        if result.is_success() {
            summary.directives_succeeded += 1;
        } else {
            summary.directives_failed += 1;
        }
    }
}

fn download_directive<F>(
    cfg: &DsgetConfig,
    dir: &Path,
    directive: &Directive,
    observer: &mut F,
) -> DownloadResult
where
    F: FnMut(&RunEvent),
{
    observer(&RunEvent::DirectiveStarted {
        url: directive.url.clone(),
        filename: directive.filename.clone(),
    });
    let result = download::download(&directive.url, dir, &directive.filename, &cfg.http);
    observer(&RunEvent::DirectiveFinished {
        url: directive.url.clone(),
        filename: directive.filename.clone(),
        result: result.clone(),
    });
    result
}
