//! CLI command handlers. Each command is in its own file.

mod extract;
mod fetch;
mod run;

pub use extract::run_extract;
pub use fetch::run_fetch;
pub use run::{run_pipeline, RunOverrides};

use dsget_core::extract::Extraction;

/// Prints one `url -> filename` line per directive, then the dropped calls.
pub(crate) fn print_extraction(extraction: &Extraction) {
    if extraction.is_empty() {
        println!("No download directives found.");
    }
    for d in &extraction.directives {
        println!("{} -> {}", d.url, d.filename);
    }
    if !extraction.dropped.is_empty() {
        println!("{} call(s) dropped:", extraction.dropped_count());
        for dropped in &extraction.dropped {
            println!("  line {}: {}", dropped.line, dropped.reason);
        }
    }
}
