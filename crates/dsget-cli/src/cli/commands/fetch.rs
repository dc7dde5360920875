//! `dsget fetch <index>` – fetch one descriptor.

use anyhow::Result;
use dsget_core::config::DsgetConfig;
use dsget_core::descriptor::DescriptorId;
use dsget_core::extract::extract_directives;
use dsget_core::fetch::{fetch_descriptor, FetchOutcome};

use super::print_extraction;

pub fn run_fetch(cfg: &DsgetConfig, index: u32, directives: bool) -> Result<()> {
    let id = DescriptorId::new(index);
    match fetch_descriptor(&cfg.source, &cfg.http, id)? {
        FetchOutcome::Absent => {
            println!("Could not find {}", id.file_name(&cfg.source));
        }
        FetchOutcome::Found(text) if directives => print_extraction(&extract_directives(&text)),
        FetchOutcome::Found(text) => print!("{}", text),
    }
    Ok(())
}
