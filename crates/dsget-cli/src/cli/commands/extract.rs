//! `dsget extract <path>` – show the directives found in a local descriptor.

use anyhow::{Context, Result};
use dsget_core::extract::extract_directives;
use std::fs;
use std::path::Path;

use super::print_extraction;

pub fn run_extract(path: &Path) -> Result<()> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let extraction = extract_directives(&text);
    print_extraction(&extraction);
    Ok(())
}
