//! Tests for fetch and extract subcommands.

use super::parse;
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_fetch() {
    match parse(&["dsget", "fetch", "12"]) {
        CliCommand::Fetch { index, directives } => {
            assert_eq!(index, 12);
            assert!(!directives);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_directives() {
    match parse(&["dsget", "fetch", "1", "--directives"]) {
        CliCommand::Fetch { index, directives } => {
            assert_eq!(index, 1);
            assert!(directives);
        }
        _ => panic!("expected Fetch --directives"),
    }
}

#[test]
fn cli_parse_extract() {
    match parse(&["dsget", "extract", "R/data/data0001.R"]) {
        CliCommand::Extract { path } => assert_eq!(path, Path::new("R/data/data0001.R")),
        _ => panic!("expected Extract"),
    }
}

#[test]
fn run_extract_reads_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data0001.R");
    std::fs::write(&path, "download.file('http://b/z.csv', destfile = 'z.csv')").unwrap();
    crate::cli::commands::run_extract(&path).unwrap();
    assert!(crate::cli::commands::run_extract(&dir.path().join("missing.R")).is_err());
}
