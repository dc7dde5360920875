//! Tests for the run subcommand and global options.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_run_defaults() {
    match parse(&["dsget", "run"]) {
        CliCommand::Run {
            first,
            last,
            output,
        } => {
            assert!(first.is_none());
            assert!(last.is_none());
            assert!(output.is_none());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_range_and_output() {
    match parse(&[
        "dsget", "run", "--first", "3", "--last", "7", "-o", "/tmp/dl",
    ]) {
        CliCommand::Run {
            first,
            last,
            output,
        } => {
            assert_eq!(first, Some(3));
            assert_eq!(last, Some(7));
            assert_eq!(output.as_deref(), Some(Path::new("/tmp/dl")));
        }
        _ => panic!("expected Run with overrides"),
    }
}

#[test]
fn cli_parse_global_config_after_subcommand() {
    let cli = Cli::try_parse_from(["dsget", "run", "--config", "/etc/dsget.toml"]).unwrap();
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/dsget.toml")));
}

#[test]
fn cli_rejects_negative_index() {
    assert!(Cli::try_parse_from(["dsget", "run", "--first", "-1"]).is_err());
}
