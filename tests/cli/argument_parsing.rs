//! CLI argument parsing tests

use bagcheck::app::cli::{Args, Command};
use bagcheck::manifest::ManifestSource;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[test]
fn test_command_definition_is_consistent() {
    Args::command().debug_assert();
}

#[test]
fn test_version_flag_exits_early() {
    let err = Args::try_parse_from(["bagcheck", "--version"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    assert!(Args::try_parse_from(["bagcheck", "upload"]).is_err());
}

#[test]
fn test_full_check_invocation() {
    let args = Args::try_parse_from([
        "bagcheck",
        "--no-color",
        "--log-format",
        "json",
        "check",
        "--date",
        "15/01/2024",
        "--flight",
        "fo123",
        "--manifest",
        "flights.tsv",
        "--strip-prefix",
        "none",
    ])
    .unwrap();

    assert_eq!(args.color_override(), Some(false));
    assert_eq!(args.log_format.as_deref(), Some("json"));
    assert_eq!(
        args.manifest_source().unwrap(),
        ManifestSource::File(PathBuf::from("flights.tsv"))
    );
    assert_eq!(
        args.command_or_default(),
        Command::Check {
            date: "15/01/2024".to_string(),
            flight: "fo123".to_string(),
            codes: vec![],
        }
    );
    let normalizer = args.code_normalizer().unwrap();
    assert_eq!(normalizer.pattern(), None);
}

#[test]
fn test_invalid_log_level_is_rejected() {
    assert!(Args::try_parse_from(["bagcheck", "--log-level", "loud"]).is_err());
    assert!(Args::try_parse_from(["bagcheck", "--log-format", "min"]).is_err());
}
