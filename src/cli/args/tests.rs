use super::{Cli, Command};
use crate::project_identity;
use clap::{CommandFactory, Parser};

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn no_subcommand_parses() {
    let parsed = Cli::try_parse_from([project_identity::BINARY_NAME]).expect("bare invocation");
    assert!(parsed.command.is_none());
}

#[test]
fn global_flags_work_after_subcommand() {
    let parsed = Cli::try_parse_from([
        project_identity::BINARY_NAME,
        "install",
        "git",
        "make",
        "--dry-run",
        "--backend",
        "port",
    ])
    .expect("install with flags should parse");
    assert!(parsed.global.dry_run);
    assert_eq!(parsed.global.backend.as_deref(), Some("port"));
    match parsed.command {
        Some(Command::Install { tools }) => assert_eq!(tools, vec!["git", "make"]),
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn quiet_and_verbose_conflict() {
    let parsed = Cli::try_parse_from([project_identity::BINARY_NAME, "-q", "-v", "status"]);
    assert!(parsed.is_err());
}

#[test]
fn backends_takes_no_tools() {
    let parsed = Cli::try_parse_from([project_identity::BINARY_NAME, "backends", "git"]);
    assert!(parsed.is_err());
}
