use super::*;
use clap::CommandFactory;
use std::path::PathBuf;

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_apply_with_global_config() {
    let cli = Cli::try_parse_from([
        "hook-sync",
        "apply",
        "--spec",
        "webhooks/ci.toml",
        "--config",
        "custom.toml",
    ])
    .unwrap();

    assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    match cli.command {
        Commands::Apply(args) => {
            assert_eq!(args.spec, PathBuf::from("webhooks/ci.toml"));
            assert!(args.name.is_none());
            assert!(args.state.is_none());
        }
        _ => panic!("Expected the apply command"),
    }
}

#[test]
fn test_parse_import_takes_positional_id() {
    let cli = Cli::try_parse_from(["hook-sync", "import", "foo/42", "--name", "ci"]).unwrap();

    match cli.command {
        Commands::Import(args) => {
            assert_eq!(args.import_id, "foo/42");
            assert_eq!(args.name.as_deref(), Some("ci"));
        }
        _ => panic!("Expected the import command"),
    }
}

#[test]
fn test_parse_read_requires_repository() {
    let result = Cli::try_parse_from(["hook-sync", "read", "--id", "42"]);

    assert!(result.is_err());
}

#[tokio::test]
async fn test_version_does_not_need_configuration() {
    let cli = Cli::try_parse_from([
        "hook-sync",
        "version",
        "--config",
        "this-file-does-not-exist.toml",
    ])
    .unwrap();

    let output = run(&cli).await.unwrap();

    assert!(output.starts_with("hook-sync version "));
}

#[tokio::test]
async fn test_missing_configuration_is_reported() {
    let cli = Cli::try_parse_from([
        "hook-sync",
        "destroy",
        "--config",
        "this-file-does-not-exist.toml",
    ])
    .unwrap();

    let result = run(&cli).await;

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_error_report_lists_each_cause_once() {
    let error: Error = hook_sync_core::ReconcileError::ReadFailed {
        repository: "foo".to_string(),
        hook_id: 42,
        source: github_client::Error::RateLimitExceeded,
    }
    .into();

    let report = render_error(&error);

    assert_eq!(
        report,
        "Error: Webhook reconciliation failed\n  caused by: Failed to read webhook 42 of repository 'foo'\n  caused by: Rate limit exceeded"
    );
}
