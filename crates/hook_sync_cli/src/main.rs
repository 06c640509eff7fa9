use std::error::Error as StdError;

use clap::{Parser, Subcommand};
use hook_sync_cli::{
    client::create_github_client,
    commands::{
        apply_cmd::{self, SpecArgs},
        destroy_cmd::{self, DestroyArgs},
        read_cmd::{self, ImportArgs, ReadArgs},
    },
    config::{get_config_path, AppConfig},
    errors::Error,
};
use github_client::GitHubClient;
use hook_sync_core::WebhookReconciler;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// HookSync CLI: Keep GitHub repository webhooks in line with their declarations
#[derive(Parser)]
#[command(name = "hook-sync")]
#[command(about = "Keep GitHub repository webhooks in line with their declarations", long_about = None)]
struct Cli {
    /// Path to the configuration file. Defaults to hook-sync.toml.
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, update or replace a webhook so that it matches its declaration
    Apply(SpecArgs),

    /// Show what apply would change
    Plan(SpecArgs),

    /// Show a webhook as GitHub currently has it
    Read(ReadArgs),

    /// Start tracking an existing webhook, given as <repository>/<hook id>
    Import(ImportArgs),

    /// Delete every tracked webhook
    Destroy(DestroyArgs),

    /// Show the CLI version
    Version,
}

fn version() -> String {
    format!(
        "hook-sync version {}",
        option_env!("HOOK_SYNC_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
    )
}

async fn connect(cli: &Cli) -> Result<(AppConfig, WebhookReconciler<GitHubClient>), Error> {
    let config = AppConfig::load(&get_config_path(cli.config.as_deref()))?;
    let client = create_github_client(&config).await?;
    let reconciler = WebhookReconciler::new(client, config.github.owner.as_str());
    Ok((config, reconciler))
}

async fn run(cli: &Cli) -> Result<String, Error> {
    match &cli.command {
        Commands::Apply(args) => {
            let (config, reconciler) = connect(cli).await?;
            let state_path = config.state_path(args.state.as_deref());
            apply_cmd::apply(&reconciler, args, &state_path).await
        }
        Commands::Plan(args) => {
            let (config, reconciler) = connect(cli).await?;
            let state_path = config.state_path(args.state.as_deref());
            apply_cmd::plan(&reconciler, args, &state_path).await
        }
        Commands::Read(args) => {
            let (config, reconciler) = connect(cli).await?;
            let state_path = config.state_path(args.state.as_deref());
            read_cmd::read(&reconciler, args, &state_path).await
        }
        Commands::Import(args) => {
            let (config, reconciler) = connect(cli).await?;
            let state_path = config.state_path(args.state.as_deref());
            read_cmd::import(&reconciler, args, &state_path).await
        }
        Commands::Destroy(args) => {
            let (config, reconciler) = connect(cli).await?;
            let state_path = config.state_path(args.state.as_deref());
            destroy_cmd::destroy(&reconciler, &state_path).await
        }
        Commands::Version => Ok(version()),
    }
}

/// Formats an error with every cause on its own line.
fn render_error(e: &Error) -> String {
    let mut report = format!("Error: {e}");
    let mut source = e.source();
    while let Some(cause) = source {
        report.push_str(&format!("\n  caused by: {cause}"));
        source = cause.source();
    }
    report
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("HOOK_SYNC_LOG"))
        .init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            let report = render_error(&e);
            error!("{report}");
            eprintln!("{report}");
            std::process::exit(1);
        }
    }
}
