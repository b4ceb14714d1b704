//! AgrowMart - account and session client
//!
//! CLI entry point that dispatches to subcommands.

use agrowmart::cli::{commands, AppContext, Cli, Commands};
use agrowmart::config::{Config, ConfigManager};
use agrowmart::error::AgrowResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AgrowResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    debug!("Using config {}", config_manager.path().display());
    agrowmart::ui::init_theme();

    // Account commands share one session, restored before they run
    let session = || AppContext::start(with_overrides(config.clone(), cli.api_url.clone()));

    match cli.command {
        Commands::Completions(args) => {
            commands::completions(args);
            Ok(())
        }
        // Config edits work on the file as saved, without CLI overrides
        Commands::Config(args) => commands::config(args, &config_manager, &config).await,
        Commands::Signup(args) => commands::signup(args, &session().await?).await,
        Commands::Login(args) => commands::login(args, &session().await?).await,
        Commands::Logout(args) => commands::logout(args, &session().await?).await,
        Commands::Status(args) => commands::status(args, &session().await?).await,
        Commands::Profile(args) => commands::profile(args, &session().await?).await,
        Commands::ForgotPassword(args) => commands::forgot_password(args, &session().await?).await,
        Commands::ResetPassword(args) => commands::reset_password(args, &session().await?).await,
        Commands::Open(args) => commands::open(args, &session().await?).await,
    }
}

/// Log to stderr: 0 = warn, 1 = info, 2+ = debug. `general.verbose` counts as one `-v`.
fn init_logging(verbose: u8, config: &Config) {
    let level = verbose.saturating_add(u8::from(config.general.verbose));
    let filter = match level {
        0 => EnvFilter::new("agrowmart=warn"),
        1 => EnvFilter::new("agrowmart=info"),
        _ => EnvFilter::new("agrowmart=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}

fn with_overrides(mut config: Config, api_url: Option<String>) -> Config {
    if let Some(url) = api_url {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    config
}
