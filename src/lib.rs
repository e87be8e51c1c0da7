pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod services;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use cli::{AccountCommands, Cli, Commands, Console};
pub use config::Config;
use db::Store;
use services::SeaOrmAuthService;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        // No config is read and no database is touched just to write a config file.
        Commands::Init => {
            init_tracing(&config::GeneralConfig::default().log_level);
            let path = cli.config.unwrap_or_else(Config::default_config_path);
            let outcome = cli::cmd_init(&mut Console::stdio(), &path)?;
            Ok(outcome.exit_code())
        }
        Commands::Account(command) => run_account(cli.config, cli.database, command).await,
    }
}

async fn run_account(
    config_path: Option<PathBuf>,
    database: Option<String>,
    command: AccountCommands,
) -> anyhow::Result<ExitCode> {
    let config_path = config_path.or_else(Config::locate);
    let mut config = Config::load(config_path.as_deref())?;
    if let Some(url) = database {
        config.general.database_path = url;
    }

    init_tracing(&config.general.log_level);
    match &config_path {
        Some(path) => info!(path = %path.display(), "Loaded config"),
        None => info!("No config file found, using defaults"),
    }
    config.validate()?;

    let store = Store::new(&config.general.database_path).await?;
    let auth = SeaOrmAuthService::new(store.clone(), config.security.clone());

    let outcome = cli::execute(&auth, command, &mut Console::stdio()).await;

    store.close().await?;
    Ok(outcome?.exit_code())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // stderr, so log lines never mix with prompts and command output
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
