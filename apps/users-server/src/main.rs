use anyhow::{Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use users::{UsersConfig, UsersModule};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Users Server - in-memory users CRUD over HTTP/JSON
#[derive(Parser)]
#[command(name = "users-server")]
#[command(about = "Users Server - in-memory users CRUD over HTTP/JSON")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config
        .logging
        .clone()
        .unwrap_or_else(runtime::config::default_logging_config);
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Users Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

fn ingress_config(config: &AppConfig) -> ApiIngressConfig {
    let mut ingress: ApiIngressConfig = config.module_config("api_ingress");
    ingress.bind_addr = config.bind_addr();
    if config.server.timeout_sec > 0 {
        ingress.request_timeout_sec = config.server.timeout_sec;
    }
    ingress
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");

    let users = UsersModule::new(config.module_config::<UsersConfig>("users"));
    let ingress = ApiIngress::new(ingress_config(&config));
    let router = ingress.build_router(users.register_rest(axum::Router::new()));

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = runtime::shutdown::wait_for_shutdown().await {
                tracing::error!(error = %e, "signal listener failed; shutting down");
            }
            cancel.cancel();
        });
    }

    ingress.serve(router, cancel).await?;
    tracing::info!("Users Server stopped");
    Ok(())
}

/// Strict variant of `AppConfig::module_config`: report invalid sections instead of defaulting.
fn validate_section<T: DeserializeOwned>(config: &AppConfig, name: &str) -> Result<()> {
    if let Some(raw) = config.modules.get(name) {
        serde_json::from_value::<T>(raw.clone())
            .with_context(|| format!("Invalid configuration for module '{name}'"))?;
    }
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    validate_section::<UsersConfig>(&config, "users")?;
    validate_section::<ApiIngressConfig>(&config, "api_ingress")?;
    for name in config.modules.keys() {
        if !matches!(name.as_str(), "users" | "api_ingress") {
            tracing::warn!(module = %name, "configuration section for unknown module is ignored");
        }
    }

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}
