use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cleaning_automation_hub::{
    cli::{execute_command, Cli, Commands},
    config::{Config, LogFormat},
    server::{AppState, McpServer},
    Dashboard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Cleaning Automation Hub starting..."
    );

    // Load the catalog
    let catalog = match config.load_catalog() {
        Ok(c) => {
            info!(
                source = %config
                    .catalog
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "builtin".to_string()),
                records = c.total_count(),
                "Catalog ready"
            );
            c
        }
        Err(e) => {
            error!(error = %e, "Failed to load catalog");
            return Err(e.into());
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let mut server = McpServer::new(AppState::new(config, catalog));

            info!("Server ready, waiting for requests on stdin...");

            if let Err(e) = server.run().await {
                error!(error = %e, "Server error");
                return Err(e.into());
            }

            info!("Server shutdown complete");
        }
        command => {
            let dashboard = Dashboard::from_config(Arc::new(catalog), &config);
            let result = execute_command(command, &dashboard, &config);
            if result.exit_code == 0 {
                print!("{}", result.message);
            } else {
                eprintln!("{}", result.message);
                std::process::exit(result.exit_code);
            }
        }
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
