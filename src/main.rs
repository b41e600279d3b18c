use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use hireboard_analytics::analytics::AnalyticsService;
use hireboard_analytics::seed::seed_demo_data;
use hireboard_analytics::{start_web_server, EnvironmentConfig, SqliteStore};

#[derive(Parser)]
#[command(name = "hireboard")]
#[command(about = "Company analytics engine for the job marketplace")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the analytics API server
    Serve,
    /// Seed demo data into the configured record store
    Seed,
    /// Print the assembled dashboard for a company as JSON
    Dashboard { company_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hireboard_analytics=info,rocket::server=off")),
        )
        .init();

    let config = EnvironmentConfig::load()?;
    config.ensure_directories().await?;

    match Cli::parse().command {
        Command::Serve => start_web_server(config.database_path, config.port).await,
        Command::Seed => {
            let store = SqliteStore::new(&config.database_path).await?;
            seed_demo_data(&store).await
        }
        Command::Dashboard { company_id } => {
            let store = Arc::new(SqliteStore::new(&config.database_path).await?);
            let service = AnalyticsService::new(store);
            let dashboard = service.company_dashboard(&company_id).await?;
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
            Ok(())
        }
    }
}
