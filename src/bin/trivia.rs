use anyhow::Context;
use clap::Parser;
use trivia_api::config::Settings;
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::server::app::run_server;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Do not apply pending migrations before serving
    #[clap(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load configuration")?;
    let pool = establish_connection(&settings.database)
        .await
        .with_context(|| format!("Cannot open database {}", settings.database.path))?;

    if !cli.skip_migrations {
        tracing::info!("Running db migrations...");
        run_migrations(&pool).await?;
    }

    run_server(pool, &settings).await
}
