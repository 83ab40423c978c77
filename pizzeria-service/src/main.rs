use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use pizzeria_service::{config::Config, db, seed};

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations and serve the HTTP API
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Replace all data with a small sample data set
    Seed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Serve => pizzeria_service::serve(&cli.config).await,
        Commands::Migrate => {
            let pool = db::establish_pool(&cli.config.database_url, cli.config.pool_size)?;
            db::run_migrations(&pool)
        }
        Commands::Seed => {
            let pool = db::establish_pool(&cli.config.database_url, cli.config.pool_size)?;
            db::run_migrations(&pool)?;
            let mut conn = pool.get()?;
            seed::run(&mut conn)?;
            Ok(())
        }
    }
}
