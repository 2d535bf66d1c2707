use clap::{Parser, Subcommand};
use core_config::{Environment, tracing::{init_tracing, install_color_eyre}};
use database::postgres::{
    DatabasePrefix, PoolManager, migration_status, rollback_migrations, run_migrations,
};
use migration::Migrator;
use tracing::info;

/// Apply or inspect the chatbot schema on the SERVICE_DB database
#[derive(Debug, Parser)]
#[command(name = "migration", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply all pending migrations (default)
    Up,
    /// Roll back applied migrations
    Down {
        /// Number of migrations to roll back
        #[arg(short = 'n', long, default_value_t = 1)]
        steps: u32,
    },
    /// Show the applied/pending state of every migration
    Status,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let cli = Cli::parse();
    let manager = PoolManager::new(DatabasePrefix::ServiceDb);
    let pool = manager.pool()?;

    let result = match cli.command.unwrap_or(Command::Up) {
        Command::Up => run_migrations::<Migrator>(&pool, "chatbot").await,
        Command::Down { steps } => rollback_migrations::<Migrator>(&pool, Some(steps)).await,
        Command::Status => migration_status::<Migrator>(&pool).await,
    };

    manager.close().await;
    result?;
    info!("Done");
    Ok(())
}
