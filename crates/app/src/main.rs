use std::{process::ExitCode, time::Duration};

use clap::Parser;
use engine::{Ledger, SqliteStore};
use migration::{Migrator, MigratorTrait};
use settings::Database;

use crate::{
    cli::Cli,
    error::Result,
    rate::start_refresh,
};

mod cli;
mod commands;
mod error;
mod rate;
mod settings;
mod view;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = settings::Settings::new(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "budget={level},engine={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let db = parse_database(&settings.database).await?;
    let mut ledger = Ledger::builder(SqliteStore::new(db)).build().await?;

    let refresh = match cli.rate.or(settings.rate.fixed) {
        Some(fixed) => {
            ledger.set_rate(fixed)?;
            None
        }
        None if cli.offline => None,
        None => start_refresh(
            &settings.rate.url,
            Duration::from_secs(settings.rate.timeout_secs),
            ledger.rate_handle(),
        ),
    };

    // Bounded by the client timeout.
    if let Some(handle) = refresh
        && cli.command.uses_rate()
        && let Err(err) = handle.await
    {
        tracing::warn!("rate refresh task failed: {err}");
    }

    let output = commands::run(&mut ledger, cli.command).await?;
    println!("{output}");
    Ok(())
}

async fn parse_database(config: &Database) -> Result<sea_orm::DatabaseConnection> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    tracing::debug!("opening {url}");
    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
