use clap::{Parser, Subcommand};
use migration::Migrator;
use sea_orm::Database;
use sea_orm_migration::prelude::MigratorTrait;

#[derive(Parser, Debug)]
#[command(name = "migration")]
#[command(about = "Apply or roll back the budget database schema")]
struct Cli {
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./budget.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Default)]
enum Command {
    /// Apply pending migrations.
    #[default]
    Up,
    /// Roll back the last migration.
    Down,
    /// Drop everything and apply all migrations again.
    Fresh,
    /// Show applied and pending migrations.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url).await?;

    match cli.command.unwrap_or_default() {
        Command::Up => Migrator::up(&db, None).await?,
        Command::Down => Migrator::down(&db, Some(1)).await?,
        Command::Fresh => Migrator::fresh(&db).await?,
        Command::Status => Migrator::status(&db).await?,
    }

    Ok(())
}
