//! Apply the social schema migrations and inspect stored users.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use social_schema::config::SchemaSettings;
use social_schema::domain::UserId;
use social_schema::domain::ports::UserRepository;
use social_schema::outbound::persistence::{DbPool, DieselUserRepository, run_pending_migrations};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `social-schema` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "social-schema",
    about = "Manage the social schema database",
    version
)]
struct CliArgs {
    /// Database connection URL. Overrides `SOCIAL_SCHEMA_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url", global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Run every pending embedded migration.
    Apply,
    /// Print the public JSON view of one user.
    ShowUser {
        /// Identifier of the user to print.
        id: i32,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = load_settings(args.database_url)?;
    match args.command {
        Command::Apply => apply(&settings),
        Command::ShowUser { id } => {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .wrap_err("failed to build Tokio runtime")?;
            let json = runtime.block_on(show_user(&settings, UserId::new(id)))?;
            println!("{json}");
            Ok(())
        }
    }
}

/// Load settings from the environment and files, letting the CLI flag win.
fn load_settings(database_url: Option<String>) -> Result<SchemaSettings> {
    let mut settings = SchemaSettings::load_from_iter([OsString::from("social-schema")])
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    if database_url.is_some() {
        settings.database_url = database_url;
    }
    Ok(settings)
}

fn apply(settings: &SchemaSettings) -> Result<()> {
    let applied = run_pending_migrations(settings.database_url()?)
        .wrap_err("migration run failed")?;
    info!(count = applied.len(), "migrations complete");
    Ok(())
}

async fn show_user(settings: &SchemaSettings, id: UserId) -> Result<String> {
    let pool = DbPool::new(settings.pool_config()?)
        .await
        .wrap_err("failed to create database pool")?;
    let users = DieselUserRepository::new(pool);
    let user = users
        .find_by_id(id)
        .await
        .wrap_err("user lookup failed")?
        .ok_or_else(|| eyre!("user {id} does not exist"))?;
    serde_json::to_string(&user.serialize()).wrap_err("failed to encode user")
}
