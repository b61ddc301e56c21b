//! Create the initial admin account in the configured database.
//!
//! Runs the same seeding step the server performs at start-up: when the user
//! table holds any row (live or soft-deleted) nothing is written.
//!
//! # Examples
//! ```sh
//! ADMIN_USERNAME=root ADMIN_PASSWORD=changeme \
//!   cargo run --bin seed-admin -- --database-url postgres://localhost/registry
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use org_registry::domain::{AdminSeeder, SeedOutcome};
use org_registry::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig, run_migrations};
use org_registry::outbound::security::Argon2PasswordHasher;
use org_registry::settings::AppSettings;

/// `seed-admin` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-admin",
    about = "Create the initial admin account when the user table is empty",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn resolve_database_url(
    cli: Option<String>,
    settings: &AppSettings,
) -> Result<Zeroizing<String>> {
    cli.filter(|url| !url.trim().is_empty())
        .map(Zeroizing::new)
        .or_else(|| settings.database.url())
        .ok_or_else(|| eyre!("no database configured; pass --database-url or set DATABASE_URL"))
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
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(seed(args))
}

async fn seed(args: CliArgs) -> Result<()> {
    let program = std::env::args_os()
        .next()
        .unwrap_or_else(|| OsString::from("seed-admin"));
    let settings = AppSettings::load_from_iter([program]).wrap_err("load settings")?;
    let database_url = resolve_database_url(args.database_url, &settings)?;

    run_migrations(database_url.as_str())
        .await
        .wrap_err("apply migrations")?;
    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(1)
        .with_connection_timeout(settings.database.connect_timeout());
    let pool = DbPool::new(&config).await.wrap_err("create database pool")?;

    let seeder = AdminSeeder::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
        settings.admin.username(),
        settings.admin.password(),
    );
    match seeder.seed().await.wrap_err("seed admin account")? {
        SeedOutcome::Seeded => println!("Seeding complete!"),
        SeedOutcome::Skipped => println!("Cancelled seeding, table contains data."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn cli_url_wins_over_settings() {
        let mut settings = AppSettings::default();
        settings.database.url = Some("postgres://settings/db".to_owned());
        let url = resolve_database_url(Some("postgres://cli/db".to_owned()), &settings)
            .expect("url");
        assert_eq!(url.as_str(), "postgres://cli/db");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("  "))]
    fn settings_url_is_the_fallback(#[case] cli: Option<&str>) {
        let mut settings = AppSettings::default();
        settings.database.url = Some("postgres://settings/db".to_owned());
        let url = resolve_database_url(cli.map(str::to_owned), &settings).expect("url");
        assert_eq!(url.as_str(), "postgres://settings/db");
    }

    #[rstest]
    fn missing_url_is_an_error() {
        assert!(resolve_database_url(None, &AppSettings::default()).is_err());
    }
}
