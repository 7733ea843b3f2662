//! Schema migrations of the Eventmi database
//!
//! The Diesel migrations from `migrations/postgresql` are embedded into the binary, so the `serve`
//! command can refuse to start on an outdated schema and `migrate-db` can bring it up to date.
use crate::setup::get_database_url_from_env;
use diesel::migration::Migration;
use diesel::pg::PgConnection;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;
use std::fmt::{Debug, Display, Formatter};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/postgresql");

type MigrationResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync + 'static>>;

fn connect() -> MigrationResult<PgConnection> {
    Ok(PgConnection::establish(&get_database_url_from_env()?)?)
}

/// Apply all pending migrations to the database given by `DATABASE_URL`. The applied migrations
/// are reported on stdout.
pub fn run_migrations() -> MigrationResult<()> {
    let mut connection = connect()?;
    let mut harness = diesel_migrations::HarnessWithOutput::new(&mut connection, std::io::stdout());
    let applied = harness.run_pending_migrations(MIGRATIONS)?;
    info!("Applied {} database migrations", applied.len());
    Ok(())
}

#[derive(Debug)]
struct PendingMigrationsError {
    pending: Vec<String>,
}

impl Display for PendingMigrationsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "The database schema is outdated, run `eventmi migrate-db` first. Pending migrations: {}",
            self.pending.join(", ")
        )
    }
}

impl std::error::Error for PendingMigrationsError {}

/// Fail with a list of the pending migrations, if the database given by `DATABASE_URL` is not at
/// the latest schema version known to this binary.
pub fn check_migration_state() -> MigrationResult<()> {
    let mut connection = connect()?;
    let pending: Vec<String> = connection
        .pending_migrations(MIGRATIONS)?
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    if pending.is_empty() {
        Ok(())
    } else {
        Err(Box::new(PendingMigrationsError { pending }))
    }
}
