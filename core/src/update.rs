//! # Update Orchestrator
//!
//! Builds a new generation off to the side and swaps it in only once it is
//! complete. While a reload is parsing, the database keeps serving the
//! previous generation; if the reload fails, nothing changes.

use std::io::BufRead;

use thiserror::Error;
use tracing::info;

use crate::database::{DynamicDb, OuiDatabase, Snapshot, StaticDb, Updater};
use crate::registry::{self, RegistryError};
use crate::source::{RegistrySource, SourceError};

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("registry parser task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Reads and replaces the content of the database.
///
/// If reading or parsing fails the error is returned and the database keeps
/// its current content.
pub fn reload<U, R>(db: &U, reader: R) -> Result<(), RegistryError>
where
    U: Updater + ?Sized,
    R: BufRead,
{
    let snapshot: Snapshot = registry::parse_registry(reader)?;
    db.replace(snapshot);
    Ok(())
}

/// Fetches a source and parses it on the blocking pool.
async fn fetch_snapshot(source: &dyn RegistrySource) -> Result<Snapshot, UpdateError> {
    let bytes: Vec<u8> = source.fetch().await?;
    let snapshot = tokio::task::spawn_blocking(move || registry::parse_registry(bytes.as_slice()))
        .await??;
    Ok(snapshot)
}

fn log_loaded(db: &dyn OuiDatabase, origin: &str) {
    match db.generated() {
        Some(time) => info!(
            "Loaded {} records from {origin}, generated at {}",
            db.len(),
            time.to_rfc2822()
        ),
        None => info!("Loaded {} records from {origin}", db.len()),
    }
}

/// Opens a database that cannot be updated.
pub async fn open_static(source: &dyn RegistrySource) -> Result<StaticDb, UpdateError> {
    let db = StaticDb::new(fetch_snapshot(source).await?);
    log_loaded(&db, &source.describe());
    Ok(db)
}

/// Opens a database that can later be refreshed with [`reload_from`].
pub async fn open_dynamic(source: &dyn RegistrySource) -> Result<DynamicDb, UpdateError> {
    let db = DynamicDb::new(fetch_snapshot(source).await?);
    log_loaded(&db, &source.describe());
    Ok(db)
}

/// Downloads a fresh registry and swaps it into `db`.
///
/// All or nothing: a fetch or parse failure leaves `db` serving the data it
/// had before.
pub async fn reload_from(db: &DynamicDb, source: &dyn RegistrySource) -> Result<(), UpdateError> {
    let origin: String = source.describe();
    info!("Updating database from {origin}");

    let snapshot: Snapshot = fetch_snapshot(source).await?;
    db.replace(snapshot);

    log_loaded(db, &origin);
    Ok(())
}
