//! OUI registry parsing and the in-memory lookup database.

pub mod database;
pub mod registry;
pub mod source;
pub mod update;
pub mod vendors;

pub use database::{DynamicDb, LookupError, OuiDatabase, Snapshot, StaticDb, Updater};
