//! The in-memory OUI database.
//!
//! A [`Snapshot`] is one complete generation of the registry. It is served
//! either by a [`StaticDb`], which owns a single snapshot for its whole
//! lifetime, or by a [`DynamicDb`], whose active snapshot can be replaced
//! while queries are running.
//!
//! Both implement the read capability [`OuiDatabase`]. Only [`DynamicDb`]
//! implements [`Updater`].

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use ouidb_common::network::mac::{self, AddressKey, MacError};
use ouidb_common::network::record::Record;
use thiserror::Error;

mod dynamic_db;
mod static_db;

pub use dynamic_db::DynamicDb;
pub use static_db::StaticDb;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The query was well formed but the prefix is not in the database.
    #[error("not found in db")]
    NotFound,
    #[error(transparent)]
    InvalidMac(#[from] MacError),
}

/// One generation of the registry: records keyed by prefix and the time the
/// registry file was generated, when it said so.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub(crate) records: HashMap<AddressKey, Record>,
    pub(crate) generated: Option<DateTime<FixedOffset>>,
}

impl Snapshot {
    pub fn new(
        records: HashMap<AddressKey, Record>,
        generated: Option<DateTime<FixedOffset>>,
    ) -> Self {
        Self { records, generated }
    }

    pub fn get(&self, key: &AddressKey) -> Option<&Record> {
        self.records.get(key)
    }

    pub fn records(&self) -> &HashMap<AddressKey, Record> {
        &self.records
    }

    pub fn generated(&self) -> Option<DateTime<FixedOffset>> {
        self.generated
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let records = iter
            .into_iter()
            .map(|record| (record.prefix(), record))
            .collect();
        Self::new(records, None)
    }
}

/// Query access shared by every database flavour.
pub trait OuiDatabase: Send + Sync {
    /// Looks up a prefix.
    ///
    /// # Returns
    /// * `Ok(Record)` - A copy of the stored record.
    /// * `Err(LookupError::NotFound)` - If the prefix is unknown.
    fn lookup(&self, key: AddressKey) -> Result<Record, LookupError>;

    /// Returns the generation time of the database, if the registry had one.
    fn generated(&self) -> Option<DateTime<FixedOffset>>;

    /// Number of records currently served.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parses a textual MAC address and looks up its prefix.
    ///
    /// Malformed input yields `LookupError::InvalidMac`, so a bad query can
    /// be told apart from a prefix without data.
    fn query(&self, mac: &str) -> Result<Record, LookupError> {
        let key: AddressKey = mac::parse_address(mac)?;
        self.lookup(key)
    }
}

/// Write access, available on databases that can be updated while queries
/// are running.
pub trait Updater {
    /// Swaps in a new generation. The previous one stays intact for readers
    /// still holding it.
    fn replace(&self, snapshot: Snapshot);

    /// Adds or overwrites a single record under its own prefix.
    fn upsert(&self, record: Record);

    /// Removes a single record. Does nothing if the prefix is absent.
    fn remove(&self, key: AddressKey);
}
