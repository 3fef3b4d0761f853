use std::collections::HashMap;
use std::io::BufRead;

use chrono::{DateTime, FixedOffset};
use ouidb_common::network::mac::AddressKey;
use ouidb_common::network::record::Record;

use crate::database::{LookupError, OuiDatabase, Snapshot};
use crate::registry::{self, RegistryError};

/// A database that cannot be updated, but exposes its underlying map.
#[derive(Debug, Clone, Default)]
pub struct StaticDb {
    snapshot: Snapshot,
}

impl StaticDb {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Reads a registry stream into a new database.
    pub fn open<R: BufRead>(reader: R) -> Result<Self, RegistryError> {
        registry::parse_registry(reader).map(Self::new)
    }

    /// Direct access to the records, for bulk reads.
    pub fn raw(&self) -> &HashMap<AddressKey, Record> {
        self.snapshot.records()
    }
}

impl OuiDatabase for StaticDb {
    fn lookup(&self, key: AddressKey) -> Result<Record, LookupError> {
        self.snapshot
            .get(&key)
            .cloned()
            .ok_or(LookupError::NotFound)
    }

    fn generated(&self) -> Option<DateTime<FixedOffset>> {
        self.snapshot.generated()
    }

    fn len(&self) -> usize {
        self.snapshot.len()
    }
}
