use std::io::BufRead;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use ouidb_common::network::mac::AddressKey;
use ouidb_common::network::record::Record;
use parking_lot::RwLock;

use crate::database::{LookupError, OuiDatabase, Snapshot, Updater};
use crate::registry::{self, RegistryError};

/// A database that can be safely updated while queries are running.
///
/// The active snapshot sits behind an `Arc`. Readers hold the shared lock
/// only for a single map access; [`Updater::replace`] holds the exclusive
/// lock only for the pointer swap.
#[derive(Debug, Default)]
pub struct DynamicDb {
    active: RwLock<Arc<Snapshot>>,
}

impl DynamicDb {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            active: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Reads a registry stream into a new database.
    pub fn open<R: BufRead>(reader: R) -> Result<Self, RegistryError> {
        registry::parse_registry(reader).map(Self::new)
    }

    /// Pins the current generation.
    ///
    /// Use this when several lookups must be answered from the same data;
    /// later replacements do not affect the returned snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.active.read())
    }
}

impl OuiDatabase for DynamicDb {
    fn lookup(&self, key: AddressKey) -> Result<Record, LookupError> {
        let record: Option<Record> = self.active.read().get(&key).cloned();
        record.ok_or(LookupError::NotFound)
    }

    fn generated(&self) -> Option<DateTime<FixedOffset>> {
        self.active.read().generated()
    }

    fn len(&self) -> usize {
        self.active.read().len()
    }
}

impl Updater for DynamicDb {
    fn replace(&self, snapshot: Snapshot) {
        let incoming: Arc<Snapshot> = Arc::new(snapshot);
        let previous: Arc<Snapshot> = std::mem::replace(&mut *self.active.write(), incoming);
        // the old generation is released outside the lock
        drop(previous);
    }

    fn upsert(&self, record: Record) {
        let mut active = self.active.write();
        Arc::make_mut(&mut *active)
            .records
            .insert(record.prefix(), record);
    }

    fn remove(&self, key: AddressKey) {
        let mut active = self.active.write();
        if active.records.contains_key(&key) {
            Arc::make_mut(&mut *active).records.remove(&key);
        }
    }
}
