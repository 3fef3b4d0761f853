#![cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use ouidb_common::network::mac::AddressKey;
use ouidb_common::network::record::Record;
use ouidb_core::{DynamicDb, OuiDatabase, Snapshot, Updater};

const KEYS: u8 = 32;
const GENERATIONS: usize = 50;
const READERS: usize = 8;

fn key(idx: u8) -> AddressKey {
    AddressKey::new([0x00, 0x60, idx])
}

/// Every record of a generation carries the generation number as its manufacturer.
fn generation(number: usize) -> Snapshot {
    (0..KEYS)
        .map(|idx| Record::new(key(idx), number.to_string(), Vec::new()))
        .collect()
}

fn generation_of(record: &Record) -> usize {
    record.manufacturer().parse().expect("manufacturer is a generation number")
}

/// Lookups racing with replacements are each answered from one generation,
/// and a reader never goes back to an older generation.
#[test]
fn lookups_never_mix_generations() {
    let db = DynamicDb::new(generation(0));
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        for reader in 0..READERS {
            let db = &db;
            let done = &done;
            scope.spawn(move || {
                let mut last_seen: usize = 0;
                let mut idx: u8 = reader as u8;
                loop {
                    let finished: bool = done.load(Ordering::Acquire);

                    let record = db.lookup(key(idx % KEYS)).expect("every generation has all keys");
                    let seen: usize = generation_of(&record);
                    assert!(seen >= last_seen, "reader went back from {last_seen} to {seen}");
                    last_seen = seen;

                    let pinned = db.snapshot();
                    let first: usize = generation_of(pinned.get(&key(0)).unwrap());
                    assert!(first >= last_seen);
                    assert!(pinned.records().values().all(|r| generation_of(r) == first));
                    last_seen = first;

                    if finished {
                        assert_eq!(last_seen, GENERATIONS);
                        break;
                    }
                    idx = idx.wrapping_add(1);
                }
            });
        }

        for number in 1..=GENERATIONS {
            db.replace(generation(number));
        }
        done.store(true, Ordering::Release);
    });
}

/// Single entry edits racing with readers leave every record fully formed.
#[test]
fn single_entry_edits_under_readers() {
    let db = DynamicDb::new(generation(0));
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..READERS {
            let db = &db;
            let done = &done;
            scope.spawn(move || {
                while !done.load(Ordering::Acquire) {
                    for idx in 0..KEYS {
                        if let Ok(record) = db.lookup(key(idx)) {
                            assert_eq!(record.prefix(), key(idx));
                        }
                    }
                }
            });
        }

        for idx in 0..KEYS {
            db.remove(key(idx));
            db.upsert(Record::new(key(idx), "1", vec!["US".into()]));
        }
        done.store(true, Ordering::Release);
    });

    assert_eq!(db.len(), KEYS as usize);
    assert!(db.snapshot().records().values().all(|r| r.country() == "US"));
}
