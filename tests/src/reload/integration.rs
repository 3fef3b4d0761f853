#![cfg(test)]
use std::io::Write;

use ouidb_common::network::mac::AddressKey;
use ouidb_core::source::{FileSource, RegistrySource, SourceError};
use ouidb_core::update::{self, UpdateError};
use ouidb_core::{DynamicDb, LookupError, OuiDatabase, StaticDb};
use tempfile::NamedTempFile;

const SAMPLE: &str = include_str!("../../data/sample_oui.txt");

fn registry_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("creating temp registry");
    file.write_all(content.as_bytes()).expect("writing temp registry");
    file
}

/// Parses the IEEE-style sample and checks every record it holds.
#[test]
fn sample_registry_round_trip() {
    let db: StaticDb = StaticDb::open(SAMPLE.as_bytes()).unwrap();

    assert_eq!(db.len(), 4);
    let generated = db.generated().expect("sample has a generation time");
    assert_eq!(generated.timestamp(), 1_443_895_982);
    assert_eq!(generated.offset().local_minus_utc(), -4 * 3600);

    let liteon = db.query("D0-DF-9A-11-22-33").unwrap();
    assert_eq!(liteon.manufacturer(), "Liteon Technology Corporation");
    assert_eq!(liteon.address(), ["4F, 90, Chien 1 Road", "New Taipei  23585", "TW"]);
    assert_eq!(liteon.country(), "TW");

    let local = db.lookup(AddressKey::new([0x02, 0x00, 0x00])).unwrap();
    assert!(local.is_local());
    assert!(!local.is_multicast());
    assert!(local.address().is_empty());

    for (key, record) in db.raw() {
        assert_eq!(record.prefix(), *key);
    }
}

#[tokio::test]
async fn open_and_reload_from_file() {
    let file = registry_file(SAMPLE);
    let source = FileSource::new(file.path());

    let db: DynamicDb = update::open_dynamic(&source).await.unwrap();
    assert_eq!(db.len(), 4);

    let update_file = registry_file("00-60-93\t\tVarian Associates\n\tUS\n");
    let update_source = FileSource::new(update_file.path());
    update::reload_from(&db, &update_source).await.unwrap();

    assert_eq!(db.len(), 1);
    assert_eq!(db.query("00:60:93").unwrap().manufacturer(), "Varian Associates");
    assert_eq!(db.query("00:60:94"), Err(LookupError::NotFound));
    assert_eq!(db.generated(), None);
}

#[tokio::test]
async fn failed_reload_keeps_serving_previous_data() {
    let db: DynamicDb = DynamicDb::open(SAMPLE.as_bytes()).unwrap();
    let before = db.query("00-60-94").unwrap();

    // cut off in the middle of a record header
    let cut: usize = SAMPLE.find("D0-DF-9A").unwrap() + "D0-DF".len();
    let truncated = registry_file(&SAMPLE[..cut]);
    let result = update::reload_from(&db, &FileSource::new(truncated.path())).await;
    assert!(matches!(result, Err(UpdateError::Registry(_))), "{result:?}");

    let missing = FileSource::new(truncated.path().with_extension("missing"));
    let result = update::reload_from(&db, &missing).await;
    assert!(matches!(result, Err(UpdateError::Source(SourceError::Io(_)))), "{result:?}");

    assert_eq!(db.query("00-60-94").unwrap(), before);
    assert_eq!(db.len(), 4);
    assert!(db.generated().is_some());
}

#[tokio::test]
async fn reloading_identical_streams_is_idempotent() {
    let file = registry_file(SAMPLE);
    let source = FileSource::new(file.path());

    let once: DynamicDb = update::open_dynamic(&source).await.unwrap();
    let twice: DynamicDb = update::open_dynamic(&source).await.unwrap();
    update::reload_from(&twice, &source).await.unwrap();

    assert_eq!(*once.snapshot().records(), *twice.snapshot().records());
    assert_eq!(once.generated(), twice.generated());
    for mac in ["00-60-94", "D0:DF:9A", "006093", "02:00:00", "ff:ff:ff"] {
        assert_eq!(once.query(mac), twice.query(mac), "mac: {mac}");
    }
}

#[tokio::test]
async fn static_open_describes_source() {
    let file = registry_file(SAMPLE);
    let source = FileSource::new(file.path());
    assert!(source.describe().starts_with("file "));

    let db = update::open_static(&source).await.unwrap();
    assert_eq!(db.query("00-60-93-98-02-01").unwrap().country(), "US");
}
