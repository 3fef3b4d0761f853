use std::time::Instant;

use anyhow::Context;
use ouidb_common::network::mac::AddressKey;
use ouidb_common::network::record::Record;
use ouidb_core::source::{self, RegistrySource};
use ouidb_core::update;
use ouidb_core::{OuiDatabase, StaticDb};
use tracing::info;

pub async fn dump(db_arg: &str) -> anyhow::Result<()> {
    let source: Box<dyn RegistrySource> = source::source_from_arg(db_arg);
    let db: StaticDb = update::open_static(source.as_ref())
        .await
        .with_context(|| format!("opening registry from {}", source.describe()))?;

    let start_time: Instant = Instant::now();
    let mut records: Vec<(&AddressKey, &Record)> = db.raw().iter().collect();
    records.sort_unstable_by_key(|(key, _)| **key);

    for (_, record) in &records {
        println!("{record}\n");
    }

    let generated: String = db
        .generated()
        .map(|time| time.to_rfc2822())
        .unwrap_or_else(|| "an unknown time".to_string());
    info!(
        "Printed {} entries in {:.2}s, registry generated at {generated}",
        db.len(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
