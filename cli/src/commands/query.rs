use anyhow::Context;
use ouidb_core::source::{self, RegistrySource};
use ouidb_core::update;
use ouidb_core::{LookupError, OuiDatabase, StaticDb};

use crate::terminal::print;

pub async fn query(db_arg: &str, macs: &[String]) -> anyhow::Result<()> {
    let source: Box<dyn RegistrySource> = source::source_from_arg(db_arg);
    let db: StaticDb = update::open_static(source.as_ref())
        .await
        .with_context(|| format!("opening registry from {}", source.describe()))?;

    print::header("lookup");
    for (idx, mac) in macs.iter().enumerate() {
        match db.query(mac) {
            Ok(record) => print::record_tree(idx, &record),
            Err(LookupError::NotFound) => print::not_found(idx, mac),
            Err(err) => return Err(err).with_context(|| format!("looking up '{mac}'")),
        }
    }
    print::fat_separator();

    Ok(())
}
