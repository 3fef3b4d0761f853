mod commands;
mod terminal;

use std::time::Duration;

use commands::{CommandLine, Commands, dump, query, serve};
use ouidb_common::config::Config;
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    match commands.command {
        Commands::Query { macs } => query::query(&commands.db, &macs).await,
        Commands::Dump => dump::dump(&commands.db).await,
        Commands::Serve {
            listen,
            pretty,
            update_every,
        } => {
            let cfg = Config {
                source: commands.db,
                listen,
                pretty,
                update_every: update_every.map(Duration::from_secs),
            };
            serve::serve(&cfg).await
        }
    }
}
