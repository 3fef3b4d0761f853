pub mod dump;
pub mod query;
pub mod serve;

use std::net::SocketAddr;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ouidb")]
#[command(about = "Look up MAC address manufacturers in the IEEE OUI registry.")]
pub struct CommandLine {
    /// Registry to open: a file, an http(s) URL, or "http" for the IEEE registry
    #[arg(long, global = true, default_value = "oui.txt")]
    pub db: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up the manufacturer of one or more MAC addresses
    #[command(alias = "q")]
    Query {
        #[arg(required = true)]
        macs: Vec<String>,
    },
    /// Print every record of the registry
    #[command(alias = "d")]
    Dump,
    /// Serve lookups over HTTP
    #[command(alias = "s")]
    Serve {
        /// Listen address and port, for instance 127.0.0.1:5000
        #[arg(long, default_value = "0.0.0.0:5000")]
        listen: SocketAddr,
        /// Format responses with newlines and indentation
        #[arg(long)]
        pretty: bool,
        /// Seconds between reloads of the registry
        #[arg(long, value_name = "SECS")]
        update_every: Option<u64>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
