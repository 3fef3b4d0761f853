use std::net::SocketAddr;
use std::time::Duration;

/// Settings of the lookup service, resolved from the command line.
pub struct Config {
    /// Registry source: a file name, an `http(s)://` URL, or `http` for the IEEE registry.
    pub source: String,
    /// Address the HTTP service binds to.
    pub listen: SocketAddr,
    /// Indent JSON responses.
    pub pretty: bool,
    /// Interval between background reloads of the registry.
    ///
    /// `None` serves the registry loaded at startup for the whole run.
    pub update_every: Option<Duration>,
}
