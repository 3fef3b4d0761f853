//! Where registry bytes come from.
//!
//! A source only delivers the raw registry text; parsing and swapping are
//! the job of [`crate::update`].

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// The public IEEE MA-L registry.
pub const IEEE_OUI_URL: &str = "http://standards-oui.ieee.org/oui.txt";

/// Raised when the registry could not be fetched.
///
/// The underlying I/O or HTTP error is kept as is.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Reads the complete registry into memory.
    async fn fetch(&self) -> Result<Vec<u8>, SourceError>;

    /// Human readable origin, for logs.
    fn describe(&self) -> String;
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RegistrySource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        Ok(tokio::fs::read(&self.path).await?)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl RegistrySource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Picks a source from a command line value.
///
/// * `http` - the IEEE registry.
/// * `http://...` / `https://...` - that URL.
/// * anything else - a file path.
pub fn source_from_arg(arg: &str) -> Box<dyn RegistrySource> {
    match arg {
        "http" => Box::new(HttpSource::new(IEEE_OUI_URL)),
        url if url.starts_with("http://") || url.starts_with("https://") => {
            Box::new(HttpSource::new(url))
        }
        path => Box::new(FileSource::new(path)),
    }
}
