//! # Registry Parser
//!
//! Reads the IEEE `oui.txt` format into a [`Snapshot`].
//!
//! The format is line oriented and tab separated:
//!
//! ```text
//! Generated: Sat, 3 Oct 2015 14:13:02 -0400
//! D0-DF-9A   (hex)		Liteon Technology Corporation
//! D0DF9A     (base 16)		Liteon Technology Corporation
//! 				4F, 90, Chien 1 Road
//! 				New Taipei  23585
//! 				TW
//! ```
//!
//! A record starts on a line whose first field holds a MAC-like token; its
//! manufacturer is the last field of that line. The tab-indented lines that
//! follow are its address, the last one being the country.

use std::collections::HashMap;
use std::io::{self, BufRead};
use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, Weekday};
use ouidb_common::network::mac::{self, AddressKey, MacError};
use ouidb_common::network::record::Record;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::database::Snapshot;

const GENERATED_PREFIX: &str = "Generated: ";
const GENERATED_FORMAT: &str = "%d %b %Y %H:%M:%S %z";
const ADDRESS_TRIM: &[char] = &['\t', ' ', '\r', '\n'];

static PREFIX_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Two to six hex pairs joined by `:` or `-`, with an optional `/N` suffix.
fn prefix_pattern() -> &'static Regex {
    PREFIX_PATTERN.get_or_init(|| {
        Regex::new(r"((?:[0-9A-Fa-f]{2}[-:]){1,5}[0-9A-Fa-f]{2})(?:/(\w{1,2}))?")
            .expect("prefix pattern is a valid regex")
    })
}

#[derive(Debug, Error)]
pub enum RegistryError {
    /// A record header carried a prefix that could not be decoded.
    ///
    /// Aborts the whole parse. `generated` holds the generation time seen
    /// before the failing line, if any.
    #[error("registry line {line}: {source}")]
    InvalidPrefix {
        line: usize,
        source: MacError,
        generated: Option<DateTime<FixedOffset>>,
    },
    /// Reading the underlying stream failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// What the outer scan does with a line.
enum LineKind<'a> {
    Skip,
    Generated(&'a str),
    Header(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() || line.starts_with('#') {
        return LineKind::Skip;
    }

    let first: &str = line.split('\t').next().unwrap_or_default();
    if let Some(text) = first.trim().strip_prefix(GENERATED_PREFIX) {
        return LineKind::Generated(text);
    }

    match prefix_pattern().captures(first).and_then(|caps| caps.get(1)) {
        Some(token) => LineKind::Header(token.as_str()),
        None => LineKind::Skip,
    }
}

/// Parses `<weekday>, <day> <month> <year> <hh>:<mm>:<ss> <±zzzz>`.
///
/// The weekday must be a valid name but is not checked against the date.
fn parse_generated(text: &str) -> Option<DateTime<FixedOffset>> {
    let (weekday, rest) = text.trim().split_once(", ")?;
    weekday.parse::<Weekday>().ok()?;
    DateTime::parse_from_str(rest.trim(), GENERATED_FORMAT).ok()
}

/// Yields numbered lines with the line terminator removed.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    number: usize,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            number: 0,
        }
    }

    fn next_line(&mut self) -> io::Result<Option<(usize, String)>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.number += 1;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }

        Ok(Some((self.number, String::from_utf8_lossy(&self.buf).into_owned())))
    }
}

/// Parses a complete registry stream.
///
/// Nothing is shared until the stream has been read to the end, so a failure
/// leaves no partial result behind. Later entries for the same prefix replace
/// earlier ones.
pub fn parse_registry<R: BufRead>(reader: R) -> Result<Snapshot, RegistryError> {
    let mut lines = LineReader::new(reader);
    let mut records: HashMap<AddressKey, Record> = HashMap::new();
    let mut generated: Option<DateTime<FixedOffset>> = None;
    let mut pending: Option<(usize, String)> = None;

    loop {
        let (number, line) = match pending.take() {
            Some(line) => line,
            None => match lines.next_line()? {
                Some(line) => line,
                None => break,
            },
        };

        let token: &str = match classify(&line) {
            LineKind::Skip => continue,
            LineKind::Generated(text) => {
                match parse_generated(text) {
                    Some(time) => generated = Some(time),
                    None => debug!("Ignoring unparsable generation time on line {number}: {text}"),
                }
                continue;
            }
            LineKind::Header(token) => token,
        };

        let prefix: AddressKey = mac::parse_address(token).map_err(|source| {
            RegistryError::InvalidPrefix {
                line: number,
                source,
                generated,
            }
        })?;
        let manufacturer: &str = line.rsplit('\t').next().unwrap_or_default();

        let mut address: Vec<String> = Vec::new();
        while let Some((next_number, text)) = lines.next_line()? {
            if text.len() < 2 {
                break;
            }
            if !text.starts_with('\t') {
                // Lines the outer scan would skip anyway (such as the
                // "(base 16)" companion line) do not end the address block.
                if matches!(classify(&text), LineKind::Skip) {
                    continue;
                }
                pending = Some((next_number, text));
                break;
            }
            address.push(text.trim_matches(ADDRESS_TRIM).to_string());
        }

        records.insert(prefix, Record::new(prefix, manufacturer, address));
    }

    debug!("Parsed {} registry records", records.len());
    Ok(Snapshot::new(records, generated))
}
