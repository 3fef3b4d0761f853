//! # Hardware Address Prefix
//!
//! Parsing and representation of the **Organizationally Unique Identifier**,
//! the first three bytes of a MAC address.
//!
//! Accepted input styles:
//! * Colon separated (e.g., `d0:df:9a` or a full `d0:df:9a:01:02:03`).
//! * Dash separated (e.g., `D0-DF-9A`).
//! * No separator (e.g., `D0DF9A` or `D0DF9A010203`).

use std::fmt;
use std::str::FromStr;

use pnet::util::MacAddr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const MIN_INPUT_LEN: usize = 6;
const PREFIX_LEN: usize = 3;

const LOCAL_BIT: u8 = 0x02;
const MULTICAST_BIT: u8 = 0x01;

/// The OUI part of a MAC address, in transmission bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AddressKey(pub [u8; 3]);

impl AddressKey {
    pub const fn new(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }

    pub fn octets(&self) -> [u8; 3] {
        self.0
    }

    /// Returns true if the prefix is in the "locally administered" segment.
    pub fn is_local(&self) -> bool {
        self.0[0] & LOCAL_BIT != 0
    }

    /// Returns true if the prefix is in the multicast segment.
    pub fn is_multicast(&self) -> bool {
        self.0[0] & MULTICAST_BIT != 0
    }
}

impl fmt::Display for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}:{:02x}:{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

impl FromStr for AddressKey {
    type Err = MacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_address(s)
    }
}

impl From<MacAddr> for AddressKey {
    fn from(mac: MacAddr) -> Self {
        Self([mac.0, mac.1, mac.2])
    }
}

impl Serialize for AddressKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AddressKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_address(text.trim()).map_err(serde::de::Error::custom)
    }
}

/// Returned when a MAC address cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid mac address '{mac}': {kind}")]
pub struct MacError {
    pub kind: MacErrorKind,
    /// The raw input, kept for diagnostics.
    pub mac: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MacErrorKind {
    #[error("mac address too short, should be at least 6 characters")]
    TooShort,
    #[error("unable to find at least 3 address elements")]
    TooFewElements,
    #[error("address element {index} ({element}) is not 2 characters")]
    ElementLength { index: usize, element: String },
    #[error("address element {index} ({element}) cannot be parsed as a hex value")]
    InvalidHex { index: usize, element: String },
}

impl MacError {
    fn new(kind: MacErrorKind, mac: &str) -> Self {
        Self {
            kind,
            mac: mac.to_string(),
        }
    }
}

/// Parses a textual MAC address and returns its first three bytes.
///
/// The separator is detected from the third character (`:` or `-`); if it is
/// neither, the input is read as an unseparated hex string. Elements beyond
/// the third (the host part of a full address) are ignored.
pub fn parse_address(mac: &str) -> Result<AddressKey, MacError> {
    let bytes: &[u8] = mac.as_bytes();
    if bytes.len() < MIN_INPUT_LEN {
        return Err(MacError::new(MacErrorKind::TooShort, mac));
    }

    let elements: Vec<&[u8]> = match bytes[2] {
        sep @ (b':' | b'-') => bytes.split(|b| *b == sep).collect(),
        _ => bytes.chunks_exact(2).collect(),
    };

    if elements.len() < PREFIX_LEN {
        return Err(MacError::new(MacErrorKind::TooFewElements, mac));
    }

    let mut key: [u8; 3] = [0; 3];
    for (idx, element) in elements.iter().take(PREFIX_LEN).enumerate() {
        key[idx] = decode_element(element, idx + 1, mac)?;
    }

    Ok(AddressKey(key))
}

fn decode_element(element: &[u8], index: usize, mac: &str) -> Result<u8, MacError> {
    let text = || String::from_utf8_lossy(element).into_owned();

    let [high, low] = element else {
        let kind = MacErrorKind::ElementLength { index, element: text() };
        return Err(MacError::new(kind, mac));
    };

    match (hex_value(*high), hex_value(*low)) {
        (Some(high), Some(low)) => Ok(high << 4 | low),
        _ => {
            let kind = MacErrorKind::InvalidHex { index, element: text() };
            Err(MacError::new(kind, mac))
        }
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    (digit as char).to_digit(16).map(|value| value as u8)
}
