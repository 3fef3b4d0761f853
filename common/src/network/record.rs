use std::fmt;

use serde::Serialize;

use crate::network::mac::AddressKey;

/// A manufacturer entry of the OUI registry.
///
/// Country and the local/multicast flags are derived from the address
/// lines and the prefix when the record is built, and never change after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    manufacturer: String,
    address: Vec<String>,
    prefix: AddressKey,
    #[serde(skip_serializing_if = "String::is_empty")]
    country: String,
    #[serde(skip_serializing_if = "is_false")]
    local: bool,
    #[serde(skip_serializing_if = "is_false")]
    multicast: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl Record {
    pub fn new(prefix: AddressKey, manufacturer: impl Into<String>, address: Vec<String>) -> Self {
        let country: String = address.last().cloned().unwrap_or_default();
        Self {
            manufacturer: manufacturer.into(),
            address,
            prefix,
            country,
            local: prefix.is_local(),
            multicast: prefix.is_multicast(),
        }
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    /// Address lines, top to bottom as listed in the registry.
    pub fn address(&self) -> &[String] {
        &self.address
    }

    pub fn prefix(&self) -> AddressKey {
        self.prefix
    }

    /// The last address line, or an empty string when there is none.
    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn is_local(&self) -> bool {
        self.local
    }

    pub fn is_multicast(&self) -> bool {
        self.multicast
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = vec![
            format!("Prefix: {}", self.prefix),
            format!("Manufacturer: {}", self.manufacturer),
        ];
        if !self.address.is_empty() {
            lines.push("Address:".to_string());
            lines.push(format!("\t{}", self.address.join("\n\t")));
        }
        if self.local {
            lines.push("* Locally Administered".to_string());
        }
        if self.multicast {
            lines.push("* Multicast".to_string());
        }
        write!(f, "{}", lines.join("\n"))
    }
}
