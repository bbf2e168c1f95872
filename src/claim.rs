//! Bot identity claims.
//!
//! Upstream callers forward a single header value of the form `"<name>|<ip>"`,
//! e.g. `"Googlebot|66.249.66.1"`. Parsing never fails: a malformed value
//! produces a claim that is simply not well-formed, and the verifier rejects
//! it before doing any I/O.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separator between the bot name and the source IP.
pub const CLAIM_DELIMITER: char = '|';

/// A bot identity as asserted by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BotClaim {
    /// Claimed bot name (e.g. "Googlebot")
    pub name: String,
    /// Claimed source address, kept as an opaque string
    pub source_ip: String,
}

impl BotClaim {
    pub fn new(name: impl Into<String>, source_ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_ip: source_ip.into(),
        }
    }

    /// Parse a raw `"<name>|<ip>"` value, splitting on the first delimiter.
    ///
    /// A value without a delimiter yields an empty `source_ip`.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(CLAIM_DELIMITER) {
            Some((name, ip)) => Self::new(name, ip),
            None => Self::new(raw, ""),
        }
    }

    /// Parse a header that may be absent entirely.
    pub fn parse_optional(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    /// Both the name and the source IP are present and not blank.
    pub fn is_well_formed(&self) -> bool {
        !is_blank(&self.name) && !is_blank(&self.source_ip)
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl FromStr for BotClaim {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for BotClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, CLAIM_DELIMITER, self.source_ip)
    }
}
