//! Case reference numbers
//!
//! Every case carries a `<PREFIX>-<YEAR>-<SEQ>` reference (e.g. `HA-2025-001`)
//! assigned once at creation. Sequences are scoped to the prefix and year and
//! restart each January.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum width the sequence component is padded to when rendered.
pub const SEQ_PAD_WIDTH: usize = 3;

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([A-Z]{2,8})-(\d{4})-(\d{3,6})$").expect("valid regex"))
}

/// A parsed case reference number.
///
/// References are immutable identity: once assigned to a case they are never
/// reassigned, and the store uses them as file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaseReference {
    prefix: String,
    year: i32,
    seq: u32,
}

impl CaseReference {
    /// Build a reference from its components.
    pub fn new(prefix: impl Into<String>, year: i32, seq: u32) -> Self {
        CaseReference {
            prefix: prefix.into(),
            year,
            seq,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn seq(&self) -> u32 {
        self.seq
    }
}

impl fmt::Display for CaseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{:0width$}",
            self.prefix,
            self.year,
            self.seq,
            width = SEQ_PAD_WIDTH
        )
    }
}

impl FromStr for CaseReference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = reference_pattern()
            .captures(s)
            .ok_or_else(|| format!("not a case reference: {}", s))?;
        let year: i32 = caps[2].parse().map_err(|_| format!("bad year in {}", s))?;
        let seq: u32 = caps[3].parse().map_err(|_| format!("bad sequence in {}", s))?;
        Ok(CaseReference::new(&caps[1], year, seq))
    }
}

impl Serialize for CaseReference {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CaseReference {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Allocate the next reference for a prefix in the given year.
///
/// Scans the existing references and takes the highest sequence among those
/// matching the prefix and year, plus one. The sequence therefore restarts at
/// 001 each year.
pub fn next_reference(prefix: &str, year: i32, existing: &[CaseReference]) -> CaseReference {
    let max_seq = existing
        .iter()
        .filter(|r| r.prefix == prefix && r.year == year)
        .map(|r| r.seq)
        .max()
        .unwrap_or(0);
    CaseReference::new(prefix, year, max_seq + 1)
}
