//! Shared schema types used across the housing, licensing, and planning domains

use serde::{Deserialize, Serialize};

/// A stored file reference.
///
/// Cases keep the reference only; the bytes live in the attachment store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment identifier (e.g. "ATT-1738000000000")
    pub id: String,

    /// Original file name
    pub file_name: String,

    /// MIME content type
    pub content_type: String,

    /// Size in bytes
    pub file_size: u64,

    /// Retrievable URL or store-relative path
    pub url: String,
}

/// A geographic point with a street address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

/// Bare coordinates without an address.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current UTC time as an RFC 3339 string, the timestamp format used on all
/// case records.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
