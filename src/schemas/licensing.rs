//! Licensing schema - business licenses, fees, and the extensible type registry

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::reference::CaseReference;
use super::shared::{now_rfc3339, Attachment};

/// Workflow status for a license
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    /// Application received, not yet decided
    Pending,
    /// In force
    Active,
    /// Validity window elapsed (sink)
    Expired,
    /// Temporarily withdrawn
    Suspended,
    /// Application refused (sink)
    Rejected,
}

impl std::fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseStatus::Pending => write!(f, "pending"),
            LicenseStatus::Active => write!(f, "active"),
            LicenseStatus::Expired => write!(f, "expired"),
            LicenseStatus::Suspended => write!(f, "suspended"),
            LicenseStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for LicenseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(LicenseStatus::Pending),
            "active" => Ok(LicenseStatus::Active),
            "expired" => Ok(LicenseStatus::Expired),
            "suspended" => Ok(LicenseStatus::Suspended),
            "rejected" => Ok(LicenseStatus::Rejected),
            _ => Err(format!("Unknown license status: {}", s)),
        }
    }
}

/// Registry of license type keys.
///
/// License types are an extensible enumeration: the council can introduce new
/// types at runtime, so keys are validated against this registry value instead
/// of a closed enum. Keys are stored lowercased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseTypeRegistry {
    keys: Vec<String>,
}

/// Minimum length for a newly registered type key
pub const MIN_TYPE_KEY_LEN: usize = 3;

impl LicenseTypeRegistry {
    /// Registry seeded with the council's standard types
    pub fn standard() -> Self {
        LicenseTypeRegistry {
            keys: ["business", "liquor", "trading", "special"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    pub fn from_keys(keys: Vec<String>) -> Self {
        LicenseTypeRegistry { keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Normalize a proposed custom type key (trim + lowercase).
    pub fn sanitize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Register a new custom type key.
    ///
    /// The key is trimmed and lowercased; it must be at least
    /// [`MIN_TYPE_KEY_LEN`] characters and not already registered. Returns the
    /// sanitized key on success.
    pub fn register(&mut self, raw: &str) -> Result<String, String> {
        let key = Self::sanitize(raw);
        if key.chars().count() < MIN_TYPE_KEY_LEN {
            return Err(format!(
                "type name must be at least {} characters long",
                MIN_TYPE_KEY_LEN
            ));
        }
        if self.contains(&key) {
            return Err(format!("type {} is already registered", key));
        }
        self.keys.push(key.clone());
        Ok(key)
    }
}

impl Default for LicenseTypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Payment state of a single fee line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeStatus {
    Pending,
    Paid,
    Overdue,
}

/// A fee levied against a license
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseFee {
    pub id: String,
    pub fee_type: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
    pub status: FeeStatus,
}

impl LicenseFee {
    pub fn is_paid(&self) -> bool {
        self.status == FeeStatus::Paid
    }
}

/// Registered business particulars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessDetails {
    pub name: String,
    pub trading_name: String,
    pub registration_number: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub employees: u32,
}

/// A business license progressing through the licensing workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// Assigned-once case reference (e.g. "BL-2025-001")
    pub reference: CaseReference,

    /// Type key validated against the registry
    pub type_key: String,

    pub business: BusinessDetails,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,

    /// Current workflow status
    pub status: LicenseStatus,

    pub fees: Vec<LicenseFee>,

    #[serde(default)]
    pub documents: Vec<Attachment>,

    /// One-way lock set when the case reaches a terminal status
    #[serde(default)]
    pub locked: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_reason: Option<String>,

    /// ISO 8601 creation timestamp
    pub created_at: String,

    /// ISO 8601 last update timestamp
    pub updated_at: String,
}

impl License {
    /// Return a new license with the given status, updating the timestamp
    pub fn with_status(mut self, status: LicenseStatus) -> Self {
        self.status = status;
        self.touch_returning()
    }

    /// Return a new license locked with the given reason
    pub fn with_lock(mut self, reason: impl Into<String>) -> Self {
        self.locked = true;
        self.lock_reason = Some(reason.into());
        self.touch_returning()
    }

    /// Return a new license with one fee marked paid in full today's amount.
    ///
    /// If the fee id is not found, returns the license unchanged.
    pub fn with_fee_paid(mut self, fee_id: &str, paid_date: NaiveDate) -> Self {
        let mut hit = false;
        for fee in &mut self.fees {
            if fee.id == fee_id {
                fee.paid_amount = fee.amount;
                fee.paid_date = Some(paid_date);
                fee.status = FeeStatus::Paid;
                hit = true;
            }
        }
        if hit {
            self.touch_returning()
        } else {
            self
        }
    }

    /// Return a new license with a document appended
    pub fn with_document(mut self, document: Attachment) -> Self {
        self.documents.push(document);
        self.touch_returning()
    }

    /// Every recorded fee has been paid
    pub fn fees_settled(&self) -> bool {
        self.fees.iter().all(|f| f.is_paid())
    }

    /// Active license whose validity ends within `window_days` of `as_of`
    pub fn renewal_due(&self, as_of: NaiveDate, window_days: i64) -> bool {
        if self.status != LicenseStatus::Active {
            return false;
        }
        let days_left = (self.valid_until - as_of).num_days();
        days_left <= window_days
    }

    fn touch_returning(mut self) -> Self {
        self.updated_at = now_rfc3339();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::test_support::sample_license;

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&LicenseStatus::Active).unwrap(), "\"active\"");
        assert_eq!(serde_json::to_string(&LicenseStatus::Suspended).unwrap(), "\"suspended\"");
    }

    #[test]
    fn test_registry_standard_keys() {
        let registry = LicenseTypeRegistry::standard();
        for key in ["business", "liquor", "trading", "special"] {
            assert!(registry.contains(key));
        }
        assert!(!registry.contains("hawker"));
    }

    #[test]
    fn test_registry_rejects_short_key() {
        let mut registry = LicenseTypeRegistry::standard();
        // Two characters fails, three succeeds
        assert!(registry.register("ag").is_err());
        assert_eq!(registry.register("agr").unwrap(), "agr");
        assert!(registry.contains("agr"));
    }

    #[test]
    fn test_registry_sanitizes_and_dedupes() {
        let mut registry = LicenseTypeRegistry::standard();
        assert_eq!(registry.register("  Hawker ").unwrap(), "hawker");
        assert!(registry.register("HAWKER").is_err());
    }

    #[test]
    fn test_registry_trims_before_length_check() {
        let mut registry = LicenseTypeRegistry::standard();
        assert!(registry.register("  ab  ").is_err());
    }

    #[test]
    fn test_license_json_round_trip() {
        let license = sample_license("BL-2025-001");
        let json = serde_json::to_string_pretty(&license).unwrap();
        let parsed: License = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, license);
    }

    #[test]
    fn test_fees_settled() {
        let license = sample_license("BL-2025-001");
        assert!(!license.fees_settled());

        let fee_id = license.fees[0].id.clone();
        let paid = license
            .clone()
            .with_fee_paid(&fee_id, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert!(paid.fees_settled());
        assert!(!license.fees_settled()); // Original unchanged
    }

    #[test]
    fn test_with_fee_paid_missing_id() {
        let license = sample_license("BL-2025-001");
        let updated = license
            .clone()
            .with_fee_paid("FEE-999", NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert_eq!(updated, license);
    }

    #[test]
    fn test_renewal_due_window() {
        let license = sample_license("BL-2025-001").with_status(LicenseStatus::Active);
        let expiry = license.valid_until;

        assert!(license.renewal_due(expiry - chrono::Duration::days(10), 30));
        assert!(!license.renewal_due(expiry - chrono::Duration::days(90), 30));
    }

    #[test]
    fn test_renewal_due_requires_active() {
        let license = sample_license("BL-2025-001");
        assert_eq!(license.status, LicenseStatus::Pending);
        assert!(!license.renewal_due(license.valid_until, 30));
    }
}
