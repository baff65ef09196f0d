//! Config schema - workspace configuration for caseflow

use serde::{Deserialize, Serialize};

use super::licensing::LicenseTypeRegistry;

/// Reference prefixes for each case kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePrefixes {
    #[serde(default = "default_housing_prefix")]
    pub housing: String,

    #[serde(default = "default_license_prefix")]
    pub license: String,

    #[serde(default = "default_plot_prefix")]
    pub plot: String,

    #[serde(default = "default_rezoning_prefix")]
    pub rezoning: String,

    #[serde(default = "default_building_plan_prefix")]
    pub building_plan: String,
}

fn default_housing_prefix() -> String {
    "HA".to_string()
}

fn default_license_prefix() -> String {
    "BL".to_string()
}

fn default_plot_prefix() -> String {
    "PLT".to_string()
}

fn default_rezoning_prefix() -> String {
    "RZ".to_string()
}

fn default_building_plan_prefix() -> String {
    "BP".to_string()
}

impl Default for ReferencePrefixes {
    fn default() -> Self {
        ReferencePrefixes {
            housing: default_housing_prefix(),
            license: default_license_prefix(),
            plot: default_plot_prefix(),
            rezoning: default_rezoning_prefix(),
            building_plan: default_building_plan_prefix(),
        }
    }
}

/// Attachment store limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentConfig {
    /// Maximum accepted file size in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Accepted MIME content types
    #[serde(default = "default_allowed_content_types")]
    pub allowed_content_types: Vec<String>,
}

fn default_max_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_allowed_content_types() -> Vec<String> {
    vec![
        "application/pdf".to_string(),
        "image/png".to_string(),
        "image/jpeg".to_string(),
    ]
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        AttachmentConfig {
            max_bytes: default_max_bytes(),
            allowed_content_types: default_allowed_content_types(),
        }
    }
}

/// Main configuration for a caseflow workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Reference prefixes per case kind
    #[serde(default)]
    pub prefixes: ReferencePrefixes,

    /// Registered license type keys
    #[serde(default = "default_license_types")]
    pub license_types: Vec<String>,

    /// Attachment store limits
    #[serde(default)]
    pub attachments: AttachmentConfig,

    /// Days before expiry at which an active license counts as due for renewal
    #[serde(default = "default_renewal_window_days")]
    pub renewal_window_days: i64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_license_types() -> Vec<String> {
    LicenseTypeRegistry::standard().keys().to_vec()
}

fn default_renewal_window_days() -> i64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            prefixes: ReferencePrefixes::default(),
            license_types: default_license_types(),
            attachments: AttachmentConfig::default(),
            renewal_window_days: 30,
        }
    }
}

impl Config {
    /// Build the license type registry from the configured keys
    pub fn license_registry(&self) -> LicenseTypeRegistry {
        LicenseTypeRegistry::from_keys(self.license_types.clone())
    }
}
