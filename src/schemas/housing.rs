//! Housing schema - ownership applications and their owned sub-records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::reference::CaseReference;
use super::shared::{now_rfc3339, Attachment, Coordinates};

/// Workflow status for a housing application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingStatus {
    /// Saved but not yet submitted
    Draft,
    /// Submitted, awaiting triage
    Pending,
    /// Under site inspection
    Inspection,
    /// Settlement office review
    SettlementReview,
    /// Approved by the board
    Approved,
    /// Confirmed and read-only
    Confirmed,
    /// Rejected (sink)
    Rejected,
}

impl std::fmt::Display for HousingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HousingStatus::Draft => write!(f, "draft"),
            HousingStatus::Pending => write!(f, "pending"),
            HousingStatus::Inspection => write!(f, "inspection"),
            HousingStatus::SettlementReview => write!(f, "settlement_review"),
            HousingStatus::Approved => write!(f, "approved"),
            HousingStatus::Confirmed => write!(f, "confirmed"),
            HousingStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for HousingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(HousingStatus::Draft),
            "pending" => Ok(HousingStatus::Pending),
            "inspection" => Ok(HousingStatus::Inspection),
            "settlement_review" => Ok(HousingStatus::SettlementReview),
            "approved" => Ok(HousingStatus::Approved),
            "confirmed" => Ok(HousingStatus::Confirmed),
            "rejected" => Ok(HousingStatus::Rejected),
            _ => Err(format!("Unknown housing status: {}", s)),
        }
    }
}

/// Property category an application is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Land,
}

/// Outcome of a single inspection visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionStatus {
    Pending,
    Passed,
    Failed,
}

impl std::fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InspectionStatus::Pending => write!(f, "pending"),
            InspectionStatus::Passed => write!(f, "passed"),
            InspectionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A scheduled or completed site inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionReport {
    pub id: String,
    pub inspection_date: NaiveDate,
    pub inspector: String,
    pub status: InspectionStatus,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl InspectionReport {
    pub fn is_pending(&self) -> bool {
        self.status == InspectionStatus::Pending
    }
}

/// One person living in the applicant's household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdMember {
    pub name: String,
    pub age: u32,
    pub relationship: String,
    pub employed: bool,
}

/// Household composition record, owned by the application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdRecord {
    pub head_of_household: String,
    #[serde(default)]
    pub contact_number: String,
    pub members: Vec<HouseholdMember>,
    pub total_income: f64,
}

/// Utility access flags for a settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilityAccess {
    pub water: bool,
    pub electricity: bool,
    pub sanitation: bool,
}

impl Default for UtilityAccess {
    // The intake form's defaults: piped water and power assumed, sanitation not
    fn default() -> Self {
        UtilityAccess {
            water: true,
            electricity: true,
            sanitation: false,
        }
    }
}

/// Settlement details for the applied-for site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub settlement_area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    pub access_to_utilities: UtilityAccess,
}

/// Board approval record, present once an application is approved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalDetails {
    pub approval_date: NaiveDate,
    pub approved_by: String,
    #[serde(default)]
    pub comments: String,
    pub valid_until: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<String>>,
}

/// A housing ownership application progressing through the approval workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingApplication {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// Assigned-once case reference (e.g. "HA-2025-001")
    pub reference: CaseReference,

    pub applicant_name: String,
    pub property_type: PropertyType,
    pub settlement_area: String,
    pub monthly_income: f64,
    pub application_date: NaiveDate,

    /// Current workflow status
    pub status: HousingStatus,

    /// Supporting documents (at least one required at creation)
    pub documents: Vec<Attachment>,

    pub inspection_reports: Vec<InspectionReport>,
    pub settlement: SettlementRecord,
    pub household: HouseholdRecord,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval: Option<ApprovalDetails>,

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

impl HousingApplication {
    /// Return a new application with the given status, updating the timestamp
    pub fn with_status(mut self, status: HousingStatus) -> Self {
        self.status = status;
        self.touch_returning()
    }

    /// Return a new application locked with the given reason
    pub fn with_lock(mut self, reason: impl Into<String>) -> Self {
        self.locked = true;
        self.lock_reason = Some(reason.into());
        self.touch_returning()
    }

    /// Return a new application with the approval record set
    pub fn with_approval(mut self, approval: ApprovalDetails) -> Self {
        self.approval = Some(approval);
        self.touch_returning()
    }

    /// Return a new application with a document appended
    pub fn with_document(mut self, document: Attachment) -> Self {
        self.documents.push(document);
        self.touch_returning()
    }

    /// Return a new application with one inspection report's status replaced.
    ///
    /// If the report id is not found, returns the application unchanged.
    pub fn with_inspection_status(mut self, report_id: &str, status: InspectionStatus) -> Self {
        let mut hit = false;
        for report in &mut self.inspection_reports {
            if report.id == report_id {
                report.status = status;
                hit = true;
            }
        }
        if hit {
            self.touch_returning()
        } else {
            self
        }
    }

    /// All inspection reports have a recorded outcome
    pub fn inspections_complete(&self) -> bool {
        !self.inspection_reports.is_empty()
            && self.inspection_reports.iter().all(|r| !r.is_pending())
    }

    fn touch_returning(mut self) -> Self {
        self.updated_at = now_rfc3339();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::test_support::sample_housing_application;

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&HousingStatus::Pending).unwrap(), "\"pending\"");
        assert_eq!(
            serde_json::to_string(&HousingStatus::SettlementReview).unwrap(),
            "\"settlement_review\""
        );
        assert_eq!(serde_json::to_string(&HousingStatus::Confirmed).unwrap(), "\"confirmed\"");
    }

    #[test]
    fn test_status_parse_round_trip() {
        for status in [
            HousingStatus::Draft,
            HousingStatus::Pending,
            HousingStatus::Inspection,
            HousingStatus::SettlementReview,
            HousingStatus::Approved,
            HousingStatus::Confirmed,
            HousingStatus::Rejected,
        ] {
            let parsed: HousingStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("settlementReview".parse::<HousingStatus>().is_err());
    }

    #[test]
    fn test_application_json_round_trip() {
        let app = sample_housing_application("HA-2025-001");
        let json = serde_json::to_string_pretty(&app).unwrap();
        let parsed: HousingApplication = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, app);
    }

    #[test]
    fn test_with_status_is_immutable() {
        let app = sample_housing_application("HA-2025-001");
        let updated = app.clone().with_status(HousingStatus::Inspection);
        assert_eq!(updated.status, HousingStatus::Inspection);
        assert_eq!(app.status, HousingStatus::Pending); // Original unchanged
    }

    #[test]
    fn test_with_lock_sets_reason() {
        let app = sample_housing_application("HA-2025-001");
        let locked = app.with_lock("Case confirmed by Housing Board.");
        assert!(locked.locked);
        assert_eq!(locked.lock_reason.as_deref(), Some("Case confirmed by Housing Board."));
    }

    #[test]
    fn test_with_inspection_status() {
        let app = sample_housing_application("HA-2025-001");
        assert!(!app.inspections_complete());

        let report_id = app.inspection_reports[0].id.clone();
        let updated = app.clone().with_inspection_status(&report_id, InspectionStatus::Passed);
        assert!(updated.inspections_complete());
        assert!(app.inspection_reports[0].is_pending()); // Original unchanged
    }

    #[test]
    fn test_with_inspection_status_missing_id() {
        let app = sample_housing_application("HA-2025-001");
        let updated = app.clone().with_inspection_status("INSP-999", InspectionStatus::Passed);
        assert_eq!(updated, app);
    }

    #[test]
    fn test_inspections_complete_requires_reports() {
        let mut app = sample_housing_application("HA-2025-001");
        app.inspection_reports.clear();
        assert!(!app.inspections_complete());
    }
}
