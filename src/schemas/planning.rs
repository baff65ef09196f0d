//! Planning schema - plots, rezoning requests, and building plans

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::reference::CaseReference;
use super::shared::{now_rfc3339, Attachment, GeoLocation};

/// Zoning designation for a parcel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoningType {
    Residential,
    Commercial,
    Industrial,
    Agricultural,
    Mixed,
}

impl std::fmt::Display for ZoningType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoningType::Residential => write!(f, "residential"),
            ZoningType::Commercial => write!(f, "commercial"),
            ZoningType::Industrial => write!(f, "industrial"),
            ZoningType::Agricultural => write!(f, "agricultural"),
            ZoningType::Mixed => write!(f, "mixed"),
        }
    }
}

/// Allocation state of a plot. This is an attribute, not a workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStatus {
    Available,
    Allocated,
    Developed,
    Reserved,
}

impl std::fmt::Display for PlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlotStatus::Available => write!(f, "available"),
            PlotStatus::Allocated => write!(f, "allocated"),
            PlotStatus::Developed => write!(f, "developed"),
            PlotStatus::Reserved => write!(f, "reserved"),
        }
    }
}

/// One surveyed boundary point, 1-based ordering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub order: u32,
}

/// Renumber boundary points so orders run 1..=n in list position.
///
/// Removal of a point leaves a gap; the original system renumbers on every
/// removal so the boundary stays contiguous.
pub fn renumber_gps_points(points: &[GpsPoint]) -> Vec<GpsPoint> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| GpsPoint {
            order: (i + 1) as u32,
            ..*p
        })
        .collect()
}

/// Workflow status for a rezoning request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RezoningStatus {
    /// Being prepared
    Draft,
    /// Before the planning committee
    Submitted,
    /// Committee approved (sink)
    Approved,
    /// Committee rejected (sink)
    Rejected,
}

impl std::fmt::Display for RezoningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RezoningStatus::Draft => write!(f, "draft"),
            RezoningStatus::Submitted => write!(f, "submitted"),
            RezoningStatus::Approved => write!(f, "approved"),
            RezoningStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for RezoningStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(RezoningStatus::Draft),
            "submitted" => Ok(RezoningStatus::Submitted),
            "approved" => Ok(RezoningStatus::Approved),
            "rejected" => Ok(RezoningStatus::Rejected),
            _ => Err(format!("Unknown rezoning status: {}", s)),
        }
    }
}

/// A request to change a plot's zoning, owned by the plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RezoningRequest {
    /// Assigned-once request reference (e.g. "RZ-2025-001")
    pub reference: CaseReference,

    pub current_zoning: ZoningType,
    pub requested_zoning: ZoningType,
    pub status: RezoningStatus,

    #[serde(default)]
    pub notes: String,

    /// Recorded committee outcome; required before approval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committee_decision: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_date: Option<NaiveDate>,

    #[serde(default)]
    pub attachments: Vec<Attachment>,

    pub created_at: String,
    pub updated_at: String,
}

impl RezoningRequest {
    /// A committee decision and meeting date have been recorded
    pub fn committee_decision_recorded(&self) -> bool {
        self.committee_decision
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
            && self.meeting_date.is_some()
    }
}

/// A surveyed parcel in the plot inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// Assigned-once case reference (e.g. "PLT-2025-001")
    pub reference: CaseReference,

    pub location: GeoLocation,

    /// Parcel size in square metres
    pub size: f64,

    pub zoning: ZoningType,
    pub status: PlotStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Boundary definition; at least three ordered points
    pub gps_points: Vec<GpsPoint>,

    #[serde(default)]
    pub rezoning_requests: Vec<RezoningRequest>,

    #[serde(default)]
    pub attachments: Vec<Attachment>,

    #[serde(default)]
    pub notes: String,

    /// One-way lock; set explicitly with a reason
    #[serde(default)]
    pub locked: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_reason: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}

impl Plot {
    /// Return a new plot with one rezoning request replaced by `updated`.
    ///
    /// If no request carries that reference, returns the plot unchanged.
    pub fn with_rezoning_request(mut self, updated: RezoningRequest) -> Self {
        let mut hit = false;
        for request in &mut self.rezoning_requests {
            if request.reference == updated.reference {
                *request = updated.clone();
                hit = true;
            }
        }
        if hit {
            self.touch_returning()
        } else {
            self
        }
    }

    /// Return a new plot with a rezoning request appended
    pub fn with_new_rezoning_request(mut self, request: RezoningRequest) -> Self {
        self.rezoning_requests.push(request);
        self.touch_returning()
    }

    /// Find a rezoning request by reference
    pub fn rezoning_request(&self, reference: &CaseReference) -> Option<&RezoningRequest> {
        self.rezoning_requests.iter().find(|r| &r.reference == reference)
    }

    /// Return a new plot with an attachment appended
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self.touch_returning()
    }

    fn touch_returning(mut self) -> Self {
        self.updated_at = now_rfc3339();
        self
    }
}

/// Category of building plan submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    New,
    Modification,
    Renovation,
}

/// Workflow status for a building plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingPlanStatus {
    /// Submitted, awaiting departmental review
    Pending,
    /// Under checklist review
    Review,
    /// Approved (sink)
    Approved,
    /// Rejected (sink)
    Rejected,
}

impl std::fmt::Display for BuildingPlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildingPlanStatus::Pending => write!(f, "pending"),
            BuildingPlanStatus::Review => write!(f, "review"),
            BuildingPlanStatus::Approved => write!(f, "approved"),
            BuildingPlanStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for BuildingPlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BuildingPlanStatus::Pending),
            "review" => Ok(BuildingPlanStatus::Review),
            "approved" => Ok(BuildingPlanStatus::Approved),
            "rejected" => Ok(BuildingPlanStatus::Rejected),
            _ => Err(format!("Unknown building plan status: {}", s)),
        }
    }
}

/// Sign-off state of one departmental checklist requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistStatus {
    Pending,
    Approved,
    Rejected,
}

/// One departmental requirement on a building plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub department: String,
    pub requirement: String,
    pub status: ChecklistStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_date: Option<NaiveDate>,
}

/// A building plan submission against a registered plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingPlan {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// Assigned-once case reference (e.g. "BP-2025-001")
    pub reference: CaseReference,

    /// Reference of the plot this plan builds on
    pub plot_reference: CaseReference,

    pub plan_type: PlanType,
    pub status: BuildingPlanStatus,

    pub checklist: Vec<ChecklistItem>,

    #[serde(default)]
    pub documents: Vec<Attachment>,

    /// One-way lock set when the case reaches a terminal status
    #[serde(default)]
    pub locked: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_reason: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}

impl BuildingPlan {
    /// Return a new plan with the given status, updating the timestamp
    pub fn with_status(mut self, status: BuildingPlanStatus) -> Self {
        self.status = status;
        self.touch_returning()
    }

    /// Return a new plan locked with the given reason
    pub fn with_lock(mut self, reason: impl Into<String>) -> Self {
        self.locked = true;
        self.lock_reason = Some(reason.into());
        self.touch_returning()
    }

    /// Return a new plan with one checklist item's sign-off replaced.
    ///
    /// If the item id is not found, returns the plan unchanged.
    pub fn with_checklist_status(
        mut self,
        item_id: &str,
        status: ChecklistStatus,
        checked_by: &str,
        checked_date: NaiveDate,
    ) -> Self {
        let mut hit = false;
        for item in &mut self.checklist {
            if item.id == item_id {
                item.status = status;
                item.checked_by = Some(checked_by.to_string());
                item.checked_date = Some(checked_date);
                hit = true;
            }
        }
        if hit {
            self.touch_returning()
        } else {
            self
        }
    }

    /// Return a new plan with a document appended
    pub fn with_document(mut self, document: Attachment) -> Self {
        self.documents.push(document);
        self.touch_returning()
    }

    /// Every checklist item has been approved
    pub fn checklist_complete(&self) -> bool {
        !self.checklist.is_empty()
            && self.checklist.iter().all(|i| i.status == ChecklistStatus::Approved)
    }

    fn touch_returning(mut self) -> Self {
        self.updated_at = now_rfc3339();
        self
    }
}
