//! Creation validation and stage-completeness gates
//!
//! `validate_*_create` functions take a draft, check every constraint, and
//! either return the fully formed case (reference assigned, initial status,
//! unlocked) or a [`ValidationError`] listing *all* violations so the caller
//! can render every field error at once.
//!
//! The `*_blockers` functions back the terminal-transition gates: they return
//! the list of completeness requirements still unmet.

use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::schemas::{
    next_reference, now_rfc3339, renumber_gps_points, Attachment, BuildingPlan,
    BuildingPlanStatus, BusinessDetails, CaseReference, ChecklistItem, ChecklistStatus,
    Coordinates, FeeStatus, GeoLocation, GpsPoint, HouseholdMember, HouseholdRecord,
    HousingApplication, HousingStatus, InspectionReport, InspectionStatus, License, LicenseFee,
    LicenseStatus, LicenseTypeRegistry, PlanType, Plot, PlotStatus, PropertyType,
    RezoningRequest, RezoningStatus, SettlementRecord, UtilityAccess, ZoningType,
    MIN_TYPE_KEY_LEN,
};

use super::states::CaseState;

/// Minimum number of boundary points needed to define a parcel
pub const MIN_GPS_POINTS: usize = 3;

/// One unmet constraint, tied to the field that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldViolation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Creation rejected; every unmet constraint is listed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed with {} violation(s)", .violations.len())]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        ValidationError { violations }
    }

    /// Human-readable message per violation, for direct rendering
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.to_string()).collect()
    }
}

fn require_text(violations: &mut Vec<FieldViolation>, field: &str, value: &str) {
    if value.trim().is_empty() {
        violations.push(FieldViolation::new(field, "must not be empty"));
    }
}

fn require_positive(violations: &mut Vec<FieldViolation>, field: &str, value: f64) {
    if !(value > 0.0) {
        violations.push(FieldViolation::new(field, "must be greater than zero"));
    }
}

fn finish(violations: Vec<FieldViolation>) -> Result<(), ValidationError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(violations))
    }
}

fn current_year() -> i32 {
    Utc::now().year()
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn stamp_id(kind: &str) -> String {
    format!("{}-{}", kind, Utc::now().timestamp_millis())
}

// ===== HOUSING =====

/// Intake form for a new housing ownership application
#[derive(Debug, Clone, Deserialize)]
pub struct HousingDraft {
    pub applicant_name: String,
    pub property_type: PropertyType,
    pub settlement_area: String,
    pub monthly_income: f64,

    #[serde(default)]
    pub plot_reference: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub utilities: UtilityAccess,

    #[serde(default)]
    pub documents: Vec<Attachment>,

    #[serde(default)]
    pub head_of_household: Option<String>,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub members: Vec<HouseholdMember>,

    #[serde(default)]
    pub inspection_date: Option<NaiveDate>,
    #[serde(default)]
    pub inspector: String,
    #[serde(default)]
    pub inspection_comments: String,
}

/// Validate a housing draft and build the pending application.
///
/// A valid application needs the applicant's particulars, a strictly positive
/// income, at least one supporting document, at least one household member,
/// and a scheduled first inspection.
pub fn validate_housing_create(
    draft: &HousingDraft,
    existing: &[CaseReference],
    prefix: &str,
) -> Result<HousingApplication, ValidationError> {
    let mut violations = Vec::new();

    require_text(&mut violations, "applicant_name", &draft.applicant_name);
    require_text(&mut violations, "settlement_area", &draft.settlement_area);
    require_positive(&mut violations, "monthly_income", draft.monthly_income);

    if draft.documents.is_empty() {
        violations.push(FieldViolation::new(
            "documents",
            "at least one supporting document is required",
        ));
    }
    if draft.members.is_empty() {
        violations.push(FieldViolation::new(
            "household.members",
            "at least one household member is required",
        ));
    }
    for (i, member) in draft.members.iter().enumerate() {
        require_text(&mut violations, &format!("household.members[{}].name", i), &member.name);
        require_text(
            &mut violations,
            &format!("household.members[{}].relationship", i),
            &member.relationship,
        );
    }

    if draft.inspection_date.is_none() {
        violations.push(FieldViolation::new(
            "inspection_date",
            "an inspection date must be scheduled",
        ));
    }
    require_text(&mut violations, "inspector", &draft.inspector);

    finish(violations)?;

    let now = now_rfc3339();
    let head = draft
        .head_of_household
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| draft.applicant_name.trim())
        .to_string();

    Ok(HousingApplication {
        schema_version: 1,
        reference: next_reference(prefix, current_year(), existing),
        applicant_name: draft.applicant_name.trim().to_string(),
        property_type: draft.property_type,
        settlement_area: draft.settlement_area.trim().to_string(),
        monthly_income: draft.monthly_income,
        application_date: today(),
        status: HousingStatus::INITIAL,
        documents: draft.documents.clone(),
        inspection_reports: vec![InspectionReport {
            id: stamp_id("INSP"),
            inspection_date: draft.inspection_date.expect("validated above"),
            inspector: draft.inspector.trim().to_string(),
            status: InspectionStatus::Pending,
            comments: draft.inspection_comments.trim().to_string(),
            attachments: vec![],
        }],
        settlement: SettlementRecord {
            settlement_area: draft.settlement_area.trim().to_string(),
            plot_reference: draft
                .plot_reference
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from),
            coordinates: draft.coordinates,
            access_to_utilities: draft.utilities,
        },
        household: HouseholdRecord {
            head_of_household: head,
            contact_number: draft.contact_number.trim().to_string(),
            members: draft.members.clone(),
            total_income: draft.monthly_income,
        },
        approval: None,
        locked: false,
        lock_reason: None,
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Requirements still unmet for moving a housing case into `approved`
pub fn housing_approval_blockers(case: &HousingApplication) -> Vec<String> {
    let mut missing = Vec::new();
    if case.inspection_reports.is_empty() {
        missing.push("no inspection report has been filed".to_string());
    }
    for report in &case.inspection_reports {
        if report.is_pending() {
            missing.push(format!("inspection report {} is still pending", report.id));
        }
    }
    missing
}

/// Requirements still unmet for moving a housing case into `confirmed`
pub fn housing_confirmation_blockers(case: &HousingApplication) -> Vec<String> {
    if case.approval.is_none() {
        vec!["no board approval has been recorded".to_string()]
    } else {
        Vec::new()
    }
}

// ===== LICENSING =====

/// Intake form for a new license
#[derive(Debug, Clone, Deserialize)]
pub struct LicenseDraft {
    /// Existing registry key, ignored when `custom_type` is given
    #[serde(default)]
    pub type_key: Option<String>,

    /// New type to register (min 3 characters after trimming)
    #[serde(default)]
    pub custom_type: Option<String>,

    pub business: BusinessDetails,

    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,

    #[serde(default)]
    pub initial_fee: Option<f64>,

    #[serde(default)]
    pub documents: Vec<Attachment>,
}

/// Outcome of a successful license validation
#[derive(Debug, Clone)]
pub struct ValidatedLicense {
    pub license: License,
    /// Custom type key the caller must persist to the registry, if one was
    /// introduced by this draft
    pub registered_type: Option<String>,
}

/// Validate a license draft against the type registry and build the pending
/// license.
pub fn validate_license_create(
    draft: &LicenseDraft,
    registry: &LicenseTypeRegistry,
    existing: &[CaseReference],
    prefix: &str,
) -> Result<ValidatedLicense, ValidationError> {
    let mut violations = Vec::new();

    require_text(&mut violations, "business.name", &draft.business.name);
    require_text(&mut violations, "business.trading_name", &draft.business.trading_name);
    require_text(
        &mut violations,
        "business.registration_number",
        &draft.business.registration_number,
    );
    require_text(&mut violations, "business.email", &draft.business.email);

    let mut registered_type = None;
    let type_key = match (&draft.custom_type, &draft.type_key) {
        (Some(custom), _) => {
            let key = LicenseTypeRegistry::sanitize(custom);
            if key.chars().count() < MIN_TYPE_KEY_LEN {
                violations.push(FieldViolation::new(
                    "custom_type",
                    format!("type name must be at least {} characters long", MIN_TYPE_KEY_LEN),
                ));
                None
            } else {
                if !registry.contains(&key) {
                    registered_type = Some(key.clone());
                }
                Some(key)
            }
        }
        (None, Some(key)) => {
            let key = LicenseTypeRegistry::sanitize(key);
            if registry.contains(&key) {
                Some(key)
            } else {
                violations.push(FieldViolation::new(
                    "type_key",
                    format!("unknown license type: {}", key),
                ));
                None
            }
        }
        (None, None) => {
            violations.push(FieldViolation::new("type_key", "a license type is required"));
            None
        }
    };

    match (draft.valid_from, draft.valid_until) {
        (Some(from), Some(until)) => {
            if until <= from {
                violations.push(FieldViolation::new(
                    "valid_until",
                    "must be after valid_from",
                ));
            }
        }
        (from, until) => {
            if from.is_none() {
                violations.push(FieldViolation::new("valid_from", "must be set"));
            }
            if until.is_none() {
                violations.push(FieldViolation::new("valid_until", "must be set"));
            }
        }
    }

    if let Some(fee) = draft.initial_fee {
        require_positive(&mut violations, "initial_fee", fee);
    }

    finish(violations)?;

    let now = now_rfc3339();
    let valid_from = draft.valid_from.expect("validated above");
    let fees = match draft.initial_fee {
        Some(amount) => vec![LicenseFee {
            id: stamp_id("FEE"),
            fee_type: "application".to_string(),
            amount,
            due_date: valid_from,
            paid_amount: 0.0,
            paid_date: None,
            status: FeeStatus::Pending,
        }],
        None => Vec::new(),
    };

    Ok(ValidatedLicense {
        license: License {
            schema_version: 1,
            reference: next_reference(prefix, current_year(), existing),
            type_key: type_key.expect("validated above"),
            business: draft.business.clone(),
            valid_from,
            valid_until: draft.valid_until.expect("validated above"),
            status: LicenseStatus::INITIAL,
            fees,
            documents: draft.documents.clone(),
            locked: false,
            lock_reason: None,
            created_at: now.clone(),
            updated_at: now,
        },
        registered_type,
    })
}

/// Requirements still unmet for activating a license
pub fn license_activation_blockers(license: &License) -> Vec<String> {
    license
        .fees
        .iter()
        .filter(|f| !f.is_paid())
        .map(|f| format!("fee {} ({}) is unpaid", f.id, f.fee_type))
        .collect()
}

// ===== PLANNING =====

/// Intake form for registering a plot
#[derive(Debug, Clone, Deserialize)]
pub struct PlotDraft {
    pub location: GeoLocation,
    pub size: f64,
    pub zoning: ZoningType,
    #[serde(default = "default_plot_status")]
    pub status: PlotStatus,
    #[serde(default)]
    pub owner: Option<String>,
    pub gps_points: Vec<GpsPoint>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub notes: String,
}

fn default_plot_status() -> PlotStatus {
    PlotStatus::Available
}

/// Validate a plot draft and build the plot record.
///
/// The parcel boundary needs at least [`MIN_GPS_POINTS`] points; point order
/// is normalized to 1..=n regardless of the submitted numbering.
pub fn validate_plot_create(
    draft: &PlotDraft,
    existing: &[CaseReference],
    prefix: &str,
) -> Result<Plot, ValidationError> {
    let mut violations = Vec::new();

    require_text(&mut violations, "location.address", &draft.location.address);
    require_positive(&mut violations, "size", draft.size);

    if draft.gps_points.len() < MIN_GPS_POINTS {
        violations.push(FieldViolation::new(
            "gps_points",
            format!(
                "at least {} points are required to define the parcel boundary",
                MIN_GPS_POINTS
            ),
        ));
    }
    for (i, point) in draft.gps_points.iter().enumerate() {
        if !point.latitude.is_finite() || !point.longitude.is_finite() {
            violations.push(FieldViolation::new(
                format!("gps_points[{}]", i),
                "coordinates must be finite numbers",
            ));
        }
    }

    finish(violations)?;

    let now = now_rfc3339();
    Ok(Plot {
        schema_version: 1,
        reference: next_reference(prefix, current_year(), existing),
        location: draft.location.clone(),
        size: draft.size,
        zoning: draft.zoning,
        status: draft.status,
        owner: draft
            .owner
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from),
        gps_points: renumber_gps_points(&draft.gps_points),
        rezoning_requests: Vec::new(),
        attachments: draft.attachments.clone(),
        notes: draft.notes.trim().to_string(),
        locked: false,
        lock_reason: None,
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Intake form for a rezoning request against an existing plot
#[derive(Debug, Clone, Deserialize)]
pub struct RezoningDraft {
    pub requested_zoning: ZoningType,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Validate a rezoning draft against its plot and build the draft request.
pub fn validate_rezoning_create(
    plot: &Plot,
    draft: &RezoningDraft,
    existing: &[CaseReference],
    prefix: &str,
) -> Result<RezoningRequest, ValidationError> {
    let mut violations = Vec::new();

    if plot.locked {
        violations.push(FieldViolation::new("plot", "plot is locked"));
    }
    if draft.requested_zoning == plot.zoning {
        violations.push(FieldViolation::new(
            "requested_zoning",
            "must differ from the plot's current zoning",
        ));
    }

    finish(violations)?;

    let now = now_rfc3339();
    Ok(RezoningRequest {
        reference: next_reference(prefix, current_year(), existing),
        current_zoning: plot.zoning,
        requested_zoning: draft.requested_zoning,
        status: RezoningStatus::INITIAL,
        notes: draft.notes.trim().to_string(),
        committee_decision: None,
        meeting_date: None,
        attachments: draft.attachments.clone(),
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Requirements still unmet for approving a rezoning request
pub fn rezoning_approval_blockers(request: &RezoningRequest) -> Vec<String> {
    if request.committee_decision_recorded() {
        Vec::new()
    } else {
        vec!["no committee decision has been recorded".to_string()]
    }
}

/// Intake form for a building plan submission
#[derive(Debug, Clone, Deserialize)]
pub struct BuildingPlanDraft {
    pub plot_reference: CaseReference,
    pub plan_type: PlanType,
    pub checklist: Vec<BuildingPlanChecklistDraft>,
    #[serde(default)]
    pub documents: Vec<Attachment>,
}

/// One departmental requirement on a building plan draft
#[derive(Debug, Clone, Deserialize)]
pub struct BuildingPlanChecklistDraft {
    pub department: String,
    pub requirement: String,
}

/// Validate a building plan draft and build the pending plan.
pub fn validate_building_plan_create(
    draft: &BuildingPlanDraft,
    existing: &[CaseReference],
    prefix: &str,
) -> Result<BuildingPlan, ValidationError> {
    let mut violations = Vec::new();

    if draft.checklist.is_empty() {
        violations.push(FieldViolation::new(
            "checklist",
            "at least one departmental requirement is required",
        ));
    }
    for (i, item) in draft.checklist.iter().enumerate() {
        require_text(&mut violations, &format!("checklist[{}].department", i), &item.department);
        require_text(
            &mut violations,
            &format!("checklist[{}].requirement", i),
            &item.requirement,
        );
    }

    finish(violations)?;

    let now = now_rfc3339();
    Ok(BuildingPlan {
        schema_version: 1,
        reference: next_reference(prefix, current_year(), existing),
        plot_reference: draft.plot_reference.clone(),
        plan_type: draft.plan_type,
        status: BuildingPlanStatus::INITIAL,
        checklist: draft
            .checklist
            .iter()
            .enumerate()
            .map(|(i, item)| ChecklistItem {
                id: format!("CHK-{}", i + 1),
                department: item.department.trim().to_string(),
                requirement: item.requirement.trim().to_string(),
                status: ChecklistStatus::Pending,
                comments: None,
                checked_by: None,
                checked_date: None,
            })
            .collect(),
        documents: draft.documents.clone(),
        locked: false,
        lock_reason: None,
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Requirements still unmet for approving a building plan
pub fn building_plan_approval_blockers(plan: &BuildingPlan) -> Vec<String> {
    if plan.checklist.is_empty() {
        return vec!["the departmental checklist is empty".to_string()];
    }
    plan.checklist
        .iter()
        .filter(|i| i.status != ChecklistStatus::Approved)
        .map(|i| format!("checklist item {} ({}) is not approved", i.id, i.requirement))
        .collect()
}
