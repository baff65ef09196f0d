//! Status transition logic
//!
//! Pure functions that validate and apply workflow transitions. A transition
//! never mutates its input: on success the caller gets a new case value with
//! the updated status, timestamp, and (for terminal states) the one-way lock.
//!
//! Policy notes:
//! - Applying a case's current status is an idempotent no-op.
//! - A stored `locked` flag forbids every transition except that no-op.
//! - Entering a terminal state sets `locked` and a generated reason.

use chrono::{Duration, Utc};
use thiserror::Error;

use crate::schemas::{
    ApprovalDetails, BuildingPlan, BuildingPlanStatus, CaseReference, HousingApplication,
    HousingStatus, License, LicenseStatus, Plot, RezoningStatus,
};

use super::states::CaseState;
use super::validation::{
    building_plan_approval_blockers, housing_approval_blockers, housing_confirmation_blockers,
    license_activation_blockers, rezoning_approval_blockers,
};

/// How long a board approval stays valid before renewal
const APPROVAL_VALIDITY_DAYS: i64 = 365;

/// A requested status change was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The edge does not exist, or the case is locked
    #[error("transition from {from} to {to} is not permitted")]
    Forbidden { from: String, to: String },

    /// A terminal transition was attempted without stage completeness
    #[error("cannot enter {target}: {}", .missing.join("; "))]
    Incomplete { target: String, missing: Vec<String> },

    /// The stored case violates an invariant the engine relies on
    #[error("case {reference} is in a corrupt state: {detail}")]
    CorruptState { reference: String, detail: String },
}

impl TransitionError {
    fn forbidden(from: impl std::fmt::Display, to: impl std::fmt::Display) -> Self {
        TransitionError::Forbidden {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    fn incomplete(target: impl std::fmt::Display, missing: Vec<String>) -> Self {
        TransitionError::Incomplete {
            target: target.to_string(),
            missing,
        }
    }
}

/// Whether a status change is permitted by the transition table and lock flag.
///
/// A locked case admits no transition except the same-status no-op; an
/// unlocked case may take any edge its table defines. Completeness gates are
/// not consulted here; they belong to `apply_*` / `check_*`.
pub fn can_transition<S: CaseState>(current: S, target: S, locked: bool) -> bool {
    if locked {
        return target == current;
    }
    if target == current {
        return true;
    }
    current.allowed_next().contains(&target)
}

fn check_edge<S: CaseState>(current: S, target: S, locked: bool) -> Result<(), TransitionError> {
    if !can_transition(current, target, locked) {
        return Err(TransitionError::forbidden(current, target));
    }
    Ok(())
}

/// Apply a status transition to a housing application.
///
/// Gates: entering `approved` requires every inspection report to have a
/// recorded outcome; entering `confirmed` requires a board approval on file
/// (recorded automatically when the approval transition is applied).
pub fn apply_housing_transition(
    case: &HousingApplication,
    target: HousingStatus,
    actor: &str,
) -> Result<HousingApplication, TransitionError> {
    if target == case.status {
        return Ok(case.clone());
    }
    check_edge(case.status, target, case.locked)?;

    match target {
        HousingStatus::Approved => {
            let missing = housing_approval_blockers(case);
            if !missing.is_empty() {
                return Err(TransitionError::incomplete(target, missing));
            }
        }
        HousingStatus::Confirmed => {
            let missing = housing_confirmation_blockers(case);
            if !missing.is_empty() {
                return Err(TransitionError::incomplete(target, missing));
            }
        }
        _ => {}
    }

    let mut next = case.clone().with_status(target);
    match target {
        HousingStatus::Approved => {
            // Record the board decision so the confirmation gate has it on file
            if next.approval.is_none() {
                let today = Utc::now().date_naive();
                next = next.with_approval(ApprovalDetails {
                    approval_date: today,
                    approved_by: actor.to_string(),
                    comments: String::new(),
                    valid_until: today + Duration::days(APPROVAL_VALIDITY_DAYS),
                    conditions: None,
                });
            }
        }
        HousingStatus::Confirmed => {
            next = next.with_lock(format!("Case confirmed by {}.", actor));
        }
        HousingStatus::Rejected => {
            next = next.with_lock(format!("Application rejected by {}.", actor));
        }
        _ => {}
    }
    Ok(next)
}

/// Apply a status transition to a license.
///
/// Gate: activation requires every recorded fee to be paid.
pub fn apply_license_transition(
    license: &License,
    target: LicenseStatus,
    actor: &str,
) -> Result<License, TransitionError> {
    if target == license.status {
        return Ok(license.clone());
    }
    check_edge(license.status, target, license.locked)?;

    if target == LicenseStatus::Active {
        let missing = license_activation_blockers(license);
        if !missing.is_empty() {
            return Err(TransitionError::incomplete(target, missing));
        }
    }

    let next = license.clone().with_status(target);
    Ok(match target {
        LicenseStatus::Expired => next.with_lock("License has expired."),
        LicenseStatus::Rejected => {
            next.with_lock(format!("License application rejected by {}.", actor))
        }
        _ => next,
    })
}

/// Apply a status transition to one rezoning request owned by a plot.
///
/// Returns the plot with the request replaced. A locked plot forbids every
/// request transition. Gate: approval requires a recorded committee decision.
/// On approval the plot's zoning is updated to the requested designation.
pub fn apply_rezoning_transition(
    plot: &Plot,
    request_reference: &CaseReference,
    target: RezoningStatus,
    _actor: &str,
) -> Result<Plot, TransitionError> {
    let request = plot.rezoning_request(request_reference).ok_or_else(|| {
        TransitionError::CorruptState {
            reference: request_reference.to_string(),
            detail: format!("no such rezoning request on plot {}", plot.reference),
        }
    })?;

    if target == request.status {
        return Ok(plot.clone());
    }
    check_edge(request.status, target, plot.locked)?;

    if target == RezoningStatus::Approved {
        let missing = rezoning_approval_blockers(request);
        if !missing.is_empty() {
            return Err(TransitionError::incomplete(target, missing));
        }
    }

    let mut updated = request.clone();
    updated.status = target;
    updated.updated_at = crate::schemas::now_rfc3339();

    let requested_zoning = updated.requested_zoning;
    let mut next = plot.clone().with_rezoning_request(updated);
    if target == RezoningStatus::Approved {
        next.zoning = requested_zoning;
    }
    Ok(next)
}

/// Apply a status transition to a building plan.
///
/// Gate: approval requires every departmental checklist item to be approved.
pub fn apply_building_plan_transition(
    plan: &BuildingPlan,
    target: BuildingPlanStatus,
    actor: &str,
) -> Result<BuildingPlan, TransitionError> {
    if target == plan.status {
        return Ok(plan.clone());
    }
    check_edge(plan.status, target, plan.locked)?;

    if target == BuildingPlanStatus::Approved {
        let missing = building_plan_approval_blockers(plan);
        if !missing.is_empty() {
            return Err(TransitionError::incomplete(target, missing));
        }
    }

    let next = plan.clone().with_status(target);
    Ok(match target {
        BuildingPlanStatus::Approved => {
            next.with_lock(format!("Building plan approved by {}.", actor))
        }
        BuildingPlanStatus::Rejected => {
            next.with_lock(format!("Building plan rejected by {}.", actor))
        }
        _ => next,
    })
}
