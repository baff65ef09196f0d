//! Derived lock state
//!
//! The original system decided whether a record was editable by re-checking
//! status strings at every call site. Here the derivation happens once:
//! `*_actionability` combines the stored lock flag with the statuses that
//! imply read-only, and yields the message shown to the user.

use crate::schemas::{
    BuildingPlan, BuildingPlanStatus, HousingApplication, HousingStatus, License, LicenseStatus,
    Plot,
};

/// Whether a case accepts workflow actions, and why not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actionability {
    pub locked: bool,
    /// Human-readable explanation; `None` exactly when unlocked
    pub reason: Option<String>,
}

impl Actionability {
    fn unlocked() -> Self {
        Actionability {
            locked: false,
            reason: None,
        }
    }

    fn locked(reason: impl Into<String>) -> Self {
        Actionability {
            locked: true,
            reason: Some(reason.into()),
        }
    }
}

/// Derive the actionability of a housing application.
///
/// `approved` and `confirmed` imply read-only even when the stored flag was
/// never set; an explicit lock reason always wins over the synthesized one.
pub fn housing_actionability(case: &HousingApplication) -> Actionability {
    let synthesized = match case.status {
        HousingStatus::Confirmed => Some("Application has been confirmed and is read-only."),
        HousingStatus::Approved => Some("Application has been approved."),
        HousingStatus::Rejected => Some("Application was rejected."),
        _ => None,
    };

    if case.locked {
        return Actionability::locked(
            case.lock_reason
                .clone()
                .or_else(|| synthesized.map(String::from))
                .unwrap_or_else(|| "Case is locked.".to_string()),
        );
    }
    match synthesized {
        Some(reason) => Actionability::locked(reason),
        None => Actionability::unlocked(),
    }
}

/// Derive the actionability of a license.
pub fn license_actionability(license: &License) -> Actionability {
    let synthesized = match license.status {
        LicenseStatus::Expired => Some("License has expired."),
        LicenseStatus::Rejected => Some("License application was rejected."),
        _ => None,
    };

    if license.locked {
        return Actionability::locked(
            license
                .lock_reason
                .clone()
                .or_else(|| synthesized.map(String::from))
                .unwrap_or_else(|| "License is locked.".to_string()),
        );
    }
    match synthesized {
        Some(reason) => Actionability::locked(reason),
        None => Actionability::unlocked(),
    }
}

/// Derive the actionability of a plot. Plots are locked only explicitly.
pub fn plot_actionability(plot: &Plot) -> Actionability {
    if plot.locked {
        Actionability::locked(
            plot.lock_reason
                .clone()
                .unwrap_or_else(|| "Plot is locked.".to_string()),
        )
    } else {
        Actionability::unlocked()
    }
}

/// Derive the actionability of a building plan.
pub fn building_plan_actionability(plan: &BuildingPlan) -> Actionability {
    let synthesized = match plan.status {
        BuildingPlanStatus::Approved => Some("Building plan has been approved."),
        BuildingPlanStatus::Rejected => Some("Building plan was rejected."),
        _ => None,
    };

    if plan.locked {
        return Actionability::locked(
            plan.lock_reason
                .clone()
                .or_else(|| synthesized.map(String::from))
                .unwrap_or_else(|| "Building plan is locked.".to_string()),
        );
    }
    match synthesized {
        Some(reason) => Actionability::locked(reason),
        None => Actionability::unlocked(),
    }
}
