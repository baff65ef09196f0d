//! Transition command - apply a workflow status change to a case

use std::path::Path;

use tracing::info;

use crate::domain::{
    apply_building_plan_transition, apply_housing_transition, apply_license_transition,
    apply_rezoning_transition,
};
use crate::errors::{CaseflowError, Result};
use crate::schemas::{BuildingPlan, HousingApplication, License};

use super::{open_workspace, Target};

fn parse_status<S: std::str::FromStr<Err = String>>(raw: &str) -> Result<S> {
    raw.parse().map_err(CaseflowError::InvalidJson)
}

/// Apply a workflow transition to the referenced case
pub async fn run(
    cwd: Option<&Path>,
    reference: &str,
    status: &str,
    actor: &str,
    dry_run: bool,
) -> Result<()> {
    let ws = open_workspace(cwd)?;
    let (reference, target) = ws.target_for(reference)?;

    match target {
        Target::Housing => {
            let case: HousingApplication = ws
                .store
                .find(&reference)?
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            let next = apply_housing_transition(&case, parse_status(status)?, actor)?;
            if dry_run {
                println!("Would move {} from {} to {}", reference, case.status, next.status);
                return Ok(());
            }
            if next != case {
                ws.store.update(&next)?;
            }
            report(&reference.to_string(), &case.status.to_string(), &next.status.to_string());
            if next.locked {
                println!("Case is now locked: {}", next.lock_reason.as_deref().unwrap_or(""));
            }
        }
        Target::License => {
            let license: License = ws
                .store
                .find(&reference)?
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            let next = apply_license_transition(&license, parse_status(status)?, actor)?;
            if dry_run {
                println!("Would move {} from {} to {}", reference, license.status, next.status);
                return Ok(());
            }
            if next != license {
                ws.store.update(&next)?;
            }
            report(&reference.to_string(), &license.status.to_string(), &next.status.to_string());
        }
        Target::Rezoning => {
            let plot = ws
                .store
                .find_plot_with_request(&reference)?
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            let before = plot
                .rezoning_request(&reference)
                .map(|r| r.status.to_string())
                .unwrap_or_default();
            let next = apply_rezoning_transition(&plot, &reference, parse_status(status)?, actor)?;
            if dry_run {
                println!("Would move {} from {} to {}", reference, before, status);
                return Ok(());
            }
            if next != plot {
                ws.store.update(&next)?;
            }
            report(&reference.to_string(), &before, status);
        }
        Target::BuildingPlan => {
            let plan: BuildingPlan = ws
                .store
                .find(&reference)?
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            let next = apply_building_plan_transition(&plan, parse_status(status)?, actor)?;
            if dry_run {
                println!("Would move {} from {} to {}", reference, plan.status, next.status);
                return Ok(());
            }
            if next != plan {
                ws.store.update(&next)?;
            }
            report(&reference.to_string(), &plan.status.to_string(), &next.status.to_string());
        }
        Target::Plot => {
            return Err(CaseflowError::InvalidReference(format!(
                "{} is a plot; plots have no workflow transitions (rezoning requests do)",
                reference
            )));
        }
    }

    info!(reference = %reference, status = %status, actor = %actor, "applied transition");
    Ok(())
}

fn report(reference: &str, from: &str, to: &str) {
    if from == to {
        println!("{} already {}; nothing to do", reference, to);
    } else {
        println!("{}: {} -> {}", reference, from, to);
    }
}
