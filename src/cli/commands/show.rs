//! Show command - display one case

use std::path::Path;

use crate::domain::{
    building_plan_actionability, housing_actionability, license_actionability,
    plot_actionability, Actionability,
};
use crate::errors::{CaseflowError, Result};
use crate::schemas::{BuildingPlan, HousingApplication, License, Plot};

use super::{open_workspace, Target};

fn print_lock_state(actionability: &Actionability) {
    match &actionability.reason {
        Some(reason) => println!("  locked: yes ({})", reason),
        None => println!("  locked: no"),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| CaseflowError::InvalidJson(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}

/// Show the referenced case
pub async fn run(cwd: Option<&Path>, reference: &str, json: bool) -> Result<()> {
    let ws = open_workspace(cwd)?;
    let (reference, target) = ws.target_for(reference)?;

    match target {
        Target::Housing => {
            let case: HousingApplication = ws
                .store
                .find(&reference)?
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            if json {
                return print_json(&case);
            }
            println!("{} - {} ({})", case.reference, case.applicant_name, case.status);
            println!("  settlement: {}", case.settlement_area);
            println!("  household: {} member(s)", case.household.members.len());
            println!("  documents: {} file(s)", case.documents.len());
            for report in &case.inspection_reports {
                println!(
                    "  inspection {}: {} by {} ({})",
                    report.id, report.inspection_date, report.inspector, report.status
                );
            }
            print_lock_state(&housing_actionability(&case));
        }
        Target::License => {
            let license: License = ws
                .store
                .find(&reference)?
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            if json {
                return print_json(&license);
            }
            println!(
                "{} - {} ({}, {})",
                license.reference, license.business.name, license.type_key, license.status
            );
            println!("  valid: {} to {}", license.valid_from, license.valid_until);
            println!(
                "  fees: {} line(s), settled: {}",
                license.fees.len(),
                if license.fees_settled() { "yes" } else { "no" }
            );
            print_lock_state(&license_actionability(&license));
        }
        Target::Plot => {
            let plot: Plot = ws
                .store
                .find(&reference)?
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            if json {
                return print_json(&plot);
            }
            println!("{} - {} ({})", plot.reference, plot.location.address, plot.status);
            println!("  zoning: {}", plot.zoning);
            println!("  boundary: {} point(s)", plot.gps_points.len());
            println!("  rezoning requests: {}", plot.rezoning_requests.len());
            print_lock_state(&plot_actionability(&plot));
        }
        Target::Rezoning => {
            let plot = ws
                .store
                .find_plot_with_request(&reference)?
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            let request = plot
                .rezoning_request(&reference)
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            if json {
                return print_json(request);
            }
            println!(
                "{} - {} -> {} ({}) on plot {}",
                request.reference,
                request.current_zoning,
                request.requested_zoning,
                request.status,
                plot.reference
            );
            match &request.committee_decision {
                Some(decision) => println!("  committee: {}", decision),
                None => println!("  committee: no decision recorded"),
            }
        }
        Target::BuildingPlan => {
            let plan: BuildingPlan = ws
                .store
                .find(&reference)?
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            if json {
                return print_json(&plan);
            }
            let approved = plan
                .checklist
                .iter()
                .filter(|i| i.status == crate::schemas::ChecklistStatus::Approved)
                .count();
            println!(
                "{} - plot {} ({})",
                plan.reference, plan.plot_reference, plan.status
            );
            println!("  checklist: {} of {} item(s) approved", approved, plan.checklist.len());
            print_lock_state(&building_plan_actionability(&plan));
        }
    }
    Ok(())
}
