//! List command - list cases with optional filtering

use std::path::Path;

use serde::Serialize;

use crate::domain::{
    building_plan_actionability, housing_actionability, license_actionability, plot_actionability,
};
use crate::errors::{CaseflowError, Result};
use crate::schemas::{BuildingPlan, HousingApplication, License, Plot};
use crate::store::CaseKind;

use super::{open_workspace, Workspace};

/// One row of list output
#[derive(Debug, Serialize)]
struct ListRow {
    reference: String,
    kind: &'static str,
    title: String,
    status: String,
    locked: bool,
}

fn rows_for(ws: &Workspace, kind: CaseKind) -> Result<Vec<ListRow>> {
    let rows = match kind {
        CaseKind::Housing => ws
            .store
            .list::<HousingApplication>()?
            .iter()
            .map(|c| ListRow {
                reference: c.reference.to_string(),
                kind: "housing",
                title: c.applicant_name.clone(),
                status: c.status.to_string(),
                locked: housing_actionability(c).locked,
            })
            .collect(),
        CaseKind::License => ws
            .store
            .list::<License>()?
            .iter()
            .map(|l| ListRow {
                reference: l.reference.to_string(),
                kind: "licenses",
                title: l.business.name.clone(),
                status: l.status.to_string(),
                locked: license_actionability(l).locked,
            })
            .collect(),
        CaseKind::Plot => ws
            .store
            .list::<Plot>()?
            .iter()
            .map(|p| ListRow {
                reference: p.reference.to_string(),
                kind: "plots",
                title: p.location.address.clone(),
                status: p.status.to_string(),
                locked: plot_actionability(p).locked,
            })
            .collect(),
        CaseKind::BuildingPlan => ws
            .store
            .list::<BuildingPlan>()?
            .iter()
            .map(|p| ListRow {
                reference: p.reference.to_string(),
                kind: "building-plans",
                title: p.plot_reference.to_string(),
                status: p.status.to_string(),
                locked: building_plan_actionability(p).locked,
            })
            .collect(),
    };
    Ok(rows)
}

/// List cases, optionally restricted to one kind and/or status
pub async fn run(
    cwd: Option<&Path>,
    kind: Option<&str>,
    status: Option<&str>,
    json: bool,
) -> Result<()> {
    let ws = open_workspace(cwd)?;

    let kinds: Vec<CaseKind> = match kind {
        Some(raw) => vec![raw.parse().map_err(CaseflowError::InvalidJson)?],
        None => CaseKind::ALL.to_vec(),
    };

    let mut rows = Vec::new();
    for kind in kinds {
        rows.extend(rows_for(&ws, kind)?);
    }
    if let Some(status) = status {
        rows.retain(|r| r.status == status);
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&rows)
                .map_err(|e| CaseflowError::InvalidJson(e.to_string()))?
        );
        return Ok(());
    }

    if rows.is_empty() {
        println!("No cases found");
        return Ok(());
    }
    for row in &rows {
        println!(
            "{:<14} {:<15} {:<24} {}{}",
            row.reference,
            row.kind,
            row.title,
            row.status,
            if row.locked { " [locked]" } else { "" }
        );
    }
    Ok(())
}
