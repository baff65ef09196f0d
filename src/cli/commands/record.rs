//! Record command - capture sub-record outcomes that gate transitions

use std::path::Path;

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::errors::{CaseflowError, Result};
use crate::schemas::{
    BuildingPlan, ChecklistStatus, HousingApplication, InspectionStatus, License,
};

use super::open_workspace;

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| CaseflowError::InvalidJson(format!("bad date {}: {}", raw, e)))
}

/// Record an inspection outcome on a housing application
pub async fn run_inspection(
    cwd: Option<&Path>,
    reference: &str,
    report_id: &str,
    outcome: &str,
    dry_run: bool,
) -> Result<()> {
    let ws = open_workspace(cwd)?;
    let (reference, _) = ws.target_for(reference)?;
    let case: HousingApplication = ws
        .store
        .find(&reference)?
        .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;

    let status = match outcome {
        "passed" => InspectionStatus::Passed,
        "failed" => InspectionStatus::Failed,
        other => {
            return Err(CaseflowError::InvalidJson(format!(
                "inspection outcome must be passed or failed, got {}",
                other
            )))
        }
    };

    if case.inspection_reports.iter().all(|r| r.id != report_id) {
        return Err(CaseflowError::CaseNotFound(format!(
            "no inspection report {} on {}",
            report_id, reference
        )));
    }

    if dry_run {
        println!("Would mark inspection {} on {} as {}", report_id, reference, outcome);
        return Ok(());
    }

    ws.store
        .update(&case.with_inspection_status(report_id, status))?;
    info!(reference = %reference, report = %report_id, outcome = %outcome, "recorded inspection");
    println!("Recorded inspection {} on {}: {}", report_id, reference, outcome);
    Ok(())
}

/// Record a fee payment on a license
pub async fn run_fee_payment(
    cwd: Option<&Path>,
    reference: &str,
    fee_id: &str,
    dry_run: bool,
) -> Result<()> {
    let ws = open_workspace(cwd)?;
    let (reference, _) = ws.target_for(reference)?;
    let license: License = ws
        .store
        .find(&reference)?
        .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;

    if license.fees.iter().all(|f| f.id != fee_id) {
        return Err(CaseflowError::CaseNotFound(format!(
            "no fee {} on {}",
            fee_id, reference
        )));
    }

    if dry_run {
        println!("Would mark fee {} on {} as paid", fee_id, reference);
        return Ok(());
    }

    ws.store
        .update(&license.with_fee_paid(fee_id, Utc::now().date_naive()))?;
    info!(reference = %reference, fee = %fee_id, "recorded fee payment");
    println!("Recorded payment of fee {} on {}", fee_id, reference);
    Ok(())
}

/// Record a committee decision on a rezoning request
pub async fn run_committee_decision(
    cwd: Option<&Path>,
    reference: &str,
    decision: &str,
    meeting_date: &str,
    dry_run: bool,
) -> Result<()> {
    let ws = open_workspace(cwd)?;
    let (reference, _) = ws.target_for(reference)?;
    let meeting_date = parse_date(meeting_date)?;

    let plot = ws
        .store
        .find_plot_with_request(&reference)?
        .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;

    if dry_run {
        println!("Would record committee decision on {}", reference);
        return Ok(());
    }

    let mut request = plot
        .rezoning_request(&reference)
        .cloned()
        .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
    request.committee_decision = Some(decision.trim().to_string());
    request.meeting_date = Some(meeting_date);
    request.updated_at = crate::schemas::now_rfc3339();

    ws.store.update(&plot.with_rezoning_request(request))?;
    info!(reference = %reference, "recorded committee decision");
    println!("Recorded committee decision on {}", reference);
    Ok(())
}

/// Record a checklist sign-off on a building plan
pub async fn run_checklist(
    cwd: Option<&Path>,
    reference: &str,
    item_id: &str,
    outcome: &str,
    by: &str,
    dry_run: bool,
) -> Result<()> {
    let ws = open_workspace(cwd)?;
    let (reference, _) = ws.target_for(reference)?;
    let plan: BuildingPlan = ws
        .store
        .find(&reference)?
        .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;

    let status = match outcome {
        "approved" => ChecklistStatus::Approved,
        "rejected" => ChecklistStatus::Rejected,
        other => {
            return Err(CaseflowError::InvalidJson(format!(
                "checklist outcome must be approved or rejected, got {}",
                other
            )))
        }
    };

    if plan.checklist.iter().all(|i| i.id != item_id) {
        return Err(CaseflowError::CaseNotFound(format!(
            "no checklist item {} on {}",
            item_id, reference
        )));
    }

    if dry_run {
        println!("Would mark checklist item {} on {} as {}", item_id, reference, outcome);
        return Ok(());
    }

    ws.store.update(&plan.with_checklist_status(
        item_id,
        status,
        by,
        Utc::now().date_naive(),
    ))?;
    info!(reference = %reference, item = %item_id, outcome = %outcome, "recorded checklist sign-off");
    println!("Recorded checklist item {} on {}: {}", item_id, reference, outcome);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::init;
    use crate::schemas::test_support::{sample_housing_application, sample_license, sample_plot};
    use crate::schemas::{HousingStatus, Plot};
    use crate::store::CaseStore;
    use tempfile::TempDir;

    async fn workspace() -> (TempDir, CaseStore) {
        let temp = TempDir::new().unwrap();
        init::run(Some(temp.path()), false, false).await.unwrap();
        let store = CaseStore::open(temp.path());
        (temp, store)
    }

    #[tokio::test]
    async fn test_record_inspection_passed() {
        let (temp, store) = workspace().await;
        store.create(&sample_housing_application("HA-2025-001")).unwrap();

        run_inspection(Some(temp.path()), "HA-2025-001", "INSP-1", "passed", false)
            .await
            .unwrap();

        let case: HousingApplication = store
            .find(&"HA-2025-001".parse().unwrap())
            .unwrap()
            .unwrap();
        assert!(case.inspections_complete());
    }

    #[tokio::test]
    async fn test_record_inspection_bad_outcome() {
        let (temp, store) = workspace().await;
        store.create(&sample_housing_application("HA-2025-001")).unwrap();

        let err = run_inspection(Some(temp.path()), "HA-2025-001", "INSP-1", "maybe", false)
            .await
            .unwrap_err();
        assert!(matches!(err, CaseflowError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn test_record_inspection_unknown_report() {
        let (temp, store) = workspace().await;
        store.create(&sample_housing_application("HA-2025-001")).unwrap();

        let err = run_inspection(Some(temp.path()), "HA-2025-001", "INSP-9", "passed", false)
            .await
            .unwrap_err();
        assert!(matches!(err, CaseflowError::CaseNotFound(_)));
    }

    #[tokio::test]
    async fn test_record_inspection_on_locked_case_refused() {
        let (temp, store) = workspace().await;
        store
            .create(
                &sample_housing_application("HA-2025-001")
                    .with_status(HousingStatus::Confirmed)
                    .with_lock("Case confirmed by Housing Board."),
            )
            .unwrap();

        let err = run_inspection(Some(temp.path()), "HA-2025-001", "INSP-1", "passed", false)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "CASE_LOCKED");
    }

    #[tokio::test]
    async fn test_record_fee_payment() {
        let (temp, store) = workspace().await;
        store.create(&sample_license("BL-2025-001")).unwrap();

        run_fee_payment(Some(temp.path()), "BL-2025-001", "FEE-1", false)
            .await
            .unwrap();

        let license: License = store.find(&"BL-2025-001".parse().unwrap()).unwrap().unwrap();
        assert!(license.fees_settled());
    }

    #[tokio::test]
    async fn test_record_committee_decision() {
        let (temp, store) = workspace().await;
        store.create(&sample_plot("PLT-2025-001")).unwrap();

        run_committee_decision(
            Some(temp.path()),
            "RZ-2025-001",
            "Approved for mixed use.",
            "2025-04-02",
            false,
        )
        .await
        .unwrap();

        let plot: Plot = store.find(&"PLT-2025-001".parse().unwrap()).unwrap().unwrap();
        let request = plot.rezoning_request(&"RZ-2025-001".parse().unwrap()).unwrap();
        assert!(request.committee_decision_recorded());
    }

    #[tokio::test]
    async fn test_record_committee_decision_bad_date() {
        let (temp, store) = workspace().await;
        store.create(&sample_plot("PLT-2025-001")).unwrap();

        let err = run_committee_decision(
            Some(temp.path()),
            "RZ-2025-001",
            "Approved.",
            "02/04/2025",
            false,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CaseflowError::InvalidJson(_)));
    }
}
