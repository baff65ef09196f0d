//! New command - create a case from a draft file

use std::path::Path;

use tracing::info;

use crate::config::save_config;
use crate::domain::{
    validate_building_plan_create, validate_housing_create, validate_license_create,
    validate_plot_create, BuildingPlanDraft, HousingDraft, LicenseDraft, PlotDraft,
};
use crate::errors::{CaseflowError, Result};
use crate::fs::read_json;
use crate::schemas::HousingStatus;
use crate::store::{CaseKind, CaseStore};

use super::{open_workspace, print_violations, Workspace};

fn read_draft<T: serde::de::DeserializeOwned>(file: &Path) -> Result<T> {
    read_json(file)
}

/// Create a housing ownership application from a draft file
pub async fn run_housing(
    cwd: Option<&Path>,
    file: &Path,
    save_as_draft: bool,
    dry_run: bool,
) -> Result<()> {
    let ws = open_workspace(cwd)?;
    let draft: HousingDraft = read_draft(file)?;
    let existing = ws.store.references(CaseKind::Housing)?;

    let case = match validate_housing_create(&draft, &existing, &ws.config.prefixes.housing) {
        Ok(case) => case,
        Err(err) => {
            print_violations(&err);
            return Err(err.into());
        }
    };
    let case = if save_as_draft {
        case.with_status(HousingStatus::Draft)
    } else {
        case
    };

    if dry_run {
        println!("Would create housing application {}", case.reference);
        return Ok(());
    }

    ws.store.create(&case)?;
    info!(reference = %case.reference, "created housing application");
    println!("Created housing application {} ({})", case.reference, case.status);
    Ok(())
}

/// Create a license from a draft file
pub async fn run_license(cwd: Option<&Path>, file: &Path, dry_run: bool) -> Result<()> {
    let mut ws = open_workspace(cwd)?;
    let draft: LicenseDraft = read_draft(file)?;
    let registry = ws.config.license_registry();
    let existing = ws.store.references(CaseKind::License)?;

    let validated =
        match validate_license_create(&draft, &registry, &existing, &ws.config.prefixes.license) {
            Ok(v) => v,
            Err(err) => {
                print_violations(&err);
                return Err(err.into());
            }
        };

    if dry_run {
        println!("Would create license {}", validated.license.reference);
        return Ok(());
    }

    if let Some(new_type) = &validated.registered_type {
        ws.config.license_types.push(new_type.clone());
        save_config(&ws.root, &ws.config)?;
        println!("Registered new license type: {}", new_type);
    }

    ws.store.create(&validated.license)?;
    info!(reference = %validated.license.reference, "created license");
    println!(
        "Created license {} ({})",
        validated.license.reference, validated.license.type_key
    );
    Ok(())
}

/// Register a plot from a draft file
pub async fn run_plot(cwd: Option<&Path>, file: &Path, dry_run: bool) -> Result<()> {
    let ws = open_workspace(cwd)?;
    let draft: PlotDraft = read_draft(file)?;
    let existing = ws.store.references(CaseKind::Plot)?;

    let plot = match validate_plot_create(&draft, &existing, &ws.config.prefixes.plot) {
        Ok(plot) => plot,
        Err(err) => {
            print_violations(&err);
            return Err(err.into());
        }
    };

    if dry_run {
        println!("Would register plot {}", plot.reference);
        return Ok(());
    }

    ws.store.create(&plot)?;
    info!(reference = %plot.reference, "registered plot");
    println!(
        "Registered plot {} ({} point boundary)",
        plot.reference,
        plot.gps_points.len()
    );
    Ok(())
}

/// Create a building plan from a draft file
pub async fn run_building_plan(cwd: Option<&Path>, file: &Path, dry_run: bool) -> Result<()> {
    let ws = open_workspace(cwd)?;
    let draft: BuildingPlanDraft = read_draft(file)?;

    ensure_plot_exists(&ws, &draft)?;
    let existing = ws.store.references(CaseKind::BuildingPlan)?;

    let plan =
        match validate_building_plan_create(&draft, &existing, &ws.config.prefixes.building_plan) {
            Ok(plan) => plan,
            Err(err) => {
                print_violations(&err);
                return Err(err.into());
            }
        };

    if dry_run {
        println!("Would create building plan {}", plan.reference);
        return Ok(());
    }

    ws.store.create(&plan)?;
    info!(reference = %plan.reference, "created building plan");
    println!(
        "Created building plan {} against {}",
        plan.reference, plan.plot_reference
    );
    Ok(())
}

/// Referential check the engine cannot do itself: the plot must be on file.
fn ensure_plot_exists(ws: &Workspace, draft: &BuildingPlanDraft) -> Result<()> {
    let store: &CaseStore = &ws.store;
    if store
        .find::<crate::schemas::Plot>(&draft.plot_reference)?
        .is_none()
    {
        return Err(CaseflowError::CaseNotFound(draft.plot_reference.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::init;
    use crate::schemas::{HousingApplication, License, Plot};
    use crate::store::CaseStore;
    use std::fs;
    use tempfile::TempDir;

    async fn workspace() -> TempDir {
        let temp = TempDir::new().unwrap();
        init::run(Some(temp.path()), false, false).await.unwrap();
        temp
    }

    fn write_draft(temp: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = temp.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    const HOUSING_DRAFT: &str = r#"{
        "applicant_name": "John Doe",
        "property_type": "house",
        "settlement_area": "Riverside Extension",
        "monthly_income": 15000,
        "documents": [{
            "id": "DOC-1",
            "file_name": "ID Document.pdf",
            "content_type": "application/pdf",
            "file_size": 256000,
            "url": "attachments/doc-1.pdf"
        }],
        "contact_number": "+260977123456",
        "members": [{
            "name": "Jane Doe",
            "age": 34,
            "relationship": "Spouse",
            "employed": true
        }],
        "inspection_date": "2025-02-15",
        "inspector": "Mary Mumba"
    }"#;

    #[tokio::test]
    async fn test_new_housing_creates_pending_case() {
        let temp = workspace().await;
        let draft = write_draft(&temp, "draft.json", HOUSING_DRAFT);

        run_housing(Some(temp.path()), &draft, false, false).await.unwrap();

        let store = CaseStore::open(temp.path());
        let cases: Vec<HousingApplication> = store.list().unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].status, HousingStatus::Pending);
        assert!(!cases[0].locked);
        assert_eq!(cases[0].reference.prefix(), "HA");
    }

    #[tokio::test]
    async fn test_new_housing_save_as_draft() {
        let temp = workspace().await;
        let draft = write_draft(&temp, "draft.json", HOUSING_DRAFT);

        run_housing(Some(temp.path()), &draft, true, false).await.unwrap();

        let store = CaseStore::open(temp.path());
        let cases: Vec<HousingApplication> = store.list().unwrap();
        assert_eq!(cases[0].status, HousingStatus::Draft);
    }

    #[tokio::test]
    async fn test_new_housing_invalid_draft_reports_violations() {
        let temp = workspace().await;
        let draft = write_draft(
            &temp,
            "draft.json",
            r#"{
                "applicant_name": "",
                "property_type": "house",
                "settlement_area": "Riverside Extension",
                "monthly_income": 0
            }"#,
        );

        let err = run_housing(Some(temp.path()), &draft, false, false)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION");

        let store = CaseStore::open(temp.path());
        let cases: Vec<HousingApplication> = store.list().unwrap();
        assert!(cases.is_empty());
    }

    #[tokio::test]
    async fn test_new_housing_dry_run() {
        let temp = workspace().await;
        let draft = write_draft(&temp, "draft.json", HOUSING_DRAFT);

        run_housing(Some(temp.path()), &draft, false, true).await.unwrap();

        let store = CaseStore::open(temp.path());
        let cases: Vec<HousingApplication> = store.list().unwrap();
        assert!(cases.is_empty());
    }

    #[tokio::test]
    async fn test_new_license_registers_custom_type() {
        let temp = workspace().await;
        let draft = write_draft(
            &temp,
            "license.json",
            r#"{
                "custom_type": "Hawker",
                "business": {
                    "name": "Sample Business Ltd",
                    "trading_name": "Sample Store",
                    "registration_number": "REG123",
                    "email": "contact@sample.com"
                },
                "valid_from": "2025-01-01",
                "valid_until": "2025-12-31",
                "initial_fee": 1000
            }"#,
        );

        run_license(Some(temp.path()), &draft, false).await.unwrap();

        let config = crate::config::load_config(temp.path()).unwrap();
        assert!(config.license_registry().contains("hawker"));

        let store = CaseStore::open(temp.path());
        let licenses: Vec<License> = store.list().unwrap();
        assert_eq!(licenses[0].type_key, "hawker");
    }

    #[tokio::test]
    async fn test_new_plot_boundary_rule() {
        let temp = workspace().await;
        let two_points = write_draft(
            &temp,
            "plot2.json",
            r#"{
                "location": {"latitude": -15.3875, "longitude": 28.3228, "address": "123 Development Zone"},
                "size": 1000,
                "zoning": "residential",
                "gps_points": [
                    {"latitude": -15.3875, "longitude": 28.3228, "order": 1},
                    {"latitude": -15.3876, "longitude": 28.3229, "order": 2}
                ]
            }"#,
        );

        let err = run_plot(Some(temp.path()), &two_points, false).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION");

        let three_points = write_draft(
            &temp,
            "plot3.json",
            r#"{
                "location": {"latitude": -15.3875, "longitude": 28.3228, "address": "123 Development Zone"},
                "size": 1000,
                "zoning": "residential",
                "gps_points": [
                    {"latitude": -15.3875, "longitude": 28.3228, "order": 1},
                    {"latitude": -15.3876, "longitude": 28.3229, "order": 2},
                    {"latitude": -15.3877, "longitude": 28.3228, "order": 3}
                ]
            }"#,
        );

        run_plot(Some(temp.path()), &three_points, false).await.unwrap();

        let store = CaseStore::open(temp.path());
        let plots: Vec<Plot> = store.list().unwrap();
        assert_eq!(plots.len(), 1);
    }

    #[tokio::test]
    async fn test_new_building_plan_requires_existing_plot() {
        let temp = workspace().await;
        let draft = write_draft(
            &temp,
            "plan.json",
            r#"{
                "plot_reference": "PLT-2025-001",
                "plan_type": "new",
                "checklist": [
                    {"department": "Engineering", "requirement": "Structural Analysis"}
                ]
            }"#,
        );

        let err = run_building_plan(Some(temp.path()), &draft, false)
            .await
            .unwrap_err();
        assert!(matches!(err, CaseflowError::CaseNotFound(_)));
    }
}
