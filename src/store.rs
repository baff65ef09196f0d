//! The record store
//!
//! Case records live as pretty-printed JSON under `.caseflow/cases/<kind>/`,
//! one file per reference. The store enforces the identity rules the engine
//! relies on: a reference is created once and never reassigned, a locked
//! record refuses updates, and nothing is ever hard-deleted (rejection is a
//! status, not a removal).
//!
//! Concurrent writers are an open gap carried over from the original system:
//! there is no version field or conflict detection; the last write wins.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::domain::housing_actionability;
use crate::errors::{CaseflowError, Result};
use crate::fs::{get_case_kind_dir, get_case_path, read_json, write_json};
use crate::schemas::{
    BuildingPlan, BuildingPlanStatus, CaseReference, HousingApplication, HousingStatus, License,
    Plot, PlotStatus,
};

/// The four kinds of case the store holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseKind {
    Housing,
    License,
    Plot,
    BuildingPlan,
}

impl CaseKind {
    pub const ALL: [CaseKind; 4] = [
        CaseKind::Housing,
        CaseKind::License,
        CaseKind::Plot,
        CaseKind::BuildingPlan,
    ];

    /// Directory name under `cases/`
    pub fn dir(self) -> &'static str {
        match self {
            CaseKind::Housing => "housing",
            CaseKind::License => "licenses",
            CaseKind::Plot => "plots",
            CaseKind::BuildingPlan => "building-plans",
        }
    }
}

impl std::fmt::Display for CaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir())
    }
}

impl std::str::FromStr for CaseKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "housing" => Ok(CaseKind::Housing),
            "licenses" => Ok(CaseKind::License),
            "plots" => Ok(CaseKind::Plot),
            "building-plans" => Ok(CaseKind::BuildingPlan),
            _ => Err(format!("Unknown case kind: {}", s)),
        }
    }
}

/// A persistable case record
pub trait CaseRecord: Serialize + DeserializeOwned + Clone {
    const KIND: CaseKind;

    fn reference(&self) -> &CaseReference;
    fn is_locked(&self) -> bool;
}

impl CaseRecord for HousingApplication {
    const KIND: CaseKind = CaseKind::Housing;

    fn reference(&self) -> &CaseReference {
        &self.reference
    }

    fn is_locked(&self) -> bool {
        self.locked
    }
}

impl CaseRecord for License {
    const KIND: CaseKind = CaseKind::License;

    fn reference(&self) -> &CaseReference {
        &self.reference
    }

    fn is_locked(&self) -> bool {
        self.locked
    }
}

impl CaseRecord for Plot {
    const KIND: CaseKind = CaseKind::Plot;

    fn reference(&self) -> &CaseReference {
        &self.reference
    }

    fn is_locked(&self) -> bool {
        self.locked
    }
}

impl CaseRecord for BuildingPlan {
    const KIND: CaseKind = CaseKind::BuildingPlan;

    fn reference(&self) -> &CaseReference {
        &self.reference
    }

    fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Derived dashboard counts over the whole store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_housing_applications: usize,
    pub locked_housing_cases: usize,
    pub inspection_queue: usize,
    pub total_licenses: usize,
    pub active_licenses: usize,
    pub renewals_due: usize,
    pub total_plots: usize,
    pub available_plots: usize,
    pub total_building_plans: usize,
    pub pending_building_plans: usize,
}

/// JSON-file record store rooted at a workspace directory
pub struct CaseStore {
    root: PathBuf,
}

impl CaseStore {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        CaseStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, kind: CaseKind, reference: &CaseReference) -> PathBuf {
        get_case_path(&self.root, kind.dir(), &reference.to_string())
    }

    /// Persist a new case. Fails if the reference is already taken.
    pub fn create<T: CaseRecord>(&self, record: &T) -> Result<()> {
        let path = self.path_for(T::KIND, record.reference());
        if path.exists() {
            return Err(CaseflowError::CaseExists(record.reference().to_string()));
        }
        debug!(reference = %record.reference(), kind = %T::KIND, "creating case");
        write_json(&path, record)
    }

    /// Persist an updated case.
    ///
    /// Fails if the case does not exist, or if the stored copy is locked: a
    /// locked case accepts no further mutation through the store.
    pub fn update<T: CaseRecord>(&self, record: &T) -> Result<()> {
        let path = self.path_for(T::KIND, record.reference());
        if !path.exists() {
            return Err(CaseflowError::CaseNotFound(record.reference().to_string()));
        }
        let stored: T = read_json(&path)?;
        if stored.is_locked() {
            return Err(CaseflowError::CaseLocked(record.reference().to_string()));
        }
        debug!(reference = %record.reference(), kind = %T::KIND, "updating case");
        write_json(&path, record)
    }

    /// Load one case by reference.
    pub fn find<T: CaseRecord>(&self, reference: &CaseReference) -> Result<Option<T>> {
        let path = self.path_for(T::KIND, reference);
        if !path.exists() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    /// Load every case of one kind, ordered by reference.
    pub fn list<T: CaseRecord>(&self) -> Result<Vec<T>> {
        let mut records: Vec<T> = Vec::new();
        for path in self.case_files(T::KIND)? {
            records.push(read_json(&path)?);
        }
        records.sort_by(|a, b| a.reference().cmp(b.reference()));
        Ok(records)
    }

    /// Every stored JSON file for one kind, for raw inspection.
    pub fn case_files(&self, kind: CaseKind) -> Result<Vec<PathBuf>> {
        let dir = get_case_kind_dir(&self.root, kind.dir());
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// All assigned references for one kind, parsed from file names.
    pub fn references(&self, kind: CaseKind) -> Result<Vec<CaseReference>> {
        let mut refs = Vec::new();
        for path in self.case_files(kind)? {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            let reference = stem
                .parse()
                .map_err(|e: String| CaseflowError::InvalidReference(e))?;
            refs.push(reference);
        }
        Ok(refs)
    }

    /// All rezoning request references across every stored plot.
    pub fn rezoning_references(&self) -> Result<Vec<CaseReference>> {
        let mut refs = Vec::new();
        for plot in self.list::<Plot>()? {
            for request in &plot.rezoning_requests {
                refs.push(request.reference.clone());
            }
        }
        Ok(refs)
    }

    /// Find the plot owning a rezoning request.
    pub fn find_plot_with_request(&self, reference: &CaseReference) -> Result<Option<Plot>> {
        for plot in self.list::<Plot>()? {
            if plot.rezoning_request(reference).is_some() {
                return Ok(Some(plot));
            }
        }
        Ok(None)
    }

    /// Compute the dashboard counts over every stored case.
    pub fn stats(&self, renewal_window_days: i64) -> Result<DashboardStats> {
        let housing = self.list::<HousingApplication>()?;
        let licenses = self.list::<License>()?;
        let plots = self.list::<Plot>()?;
        let plans = self.list::<BuildingPlan>()?;
        let today = Utc::now().date_naive();

        Ok(DashboardStats {
            total_housing_applications: housing.len(),
            locked_housing_cases: housing
                .iter()
                .filter(|c| housing_actionability(c).locked)
                .count(),
            inspection_queue: housing
                .iter()
                .filter(|c| c.status == HousingStatus::Inspection)
                .count(),
            total_licenses: licenses.len(),
            active_licenses: licenses
                .iter()
                .filter(|l| l.status == crate::schemas::LicenseStatus::Active)
                .count(),
            renewals_due: licenses
                .iter()
                .filter(|l| l.renewal_due(today, renewal_window_days))
                .count(),
            total_plots: plots.len(),
            available_plots: plots
                .iter()
                .filter(|p| p.status == PlotStatus::Available)
                .count(),
            total_building_plans: plans.len(),
            pending_building_plans: plans
                .iter()
                .filter(|p| p.status == BuildingPlanStatus::Pending)
                .count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::test_support::{
        sample_housing_application, sample_license, sample_plot,
    };
    use tempfile::TempDir;

    fn store() -> (TempDir, CaseStore) {
        let temp = TempDir::new().unwrap();
        let store = CaseStore::open(temp.path());
        (temp, store)
    }

    #[test]
    fn test_create_and_find() {
        let (_temp, store) = store();
        let case = sample_housing_application("HA-2025-001");

        store.create(&case).unwrap();
        let found: HousingApplication = store.find(&case.reference).unwrap().unwrap();
        assert_eq!(found, case);
    }

    #[test]
    fn test_create_twice_fails() {
        let (_temp, store) = store();
        let case = sample_housing_application("HA-2025-001");

        store.create(&case).unwrap();
        let err = store.create(&case).unwrap_err();
        assert!(matches!(err, CaseflowError::CaseExists(_)));
    }

    #[test]
    fn test_find_missing_is_none() {
        let (_temp, store) = store();
        let reference: CaseReference = "HA-2025-099".parse().unwrap();
        let found: Option<HousingApplication> = store.find(&reference).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_update_missing_fails() {
        let (_temp, store) = store();
        let case = sample_housing_application("HA-2025-001");
        let err = store.update(&case).unwrap_err();
        assert!(matches!(err, CaseflowError::CaseNotFound(_)));
    }

    #[test]
    fn test_update_locked_case_fails() {
        let (_temp, store) = store();
        let case = sample_housing_application("HA-2025-001")
            .with_status(HousingStatus::Confirmed)
            .with_lock("Case confirmed by Housing Board.");
        store.create(&case).unwrap();

        // Any further mutation of the stored locked case is refused
        let edited = case.clone().with_status(HousingStatus::Confirmed);
        let err = store.update(&edited).unwrap_err();
        assert!(matches!(err, CaseflowError::CaseLocked(_)));
    }

    #[test]
    fn test_update_may_persist_the_lock_itself() {
        let (_temp, store) = store();
        let case = sample_housing_application("HA-2025-001");
        store.create(&case).unwrap();

        // The write that locks the case is allowed; the stored copy is not locked yet
        let locked = case
            .with_status(HousingStatus::Confirmed)
            .with_lock("Case confirmed by Housing Board.");
        store.update(&locked).unwrap();

        let found: HousingApplication = store.find(&locked.reference).unwrap().unwrap();
        assert!(found.locked);
    }

    #[test]
    fn test_list_sorted_by_reference() {
        let (_temp, store) = store();
        store.create(&sample_housing_application("HA-2025-003")).unwrap();
        store.create(&sample_housing_application("HA-2025-001")).unwrap();
        store.create(&sample_housing_application("HA-2025-002")).unwrap();

        let all: Vec<HousingApplication> = store.list().unwrap();
        let refs: Vec<String> = all.iter().map(|c| c.reference.to_string()).collect();
        assert_eq!(refs, vec!["HA-2025-001", "HA-2025-002", "HA-2025-003"]);
    }

    #[test]
    fn test_list_empty_kind() {
        let (_temp, store) = store();
        let all: Vec<License> = store.list().unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn test_references_from_file_names() {
        let (_temp, store) = store();
        store.create(&sample_housing_application("HA-2025-001")).unwrap();
        store.create(&sample_housing_application("HA-2025-014")).unwrap();

        let refs = store.references(CaseKind::Housing).unwrap();
        assert_eq!(refs.len(), 2);
        assert!(refs.contains(&"HA-2025-014".parse().unwrap()));
    }

    #[test]
    fn test_rezoning_references_and_owner_lookup() {
        let (_temp, store) = store();
        store.create(&sample_plot("PLT-2025-001")).unwrap();

        let refs = store.rezoning_references().unwrap();
        assert_eq!(refs, vec!["RZ-2025-001".parse().unwrap()]);

        let owner = store
            .find_plot_with_request(&"RZ-2025-001".parse().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(owner.reference.to_string(), "PLT-2025-001");

        let none = store
            .find_plot_with_request(&"RZ-2025-099".parse().unwrap())
            .unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_stats() {
        let (_temp, store) = store();
        store.create(&sample_housing_application("HA-2025-001")).unwrap();
        store
            .create(
                &sample_housing_application("HA-2025-002").with_status(HousingStatus::Inspection),
            )
            .unwrap();
        store
            .create(
                &sample_housing_application("HA-2025-003")
                    .with_status(HousingStatus::Confirmed)
                    .with_lock("Case confirmed by Housing Board."),
            )
            .unwrap();
        store.create(&sample_license("BL-2025-001")).unwrap();
        store.create(&sample_plot("PLT-2025-001")).unwrap();

        let stats = store.stats(30).unwrap();
        assert_eq!(stats.total_housing_applications, 3);
        assert_eq!(stats.locked_housing_cases, 1);
        assert_eq!(stats.inspection_queue, 1);
        assert_eq!(stats.total_licenses, 1);
        assert_eq!(stats.active_licenses, 0);
        assert_eq!(stats.total_plots, 1);
        assert_eq!(stats.available_plots, 1);
        assert_eq!(stats.total_building_plans, 0);
    }
}
