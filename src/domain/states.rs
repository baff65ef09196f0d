//! Workflow state machines
//!
//! Each case kind carries its own status enumeration; the edge tables here are
//! the source of truth for which transitions exist. Unlike a linear pipeline,
//! three of the four machines branch (review stages can reject), so every
//! state maps to an explicit list of successors.

use crate::schemas::{BuildingPlanStatus, HousingStatus, LicenseStatus, RezoningStatus};

/// A workflow status with a defined start state and transition table.
pub trait CaseState: Copy + Eq + std::fmt::Display + Sized + 'static {
    /// The status a freshly created case starts in
    const INITIAL: Self;

    /// States reachable from this one in a single transition
    fn allowed_next(self) -> &'static [Self];

    /// A terminal state has no outgoing edges
    fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }
}

/// Housing applications:
///
/// ```text
/// draft -> pending -> inspection -> settlement_review -> approved -> confirmed
///                     inspection -> rejected
///                     settlement_review -> rejected
/// ```
///
/// `draft` is reachable only via an explicit save-as-draft; submission starts
/// at `pending`.
impl CaseState for HousingStatus {
    const INITIAL: Self = HousingStatus::Pending;

    fn allowed_next(self) -> &'static [Self] {
        match self {
            HousingStatus::Draft => &[HousingStatus::Pending],
            HousingStatus::Pending => &[HousingStatus::Inspection],
            HousingStatus::Inspection => {
                &[HousingStatus::SettlementReview, HousingStatus::Rejected]
            }
            HousingStatus::SettlementReview => {
                &[HousingStatus::Approved, HousingStatus::Rejected]
            }
            HousingStatus::Approved => &[HousingStatus::Confirmed],
            HousingStatus::Confirmed => &[],
            HousingStatus::Rejected => &[],
        }
    }
}

/// Licenses: a pending application is either activated or rejected; an active
/// license can be suspended and reinstated, and expires at end of validity.
impl CaseState for LicenseStatus {
    const INITIAL: Self = LicenseStatus::Pending;

    fn allowed_next(self) -> &'static [Self] {
        match self {
            LicenseStatus::Pending => &[LicenseStatus::Active, LicenseStatus::Rejected],
            LicenseStatus::Active => &[LicenseStatus::Suspended, LicenseStatus::Expired],
            LicenseStatus::Suspended => &[LicenseStatus::Active, LicenseStatus::Expired],
            LicenseStatus::Expired => &[],
            LicenseStatus::Rejected => &[],
        }
    }
}

/// Rezoning requests: drafted, put before the committee, then decided.
impl CaseState for RezoningStatus {
    const INITIAL: Self = RezoningStatus::Draft;

    fn allowed_next(self) -> &'static [Self] {
        match self {
            RezoningStatus::Draft => &[RezoningStatus::Submitted],
            RezoningStatus::Submitted => &[RezoningStatus::Approved, RezoningStatus::Rejected],
            RezoningStatus::Approved => &[],
            RezoningStatus::Rejected => &[],
        }
    }
}

/// Building plans: departmental checklist review, then a decision.
impl CaseState for BuildingPlanStatus {
    const INITIAL: Self = BuildingPlanStatus::Pending;

    fn allowed_next(self) -> &'static [Self] {
        match self {
            BuildingPlanStatus::Pending => &[BuildingPlanStatus::Review],
            BuildingPlanStatus::Review => {
                &[BuildingPlanStatus::Approved, BuildingPlanStatus::Rejected]
            }
            BuildingPlanStatus::Approved => &[],
            BuildingPlanStatus::Rejected => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_housing_edges() {
        assert_eq!(
            HousingStatus::Pending.allowed_next(),
            &[HousingStatus::Inspection]
        );
        assert_eq!(
            HousingStatus::Inspection.allowed_next(),
            &[HousingStatus::SettlementReview, HousingStatus::Rejected]
        );
        assert_eq!(
            HousingStatus::SettlementReview.allowed_next(),
            &[HousingStatus::Approved, HousingStatus::Rejected]
        );
        assert_eq!(
            HousingStatus::Approved.allowed_next(),
            &[HousingStatus::Confirmed]
        );
    }

    #[test]
    fn test_housing_initial_and_terminals() {
        assert_eq!(HousingStatus::INITIAL, HousingStatus::Pending);
        assert!(HousingStatus::Confirmed.is_terminal());
        assert!(HousingStatus::Rejected.is_terminal());
        assert!(!HousingStatus::Approved.is_terminal());
        assert!(!HousingStatus::Draft.is_terminal());
    }

    #[test]
    fn test_housing_no_jumps() {
        // The table never allows skipping straight to a decision
        assert!(!HousingStatus::Pending.allowed_next().contains(&HousingStatus::Approved));
        assert!(!HousingStatus::Pending.allowed_next().contains(&HousingStatus::Confirmed));
        assert!(!HousingStatus::Inspection.allowed_next().contains(&HousingStatus::Approved));
    }

    #[test]
    fn test_license_edges() {
        assert_eq!(LicenseStatus::INITIAL, LicenseStatus::Pending);
        assert_eq!(
            LicenseStatus::Pending.allowed_next(),
            &[LicenseStatus::Active, LicenseStatus::Rejected]
        );
        // Suspension is recoverable
        assert!(LicenseStatus::Suspended.allowed_next().contains(&LicenseStatus::Active));
        assert!(LicenseStatus::Expired.is_terminal());
        assert!(LicenseStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_rezoning_edges() {
        assert_eq!(RezoningStatus::INITIAL, RezoningStatus::Draft);
        assert_eq!(
            RezoningStatus::Draft.allowed_next(),
            &[RezoningStatus::Submitted]
        );
        assert!(RezoningStatus::Approved.is_terminal());
        assert!(RezoningStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_building_plan_edges() {
        assert_eq!(BuildingPlanStatus::INITIAL, BuildingPlanStatus::Pending);
        assert_eq!(
            BuildingPlanStatus::Pending.allowed_next(),
            &[BuildingPlanStatus::Review]
        );
        assert!(BuildingPlanStatus::Approved.is_terminal());
        assert!(BuildingPlanStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_rejected_is_a_sink_everywhere() {
        assert!(HousingStatus::Rejected.allowed_next().is_empty());
        assert!(LicenseStatus::Rejected.allowed_next().is_empty());
        assert!(RezoningStatus::Rejected.allowed_next().is_empty());
        assert!(BuildingPlanStatus::Rejected.allowed_next().is_empty());
    }
}
