//! Schema types for caseflow
//!
//! On-disk shapes stay compatible with the original system's JSON records:
//! status strings are lowercase/snake_case and timestamps are RFC 3339.

mod config;
mod housing;
mod licensing;
mod planning;
mod reference;
mod shared;

#[cfg(test)]
pub mod test_support;

pub use config::{AttachmentConfig, Config, ReferencePrefixes};
pub use housing::{
    ApprovalDetails, HouseholdMember, HouseholdRecord, HousingApplication, HousingStatus,
    InspectionReport, InspectionStatus, PropertyType, SettlementRecord, UtilityAccess,
};
pub use licensing::{
    BusinessDetails, FeeStatus, License, LicenseFee, LicenseStatus, LicenseTypeRegistry,
    MIN_TYPE_KEY_LEN,
};
pub use planning::{
    renumber_gps_points, BuildingPlan, BuildingPlanStatus, ChecklistItem, ChecklistStatus,
    GpsPoint, PlanType, Plot, PlotStatus, RezoningRequest, RezoningStatus, ZoningType,
};
pub use reference::{next_reference, CaseReference, SEQ_PAD_WIDTH};
pub use shared::{now_rfc3339, Attachment, Coordinates, GeoLocation};
