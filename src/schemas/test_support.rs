//! Sample records shared across test modules

use chrono::NaiveDate;

use super::housing::{
    HouseholdMember, HouseholdRecord, HousingApplication, HousingStatus, InspectionReport,
    InspectionStatus, PropertyType, SettlementRecord, UtilityAccess,
};
use super::licensing::{BusinessDetails, FeeStatus, License, LicenseFee, LicenseStatus};
use super::planning::{
    BuildingPlan, BuildingPlanStatus, ChecklistItem, ChecklistStatus, GpsPoint, PlanType, Plot,
    PlotStatus, RezoningRequest, RezoningStatus, ZoningType,
};
use super::reference::CaseReference;
use super::shared::{now_rfc3339, Attachment, Coordinates, GeoLocation};

pub fn sample_attachment(id: &str) -> Attachment {
    Attachment {
        id: id.to_string(),
        file_name: "ID Document.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        file_size: 256_000,
        url: format!("attachments/{}.pdf", id),
    }
}

/// A pending housing application with one scheduled inspection and one
/// household member, mirroring the original system's seed record.
pub fn sample_housing_application(reference: &str) -> HousingApplication {
    let now = now_rfc3339();
    HousingApplication {
        schema_version: 1,
        reference: reference.parse().expect("valid reference"),
        applicant_name: "John Doe".to_string(),
        property_type: PropertyType::House,
        settlement_area: "Riverside Extension".to_string(),
        monthly_income: 15000.0,
        application_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        status: HousingStatus::Pending,
        documents: vec![sample_attachment("DOC-1")],
        inspection_reports: vec![InspectionReport {
            id: "INSP-1".to_string(),
            inspection_date: NaiveDate::from_ymd_opt(2025, 2, 15).unwrap(),
            inspector: "Mary Mumba".to_string(),
            status: InspectionStatus::Pending,
            comments: "Initial inspection scheduled.".to_string(),
            attachments: vec![],
        }],
        settlement: SettlementRecord {
            settlement_area: "Riverside Extension".to_string(),
            plot_reference: Some("PLT-2025-001".to_string()),
            coordinates: Some(Coordinates {
                latitude: -15.3875,
                longitude: 28.3228,
            }),
            access_to_utilities: UtilityAccess {
                water: true,
                electricity: true,
                sanitation: false,
            },
        },
        household: HouseholdRecord {
            head_of_household: "John Doe".to_string(),
            contact_number: "+260977123456".to_string(),
            members: vec![HouseholdMember {
                name: "Jane Doe".to_string(),
                age: 34,
                relationship: "Spouse".to_string(),
                employed: true,
            }],
            total_income: 15000.0,
        },
        approval: None,
        locked: false,
        lock_reason: None,
        created_at: now.clone(),
        updated_at: now,
    }
}

/// A pending license with one unpaid application fee.
pub fn sample_license(reference: &str) -> License {
    let now = now_rfc3339();
    License {
        schema_version: 1,
        reference: reference.parse().expect("valid reference"),
        type_key: "business".to_string(),
        business: BusinessDetails {
            name: "Sample Business Ltd".to_string(),
            trading_name: "Sample Store".to_string(),
            registration_number: "REG123".to_string(),
            contact_person: "John Doe".to_string(),
            phone: "+260 97 1234567".to_string(),
            email: "contact@sample.com".to_string(),
            employees: 10,
        },
        valid_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        valid_until: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        status: LicenseStatus::Pending,
        fees: vec![LicenseFee {
            id: "FEE-1".to_string(),
            fee_type: "application".to_string(),
            amount: 1000.0,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            paid_amount: 0.0,
            paid_date: None,
            status: FeeStatus::Pending,
        }],
        documents: vec![],
        locked: false,
        lock_reason: None,
        created_at: now.clone(),
        updated_at: now,
    }
}

pub fn sample_rezoning_request(reference: &str) -> RezoningRequest {
    let now = now_rfc3339();
    RezoningRequest {
        reference: reference.parse().expect("valid reference"),
        current_zoning: ZoningType::Residential,
        requested_zoning: ZoningType::Commercial,
        status: RezoningStatus::Draft,
        notes: "Seeking approval for mixed-use complex.".to_string(),
        committee_decision: None,
        meeting_date: None,
        attachments: vec![],
        created_at: now.clone(),
        updated_at: now,
    }
}

/// An available residential plot with four boundary points and one draft
/// rezoning request.
pub fn sample_plot(reference: &str) -> Plot {
    let now = now_rfc3339();
    Plot {
        schema_version: 1,
        reference: reference.parse().expect("valid reference"),
        location: GeoLocation {
            latitude: -15.3875,
            longitude: 28.3228,
            address: "123 Development Zone".to_string(),
        },
        size: 1000.0,
        zoning: ZoningType::Residential,
        status: PlotStatus::Available,
        owner: None,
        gps_points: vec![
            GpsPoint { latitude: -15.3875, longitude: 28.3228, order: 1 },
            GpsPoint { latitude: -15.3876, longitude: 28.3229, order: 2 },
            GpsPoint { latitude: -15.3877, longitude: 28.3228, order: 3 },
            GpsPoint { latitude: -15.3876, longitude: 28.3227, order: 4 },
        ],
        rezoning_requests: vec![sample_rezoning_request("RZ-2025-001")],
        attachments: vec![sample_attachment("ATT-1")],
        notes: String::new(),
        locked: false,
        lock_reason: None,
        created_at: now.clone(),
        updated_at: now,
    }
}

/// A pending building plan with one unchecked requirement.
pub fn sample_building_plan(reference: &str) -> BuildingPlan {
    let now = now_rfc3339();
    BuildingPlan {
        schema_version: 1,
        reference: reference.parse().expect("valid reference"),
        plot_reference: "PLT-2025-001".parse().expect("valid reference"),
        plan_type: PlanType::New,
        status: BuildingPlanStatus::Pending,
        checklist: vec![ChecklistItem {
            id: "CHK-1".to_string(),
            department: "Engineering".to_string(),
            requirement: "Structural Analysis".to_string(),
            status: ChecklistStatus::Pending,
            comments: None,
            checked_by: None,
            checked_date: None,
        }],
        documents: vec![],
        locked: false,
        lock_reason: None,
        created_at: now.clone(),
        updated_at: now,
    }
}
