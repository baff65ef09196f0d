//! Doctor command - validate every stored case
//!
//! The engine fails fast on corrupt records; doctor finds them ahead of time:
//! undefined status values, reference/file mismatches, and terminal cases
//! whose lock flag was never set.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::Result;
use crate::schemas::{BuildingPlan, HousingApplication, License, Plot, RezoningRequest};
use crate::store::CaseKind;

use super::open_workspace;

struct Finding {
    file: PathBuf,
    detail: String,
}

fn check_reference_matches_file(findings: &mut Vec<Finding>, path: &Path, raw: &Value) {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    if let Some(reference) = raw.get("reference").and_then(Value::as_str) {
        if reference != stem {
            findings.push(Finding {
                file: path.to_path_buf(),
                detail: format!("file name does not match stored reference {}", reference),
            });
        }
    }
}

fn check_lock_consistency(
    findings: &mut Vec<Finding>,
    path: &Path,
    raw: &Value,
    terminal_statuses: &[&str],
) {
    let status = raw.get("status").and_then(Value::as_str).unwrap_or_default();
    let locked = raw.get("locked").and_then(Value::as_bool).unwrap_or(false);
    let has_reason = raw
        .get("lock_reason")
        .and_then(Value::as_str)
        .is_some_and(|r| !r.trim().is_empty());

    if terminal_statuses.contains(&status) && !locked {
        findings.push(Finding {
            file: path.to_path_buf(),
            detail: format!("terminal status {} but the case is not locked", status),
        });
    }
    if locked && !has_reason {
        findings.push(Finding {
            file: path.to_path_buf(),
            detail: "locked without a lock reason".to_string(),
        });
    }
}

fn check_kind<T: serde::de::DeserializeOwned>(
    findings: &mut Vec<Finding>,
    files: &[PathBuf],
    terminal_statuses: &[&str],
) {
    for path in files {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                findings.push(Finding {
                    file: path.clone(),
                    detail: format!("unreadable: {}", e),
                });
                continue;
            }
        };
        let raw: Value = match serde_json::from_str(&content) {
            Ok(raw) => raw,
            Err(e) => {
                findings.push(Finding {
                    file: path.clone(),
                    detail: format!("invalid JSON: {}", e),
                });
                continue;
            }
        };

        // A record the schema rejects (undefined status value, missing field)
        // is exactly the corrupt state the engine must never silently accept.
        if let Err(e) = serde_json::from_value::<T>(raw.clone()) {
            findings.push(Finding {
                file: path.clone(),
                detail: format!("schema validation failed: {}", e),
            });
            continue;
        }

        check_reference_matches_file(findings, path, &raw);
        check_lock_consistency(findings, path, &raw, terminal_statuses);
    }
}

fn check_rezoning_requests(findings: &mut Vec<Finding>, files: &[PathBuf]) {
    for path in files {
        let Ok(content) = std::fs::read_to_string(path) else {
            continue;
        };
        let Ok(raw) = serde_json::from_str::<Value>(&content) else {
            continue;
        };
        let Some(requests) = raw.get("rezoning_requests").and_then(Value::as_array) else {
            continue;
        };
        for request in requests {
            if serde_json::from_value::<RezoningRequest>(request.clone()).is_err() {
                let reference = request
                    .get("reference")
                    .and_then(Value::as_str)
                    .unwrap_or("<unknown>");
                findings.push(Finding {
                    file: path.clone(),
                    detail: format!("rezoning request {} fails schema validation", reference),
                });
            }
        }
    }
}

/// Validate every stored case and report findings
pub async fn run(cwd: Option<&Path>) -> Result<()> {
    let ws = open_workspace(cwd)?;
    let mut findings = Vec::new();

    check_kind::<HousingApplication>(
        &mut findings,
        &ws.store.case_files(CaseKind::Housing)?,
        &["confirmed", "rejected"],
    );
    check_kind::<License>(
        &mut findings,
        &ws.store.case_files(CaseKind::License)?,
        &["expired", "rejected"],
    );
    // Plots have no terminal workflow status; only lock consistency applies
    check_kind::<Plot>(&mut findings, &ws.store.case_files(CaseKind::Plot)?, &[]);
    check_rezoning_requests(&mut findings, &ws.store.case_files(CaseKind::Plot)?);
    check_kind::<BuildingPlan>(
        &mut findings,
        &ws.store.case_files(CaseKind::BuildingPlan)?,
        &["approved", "rejected"],
    );

    if findings.is_empty() {
        println!("All stored cases are valid");
    } else {
        println!("{} problem(s) found:", findings.len());
        for finding in &findings {
            println!("  {}: {}", finding.file.display(), finding.detail);
        }
    }
    Ok(())
}
