//! Rezone command - file a rezoning request against a registered plot

use std::path::Path;

use tracing::info;

use crate::domain::{validate_rezoning_create, RezoningDraft};
use crate::errors::{CaseflowError, Result};
use crate::fs::read_json;
use crate::schemas::Plot;

use super::{open_workspace, print_violations};

/// File a rezoning request and attach it to its plot
pub async fn run(cwd: Option<&Path>, plot_reference: &str, file: &Path, dry_run: bool) -> Result<()> {
    let ws = open_workspace(cwd)?;
    let (reference, _) = ws.target_for(plot_reference)?;

    let plot: Plot = ws
        .store
        .find(&reference)?
        .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
    let draft: RezoningDraft = read_json(file)?;
    let existing = ws.store.rezoning_references()?;

    let request =
        match validate_rezoning_create(&plot, &draft, &existing, &ws.config.prefixes.rezoning) {
            Ok(request) => request,
            Err(err) => {
                print_violations(&err);
                return Err(err.into());
            }
        };

    if dry_run {
        println!("Would file rezoning request {} against {}", request.reference, reference);
        return Ok(());
    }

    let request_reference = request.reference.clone();
    ws.store.update(&plot.with_new_rezoning_request(request))?;
    info!(reference = %request_reference, plot = %reference, "filed rezoning request");
    println!("Filed rezoning request {} against {}", request_reference, reference);
    Ok(())
}
