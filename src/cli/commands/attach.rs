//! Attach command - store a file and link it to a case

use std::fs;
use std::path::Path;

use tracing::info;

use crate::attach::{content_type_for, LocalAttachmentStore};
use crate::errors::{CaseflowError, Result};
use crate::fs::get_attachments_dir;
use crate::schemas::{BuildingPlan, HousingApplication, License, Plot};

use super::{open_workspace, Target};

/// Store a file in the attachment store and append its reference to the case
pub async fn run(cwd: Option<&Path>, reference: &str, file: &Path, dry_run: bool) -> Result<()> {
    let ws = open_workspace(cwd)?;
    let (reference, target) = ws.target_for(reference)?;

    let bytes = fs::read(file).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CaseflowError::FileNotFound(format!("File not found: {}", file.display()))
        } else {
            CaseflowError::Io(e)
        }
    })?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment");

    if dry_run {
        println!("Would attach {} ({} bytes) to {}", file_name, bytes.len(), reference);
        return Ok(());
    }

    let attachments = LocalAttachmentStore::open(
        get_attachments_dir(&ws.root),
        ws.config.attachments.clone(),
    );
    let attachment = attachments.put(&bytes, file_name, content_type_for(file))?;
    let attachment_id = attachment.id.clone();

    match target {
        Target::Housing => {
            let case: HousingApplication = ws
                .store
                .find(&reference)?
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            ws.store.update(&case.with_document(attachment))?;
        }
        Target::License => {
            let license: License = ws
                .store
                .find(&reference)?
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            ws.store.update(&license.with_document(attachment))?;
        }
        Target::Plot => {
            let plot: Plot = ws
                .store
                .find(&reference)?
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            ws.store.update(&plot.with_attachment(attachment))?;
        }
        Target::Rezoning => {
            let plot = ws
                .store
                .find_plot_with_request(&reference)?
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            let mut request = plot
                .rezoning_request(&reference)
                .cloned()
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            request.attachments.push(attachment);
            request.updated_at = crate::schemas::now_rfc3339();
            ws.store.update(&plot.with_rezoning_request(request))?;
        }
        Target::BuildingPlan => {
            let plan: BuildingPlan = ws
                .store
                .find(&reference)?
                .ok_or_else(|| CaseflowError::CaseNotFound(reference.to_string()))?;
            ws.store.update(&plan.with_document(attachment))?;
        }
    }

    info!(reference = %reference, attachment = %attachment_id, "attached file");
    println!("Attached {} to {} as {}", file_name, reference, attachment_id);
    Ok(())
}
