//! Status command - dashboard counts over the workspace

use std::path::Path;

use crate::errors::{CaseflowError, Result};

use super::open_workspace;

/// Show derived dashboard counts
pub async fn run(cwd: Option<&Path>, json: bool) -> Result<()> {
    let ws = open_workspace(cwd)?;
    let stats = ws.store.stats(ws.config.renewal_window_days)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats)
                .map_err(|e| CaseflowError::InvalidJson(e.to_string()))?
        );
        return Ok(());
    }

    println!("Housing");
    println!("  applications:      {}", stats.total_housing_applications);
    println!("  locked cases:      {}", stats.locked_housing_cases);
    println!("  inspection queue:  {}", stats.inspection_queue);
    println!("Licensing");
    println!("  licenses:          {}", stats.total_licenses);
    println!("  active:            {}", stats.active_licenses);
    println!("  renewals due:      {}", stats.renewals_due);
    println!("Planning");
    println!("  plots:             {}", stats.total_plots);
    println!("  available plots:   {}", stats.available_plots);
    println!("  building plans:    {}", stats.total_building_plans);
    println!("  pending plans:     {}", stats.pending_building_plans);
    Ok(())
}
