//! Init command - create the workspace skeleton

use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::save_config;
use crate::errors::{CaseflowError, Result};
use crate::fs::{get_attachments_dir, get_cases_dir, get_config_path, get_data_dir, resolve_cwd};
use crate::schemas::Config;
use crate::store::CaseKind;

/// Initialize a caseflow workspace in the current directory
pub async fn run(cwd: Option<&Path>, force: bool, dry_run: bool) -> Result<()> {
    let root = resolve_cwd(cwd);
    let config_path = get_config_path(&root);

    if config_path.exists() && !force {
        return Err(CaseflowError::ConfigError(format!(
            "{} already exists; use --force to overwrite the configuration",
            config_path.display()
        )));
    }

    if dry_run {
        println!("Would initialize workspace at {}", get_data_dir(&root).display());
        return Ok(());
    }

    fs::create_dir_all(get_attachments_dir(&root))?;
    for kind in CaseKind::ALL {
        fs::create_dir_all(get_cases_dir(&root).join(kind.dir()))?;
    }
    save_config(&root, &Config::default())?;

    info!(root = %root.display(), "initialized workspace");
    println!("Initialized caseflow workspace at {}", get_data_dir(&root).display());
    Ok(())
}
