//! Command implementations
//!
//! Each command resolves the workspace from `--cwd`, loads the configuration,
//! calls into the engine/store, and renders results. Validation and transition
//! failures are printed as per-field message lists.

pub mod attach;
pub mod doctor;
pub mod init;
pub mod list;
pub mod new;
pub mod record;
pub mod rezone;
pub mod show;
pub mod status;
pub mod transition;

use std::path::Path;

use crate::errors::{CaseflowError, Result};
use crate::fs::{find_workspace_root, resolve_cwd};
use crate::schemas::{CaseReference, Config};
use crate::store::CaseStore;

/// What a reference points at, resolved from its prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Housing,
    License,
    Plot,
    Rezoning,
    BuildingPlan,
}

/// Resolved workspace context shared by every command
pub struct Workspace {
    pub root: std::path::PathBuf,
    pub config: Config,
    pub store: CaseStore,
}

/// Locate the workspace and load its configuration.
pub fn open_workspace(cwd: Option<&Path>) -> Result<Workspace> {
    let root = find_workspace_root(&resolve_cwd(cwd))?;
    let config = crate::config::load_config(&root)?;
    let store = CaseStore::open(&root);
    Ok(Workspace { root, config, store })
}

impl Workspace {
    /// Parse a reference and resolve which kind of record it names.
    pub fn target_for(&self, raw: &str) -> Result<(CaseReference, Target)> {
        let reference: CaseReference = raw
            .parse()
            .map_err(CaseflowError::InvalidReference)?;
        let p = &self.config.prefixes;
        let target = if reference.prefix() == p.housing {
            Target::Housing
        } else if reference.prefix() == p.license {
            Target::License
        } else if reference.prefix() == p.plot {
            Target::Plot
        } else if reference.prefix() == p.rezoning {
            Target::Rezoning
        } else if reference.prefix() == p.building_plan {
            Target::BuildingPlan
        } else {
            return Err(CaseflowError::InvalidReference(format!(
                "unknown reference prefix: {}",
                reference.prefix()
            )));
        };
        Ok((reference, target))
    }
}

/// Print every message of a validation failure, one line per field.
pub fn print_violations(err: &crate::domain::ValidationError) {
    eprintln!("Validation failed:");
    for message in err.messages() {
        eprintln!("  - {}", message);
    }
}
