//! Path resolution utilities for caseflow
//!
//! Locates the workspace root and constructs paths to the configuration,
//! case files, and attachment store.

use std::path::{Path, PathBuf};

use crate::errors::{CaseflowError, Result};

/// Directory name marking a caseflow workspace
pub const DATA_DIR: &str = ".caseflow";

/// Find the workspace root containing a .caseflow directory.
///
/// Walks up the directory tree from the starting directory.
pub fn find_workspace_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| CaseflowError::WorkspaceNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if current.join(DATA_DIR).is_dir() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(CaseflowError::WorkspaceNotFound(format!(
                    "Could not find a {} directory from {}",
                    DATA_DIR,
                    start_cwd.display()
                )));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .caseflow directory.
pub fn get_data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR)
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_data_dir(root).join("config.json")
}

/// Get the path to the attachments directory.
pub fn get_attachments_dir(root: &Path) -> PathBuf {
    get_data_dir(root).join("attachments")
}

/// Get the path to the cases directory.
pub fn get_cases_dir(root: &Path) -> PathBuf {
    get_data_dir(root).join("cases")
}

/// Get the directory holding one kind of case (e.g. "housing").
pub fn get_case_kind_dir(root: &Path, kind_dir: &str) -> PathBuf {
    get_cases_dir(root).join(kind_dir)
}

/// Get the file path for one case record.
pub fn get_case_path(root: &Path, kind_dir: &str, reference: &str) -> PathBuf {
    get_case_kind_dir(root, kind_dir).join(format!("{}.json", reference))
}
