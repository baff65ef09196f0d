//! File system utilities: workspace discovery and atomic JSON persistence

mod json;
mod paths;

pub use json::{read_json, write_json};
pub use paths::{
    find_workspace_root, get_attachments_dir, get_case_kind_dir, get_case_path, get_cases_dir,
    get_config_path, get_data_dir, resolve_cwd, DATA_DIR,
};
