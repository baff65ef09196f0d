//! Error types for caseflow
//!
//! Each error type has a corresponding error code for programmatic handling.
//! Engine-level validation and transition failures are embedded as values so
//! callers can render every field-level message.

use thiserror::Error;

use crate::domain::{TransitionError, ValidationError};

/// Result type alias for caseflow operations
pub type Result<T> = std::result::Result<T, CaseflowError>;

/// Main error type for all caseflow operations
#[derive(Debug, Error)]
pub enum CaseflowError {
    /// Workspace not found - no .caseflow directory up the tree
    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Creation-time validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Status transition rejected by the workflow engine
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A case with this reference already exists
    #[error("Case already exists: {0}")]
    CaseExists(String),

    /// No case with this reference was found
    #[error("Case not found: {0}")]
    CaseNotFound(String),

    /// The stored case is locked and refuses mutation
    #[error("Case is locked: {0}")]
    CaseLocked(String),

    /// A reference number could not be parsed
    #[error("Invalid case reference: {0}")]
    InvalidReference(String),

    /// Attachment rejected (size or content type)
    #[error("Attachment rejected: {0}")]
    AttachmentRejected(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Operation was interrupted (e.g., by SIGINT)
    #[error("Operation interrupted")]
    Interrupted,

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaseflowError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            CaseflowError::WorkspaceNotFound(_) => "WORKSPACE_NOT_FOUND",
            CaseflowError::InvalidJson(_) => "INVALID_JSON",
            CaseflowError::Validation(_) => "VALIDATION",
            CaseflowError::Transition(TransitionError::Forbidden { .. }) => "TRANSITION_FORBIDDEN",
            CaseflowError::Transition(TransitionError::Incomplete { .. }) => {
                "TRANSITION_INCOMPLETE"
            }
            CaseflowError::Transition(TransitionError::CorruptState { .. }) => "CORRUPT_STATE",
            CaseflowError::FileNotFound(_) => "FILE_NOT_FOUND",
            CaseflowError::CaseExists(_) => "CASE_EXISTS",
            CaseflowError::CaseNotFound(_) => "CASE_NOT_FOUND",
            CaseflowError::CaseLocked(_) => "CASE_LOCKED",
            CaseflowError::InvalidReference(_) => "INVALID_REFERENCE",
            CaseflowError::AttachmentRejected(_) => "ATTACHMENT_REJECTED",
            CaseflowError::ConfigError(_) => "CONFIG_ERROR",
            CaseflowError::Interrupted => "INTERRUPTED",
            CaseflowError::Io(_) => "IO_ERROR",
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &CaseflowError) -> i32 {
    match error {
        CaseflowError::Interrupted => 130, // Standard Unix exit code for SIGINT
        _ => 1,
    }
}
