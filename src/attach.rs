//! The attachment store
//!
//! Takes file bytes plus a content type, enforces the configured size cap and
//! content-type allowlist, writes the blob under `.caseflow/attachments/`, and
//! hands back the [`Attachment`] reference. Case records only ever hold the
//! reference; the bytes stay here.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use crate::errors::{CaseflowError, Result};
use crate::schemas::{Attachment, AttachmentConfig};

/// Attachment store writing to a local directory
pub struct LocalAttachmentStore {
    dir: PathBuf,
    config: AttachmentConfig,
}

/// Replace path separators and other hostile characters in a client-supplied
/// file name. Keeps letters, digits, dots, dashes, and underscores.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('_').is_empty() {
        "attachment".to_string()
    } else {
        cleaned
    }
}

impl LocalAttachmentStore {
    pub fn open(dir: impl Into<PathBuf>, config: AttachmentConfig) -> Self {
        LocalAttachmentStore {
            dir: dir.into(),
            config,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store a blob and return its reference.
    ///
    /// # Errors
    /// * `AttachmentRejected` - empty file, over the size cap, or a content
    ///   type outside the allowlist
    pub fn put(&self, bytes: &[u8], file_name: &str, content_type: &str) -> Result<Attachment> {
        if bytes.is_empty() {
            return Err(CaseflowError::AttachmentRejected(
                "file is empty".to_string(),
            ));
        }
        if bytes.len() as u64 > self.config.max_bytes {
            return Err(CaseflowError::AttachmentRejected(format!(
                "file is {} bytes, larger than the {} byte limit",
                bytes.len(),
                self.config.max_bytes
            )));
        }
        if !self
            .config
            .allowed_content_types
            .iter()
            .any(|t| t == content_type)
        {
            return Err(CaseflowError::AttachmentRejected(format!(
                "content type {} is not accepted",
                content_type
            )));
        }

        let millis = Utc::now().timestamp_millis();
        let key = format!("{}-{}", millis, sanitize_file_name(file_name));
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(&key), bytes)?;
        debug!(key = %key, size = bytes.len(), "stored attachment");

        Ok(Attachment {
            id: format!("ATT-{}", millis),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            file_size: bytes.len() as u64,
            url: format!("attachments/{}", key),
        })
    }
}

/// Guess a MIME content type from a file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
