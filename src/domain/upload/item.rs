// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/upload/item.rs
//
// The single file accepted by the widget.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use sha2::{Digest, Sha256};

/// One accepted file: payload, declared media type and name.
///
/// The payload is shared so effects can hand it to worker threads without copying.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadItem {
    bytes: Arc<[u8]>,
    declared_type: String,
    filename: String,
}

impl UploadItem {
    pub fn new(
        bytes: impl Into<Arc<[u8]>>,
        declared_type: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            declared_type: declared_type.into(),
            filename: filename.into(),
        }
    }

    /// Read a file from disk, declaring its type from the extension.
    ///
    /// Unknown extensions are declared as `application/octet-stream` and will be
    /// rejected by the decoder.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let declared = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(super::MediaType::from_extension)
            .map_or("application/octet-stream", super::MediaType::as_mime);
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self::new(bytes, declared, filename))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Hex SHA-256 of the payload, used to tie log lines and results to a file.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.bytes());
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Debug for UploadItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadItem")
            .field("filename", &self.filename)
            .field("declared_type", &self.declared_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}
