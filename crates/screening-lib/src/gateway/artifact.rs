//! Classifier artifact loading
//!
//! The artifact is a single serialized model file at a configured path,
//! loaded once at startup and treated as read-only for the process
//! lifetime. Absence is a configuration error, not a crash.

use crate::error::ScreeningError;
use memmap2::Mmap;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// A memory-mapped classifier artifact with its identity metadata
#[derive(Debug)]
pub struct ModelArtifact {
    path: PathBuf,
    mmap: Mmap,
    checksum: String,
}

impl ModelArtifact {
    /// Map the artifact at `path`, recording size and SHA-256 checksum
    ///
    /// A missing or unreadable file fails with `ModelUnavailable` naming
    /// the path, so the caller can surface an actionable
    /// "configuration required" message.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ScreeningError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ScreeningError::model_unavailable(format!(
                "model file not found: {}",
                path.display()
            )));
        }

        let file = File::open(path).map_err(|e| {
            ScreeningError::model_unavailable(format!(
                "failed to open model file {}: {}",
                path.display(),
                e
            ))
        })?;

        // Safety: the artifact is never written to after startup
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| {
            ScreeningError::model_unavailable(format!(
                "failed to map model file {}: {}",
                path.display(),
                e
            ))
        })?;

        if mmap.is_empty() {
            return Err(ScreeningError::model_unavailable(format!(
                "model file is empty: {}",
                path.display()
            )));
        }

        let checksum = hex::encode(Sha256::digest(&mmap[..]));

        info!(
            path = %path.display(),
            size_bytes = mmap.len(),
            checksum = %checksum,
            "Model artifact mapped"
        );

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
            checksum,
        })
    }

    /// Raw model bytes
    pub fn bytes(&self) -> &[u8] {
        &self.mmap
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// SHA-256 of the artifact contents, hex encoded
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn size_bytes(&self) -> usize {
        self.mmap.len()
    }
}
