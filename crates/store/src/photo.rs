use std::fs;
use std::path::PathBuf;

use crate::error::{StoreError, StoreResult};

/// Write-once blob store for product photos.
///
/// Blobs are keyed by a path derived from the product name and the uploaded
/// filename. There is no deletion and no deduplication; re-uploading under
/// the same name overwrites the blob, and removed products leave their
/// photos behind.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    /// The directory is created lazily on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist `bytes` and return the stored path for the product row.
    pub fn save(&self, product_name: &str, filename: &str, bytes: &[u8]) -> StoreResult<String> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::io(self.dir.display().to_string(), e))?;

        let path = self.dir.join(format!("{product_name}_{filename}"));
        let display = path.display().to_string();
        fs::write(&path, bytes).map_err(|e| StoreError::io(display.clone(), e))?;
        Ok(display)
    }
}
