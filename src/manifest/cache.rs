//! Offline copy of the last remote manifest
//!
//! The last successfully fetched payload is kept on disk so a scanning desk can
//! keep working when the sheet is unreachable. There is no merging: the cached
//! payload is used as-is or not at all.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::version::manifest_schema_version;
use crate::manifest::error::{ManifestError, ManifestResult};

/// File name of the cached payload inside the cache directory
pub const CACHE_FILE_NAME: &str = "manifest.json";

#[derive(Debug, Serialize, Deserialize)]
struct CachedManifest {
    schema_version: u32,
    source: String,
    saved_at: String,
    payload: String,
}

/// A payload read back from the cache
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPayload {
    pub saved_at: String,
    pub payload: String,
}

#[derive(Debug, Clone)]
pub struct ManifestCache {
    dir: PathBuf,
}

impl ManifestCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform cache directory for the application, if one exists
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join("Bagcheck"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_path(&self) -> PathBuf {
        self.dir.join(CACHE_FILE_NAME)
    }

    /// Store the payload fetched from `source`, replacing any previous copy
    pub async fn save(&self, source: &str, payload: &str) -> ManifestResult<()> {
        let entry = CachedManifest {
            schema_version: manifest_schema_version(),
            source: source.to_string(),
            saved_at: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
            payload: payload.to_string(),
        };
        let serialized = serde_json::to_string(&entry).map_err(|e| ManifestError::Cache {
            message: e.to_string(),
        })?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ManifestError::Cache {
                message: format!("cannot create {}: {}", self.dir.display(), e),
            })?;
        tokio::fs::write(self.file_path(), serialized)
            .await
            .map_err(|e| ManifestError::Cache {
                message: format!("cannot write {}: {}", self.file_path().display(), e),
            })?;

        log::debug!("Cached manifest from {} in {}", source, self.dir.display());
        Ok(())
    }

    /// Read the cached payload for `source`
    ///
    /// Returns `None` when nothing is cached, when the copy came from another
    /// source, or when it was written by an incompatible schema version.
    pub async fn load(&self, source: &str) -> ManifestResult<Option<CachedPayload>> {
        let path = self.file_path();
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ManifestError::Cache {
                    message: format!("cannot read {}: {}", path.display(), e),
                })
            }
        };

        let entry: CachedManifest =
            serde_json::from_str(&contents).map_err(|e| ManifestError::Cache {
                message: format!("corrupt cache file {}: {}", path.display(), e),
            })?;

        if entry.schema_version != manifest_schema_version() {
            log::info!(
                "Ignoring cached manifest with schema version {}",
                entry.schema_version
            );
            return Ok(None);
        }
        if entry.source != source {
            log::info!("Ignoring cached manifest from a different source");
            return Ok(None);
        }

        Ok(Some(CachedPayload {
            saved_at: entry.saved_at,
            payload: entry.payload,
        }))
    }
}
