//! Manifest loading from files and the remote sheet
//!
//! Loading never fails outright: every path ends in a [`ManifestLoad`] whose
//! status line tells the operator what happened. Parse failures stay here and
//! never reach the reconciliation engine.

pub mod delimited;
pub mod json;
pub mod remote;

use std::fmt;
use std::path::{Path, PathBuf};

use strum_macros::{Display, EnumString};

use super::cache::ManifestCache;
use super::error::{ManifestError, ManifestResult};
use super::status::ManifestStatus;
use super::store::ManifestStore;
use crate::core::retry::RetryPolicy;

pub use delimited::{parse_delimited, DEFAULT_BAG_COLUMN, MIN_BAG_COLUMN};
pub use json::parse_json;

/// Manifest payload format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ManifestFormat {
    /// Comma, semicolon or tab separated table
    Delimited,
    /// JSON array of flight objects
    Json,
}

impl ManifestFormat {
    /// Choose a format from the file extension, falling back to the content
    pub fn detect(path: Option<&Path>, contents: &str) -> Self {
        let extension = path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => ManifestFormat::Json,
            Some("csv") | Some("tsv") | Some("txt") => ManifestFormat::Delimited,
            _ => {
                let first = contents.trim_start().chars().next();
                if matches!(first, Some('[') | Some('{')) {
                    ManifestFormat::Json
                } else {
                    ManifestFormat::Delimited
                }
            }
        }
    }
}

/// Where a manifest comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestSource {
    File(PathBuf),
    Remote(String),
}

impl fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestSource::File(path) => write!(f, "{}", path.display()),
            ManifestSource::Remote(_) => write!(f, "the remote sheet"),
        }
    }
}

/// Loader settings
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Zero-based column where bag codes start in delimited tables
    pub bag_column: usize,
    /// Retry policy for the remote fetch
    pub retry: RetryPolicy,
    /// Offline cache for the remote payload; `None` disables caching
    pub cache: Option<ManifestCache>,
    /// Forced file format; detected from extension and content when `None`
    pub format: Option<ManifestFormat>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            bag_column: DEFAULT_BAG_COLUMN,
            retry: RetryPolicy::default(),
            cache: None,
            format: None,
        }
    }
}

/// A loaded manifest and the status line describing the load
#[derive(Debug, Clone)]
pub struct ManifestLoad {
    pub store: ManifestStore,
    pub status: ManifestStatus,
}

impl ManifestLoad {
    fn from_store(store: ManifestStore, source: &ManifestSource) -> Self {
        let status = if store.is_empty() {
            ManifestStatus::Empty {
                source: source.to_string(),
            }
        } else {
            ManifestStatus::Loaded {
                flights: store.len(),
                source: source.to_string(),
            }
        };
        Self { store, status }
    }

    fn failed(error: &ManifestError) -> Self {
        Self {
            store: ManifestStore::empty(),
            status: ManifestStatus::Failed {
                message: error.to_string(),
            },
        }
    }
}

/// Parse manifest text in the given format
pub fn parse_manifest(
    contents: &str,
    format: ManifestFormat,
    options: &LoaderOptions,
) -> ManifestResult<ManifestStore> {
    match format {
        ManifestFormat::Delimited => parse_delimited(contents, options.bag_column),
        ManifestFormat::Json => parse_json(contents),
    }
}

/// Read and parse a manifest file
pub async fn load_file(path: &Path, options: &LoaderOptions) -> ManifestResult<ManifestStore> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ManifestError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    let format = options
        .format
        .unwrap_or_else(|| ManifestFormat::detect(Some(path), &contents));
    log::debug!("Loading {} as {}", path.display(), format);
    parse_manifest(&contents, format, options)
}

/// Fetch and parse the remote manifest, refreshing the offline copy on success
pub async fn load_remote(url: &str, options: &LoaderOptions) -> ManifestResult<ManifestStore> {
    let payload = remote::fetch_manifest(url, options.retry.clone()).await?;
    let store = parse_json(&payload)?;

    if let Some(cache) = &options.cache {
        if let Err(e) = cache.save(url, &payload).await {
            log::warn!("Could not refresh offline manifest copy: {}", e);
        }
    }
    Ok(store)
}

/// Load a manifest from any source, always producing a status line
pub async fn load_manifest(source: &ManifestSource, options: &LoaderOptions) -> ManifestLoad {
    match source {
        ManifestSource::File(path) => match load_file(path, options).await {
            Ok(store) => ManifestLoad::from_store(store, source),
            Err(e) => {
                log::warn!("{}", e);
                ManifestLoad::failed(&e)
            }
        },
        ManifestSource::Remote(url) => match load_remote(url, options).await {
            Ok(store) => ManifestLoad::from_store(store, source),
            Err(e) => {
                log::warn!("{}", e);
                load_cached(url, options, &e).await
            }
        },
    }
}

async fn load_cached(url: &str, options: &LoaderOptions, fetch_error: &ManifestError) -> ManifestLoad {
    let Some(cache) = &options.cache else {
        return ManifestLoad::failed(fetch_error);
    };

    match cache.load(url).await {
        Ok(Some(cached)) => match parse_json(&cached.payload) {
            Ok(store) => ManifestLoad {
                status: ManifestStatus::Cached {
                    flights: store.len(),
                    saved_at: cached.saved_at,
                    reason: fetch_error.to_string(),
                },
                store,
            },
            Err(e) => {
                log::warn!("Cached manifest is unusable: {}", e);
                ManifestLoad::failed(fetch_error)
            }
        },
        Ok(None) => ManifestLoad::failed(fetch_error),
        Err(e) => {
            log::warn!("{}", e);
            ManifestLoad::failed(fetch_error)
        }
    }
}
