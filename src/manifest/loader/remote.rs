//! Remote sheet fetch

use std::time::Duration;

use crate::core::retry::{retry_async, RetryPolicy};
use crate::manifest::error::{ManifestError, ManifestResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Fetch the raw manifest payload from the published sheet URL
pub async fn fetch_manifest(url: &str, policy: RetryPolicy) -> ManifestResult<String> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ManifestError::Http {
            message: format!("cannot build HTTP client: {}", e),
        })?;

    retry_async("manifest_fetch", policy, || fetch_once(&client, url)).await
}

async fn fetch_once(client: &reqwest::Client, url: &str) -> ManifestResult<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ManifestError::Http {
            message: e.to_string(),
        })?;

    let status = response.status();
    log::debug!("Manifest fetch status: {}", status);

    let body = response.text().await.map_err(|e| ManifestError::Http {
        message: format!("cannot read response body: {}", e),
    })?;
    log::trace!("Raw manifest response: {}", body);

    if !status.is_success() {
        return Err(ManifestError::Http {
            message: format!("HTTP {}", status),
        });
    }

    Ok(body)
}
