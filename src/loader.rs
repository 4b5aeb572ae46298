//! Metadata acquisition from various sources.
//!
//! Handles loading the swagger document from files, strings, and HTTP URLs,
//! including the fetch-with-local-cache pattern used for the ESI metadata
//! endpoint.

use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Load a metadata document from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// or `LoadError::InvalidJson` if the file isn't valid JSON.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| LoadError::InvalidJson { source })
}

/// Load a metadata document from a JSON string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the string isn't valid JSON.
pub fn load_document_str(content: &str) -> Result<Value, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
}

/// Load a metadata document from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
///
/// # Errors
///
/// Returns `LoadError::NetworkError` if the request fails,
/// or `LoadError::InvalidJson` if the response isn't valid JSON.
#[cfg(feature = "remote")]
pub fn load_document_url(url: &str) -> Result<Value, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|source| LoadError::NetworkError {
            url: url.to_string(),
            source,
        })?;

    let response = client
        .get(url)
        .send()
        .map_err(|source| LoadError::NetworkError {
            url: url.to_string(),
            source,
        })?;

    // Check for HTTP errors before parsing
    let response = response
        .error_for_status()
        .map_err(|source| LoadError::NetworkError {
            url: url.to_string(),
            source,
        })?;

    response.json().map_err(|source| LoadError::NetworkError {
        url: url.to_string(),
        source,
    })
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a metadata document from a file path or URL.
///
/// Automatically detects whether the source is a URL or file path.
/// URL loading requires the `remote` feature.
///
/// # Errors
///
/// Returns appropriate errors based on the source type.
pub fn load_document_auto(source: &str) -> Result<Value, LoadError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_document_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(LoadError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_document(Path::new(source))
    }
}

/// Fetch a metadata document, using an on-disk cache when available.
///
/// When `cache_path` exists and is non-empty the document is read from it
/// without touching the network. Otherwise it is fetched from `url` and
/// persisted to `cache_path` before being returned. One-shot and blocking;
/// retry policy belongs to the caller.
///
/// # Errors
///
/// Returns `LoadError::NetworkError` if the fetch fails,
/// `LoadError::CacheWrite` if the fetched document cannot be persisted,
/// or `LoadError::InvalidJson` if the cached file isn't valid JSON.
#[cfg(feature = "remote")]
pub fn load_or_fetch(cache_path: &Path, url: &str) -> Result<Value, LoadError> {
    let cache_usable = std::fs::metadata(cache_path)
        .map(|m| m.len() > 0)
        .unwrap_or(false);

    if cache_usable {
        return load_document(cache_path);
    }

    let document = load_document_url(url)?;

    let content =
        serde_json::to_string(&document).map_err(|source| LoadError::InvalidJson { source })?;
    std::fs::write(cache_path, content).map_err(|source| LoadError::CacheWrite {
        path: cache_path.to_path_buf(),
        source,
    })?;

    Ok(document)
}
