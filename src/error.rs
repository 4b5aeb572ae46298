//! Error types for metadata loading and resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors during metadata acquisition and store construction.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[cfg(feature = "remote")]
    #[error("cannot write metadata cache {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    // Document errors (exit code 2)
    #[error("metadata is empty or incomplete: {reason}")]
    SpecMissing { reason: String },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } | LoadError::CacheWrite { .. } => 3,
            _ => 2,
        }
    }
}

/// Errors during endpoint resolution.
///
/// Every variant except `UnknownEndpoint` signals an inconsistency in the
/// metadata itself. Those are surfaced rather than masked: a silently
/// incomplete descriptor would corrupt a downstream authorized call.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("\"{key}\" is not a valid request key")]
    UnknownEndpoint { key: String },

    #[error("malformed parameter at {path}: {reason}")]
    MalformedParameter { path: String, reason: String },

    #[error("malformed security entry at {path}: {reason}")]
    MalformedSecurity { path: String, reason: String },

    #[error("endpoints with multiple scopes are not supported: expected 1 scope, got {count}")]
    MultipleScopesUnsupported { count: usize },

    #[error("cannot select a method for \"{key}\": expected get or post among [{}]", methods.join(", "))]
    UnsupportedMethodSet { key: String, methods: Vec<String> },
}

impl ResolveError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Caller error - invalid key
            ResolveError::UnknownEndpoint { .. } => 1,
            // Metadata inconsistency
            _ => 2,
        }
    }
}
