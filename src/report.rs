//! Diagnostic enumeration of resolved parameters.
//!
//! A read-only consumer of [`SpecStore::resolve`] used to survey which
//! parameter names appear across the metadata, optionally filtered by
//! location, required flag, or presence of a default value. Endpoints that
//! fail to resolve are reported alongside the names instead of aborting
//! the scan.

use serde::Serialize;

use crate::store::SpecStore;
use crate::types::ParameterLocation;

/// Filter conditions for a parameter scan.
///
/// Unset fields don't filter. `with_default` only filters when true,
/// selecting parameters that carry a default value.
#[derive(Debug, Clone, Default)]
pub struct ParamFilter {
    pub location: Option<ParameterLocation>,
    pub required: Option<bool>,
    pub with_default: bool,
}

/// An endpoint that could not be resolved during a scan.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointFailure {
    pub key: String,
    pub message: String,
}

/// Result of scanning a store's parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ParamScan {
    /// Matching parameter names, first-seen order, deduplicated.
    pub names: Vec<String>,
    /// Endpoints whose resolution failed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<EndpointFailure>,
}

impl ParamScan {
    /// Returns true if every endpoint resolved.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Scan every endpoint in the store and collect matching parameter names.
pub fn scan_parameters(store: &SpecStore, filter: &ParamFilter) -> ParamScan {
    let mut names: Vec<String> = Vec::new();
    let mut failures = Vec::new();

    for key in store.endpoints() {
        let request = match store.resolve(key) {
            Ok(request) => request,
            Err(e) => {
                failures.push(EndpointFailure {
                    key: key.to_string(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        for param in &request.parameters {
            if let Some(location) = filter.location {
                if param.location != location {
                    continue;
                }
            }
            if let Some(required) = filter.required {
                if param.required != required {
                    continue;
                }
            }
            if filter.with_default && param.default.is_none() {
                continue;
            }
            if names.iter().any(|n| n == &param.name) {
                continue;
            }
            names.push(param.name.clone());
        }
    }

    ParamScan { names, failures }
}
