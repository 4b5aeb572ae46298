//! Endpoint resolution - turns raw metadata entries into descriptors.
//!
//! Three concerns live here, each a pure function over `serde_json::Value`:
//! method selection for an endpoint entry, parameter resolution (inline
//! definitions plus `$ref` indirection into the shared pool), and security
//! scope extraction.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::ResolveError;
use crate::types::{json_type_name, Method, ParameterDescriptor, ParameterLocation};

/// Escape a path segment for a JSON Pointer (RFC 6901: ~ = ~0, / = ~1).
pub(crate) fn pointer_escape(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Select the operation for an endpoint entry.
///
/// A single method is taken as-is; among multiple methods get is preferred
/// over post. Any selection that does not land on get or post fails with
/// `UnsupportedMethodSet` rather than silently picking an arbitrary method,
/// since mis-selection would route the request wrong.
pub fn select_operation<'a>(
    key: &str,
    entry: &'a Map<String, Value>,
) -> Result<(Method, &'a Value), ResolveError> {
    let unsupported = || ResolveError::UnsupportedMethodSet {
        key: key.to_string(),
        methods: entry.keys().cloned().collect(),
    };

    if entry.len() == 1 {
        let (name, operation) = entry.iter().next().ok_or_else(unsupported)?;
        let method = Method::parse(name).ok_or_else(unsupported)?;
        return Ok((method, operation));
    }

    for method in [Method::Get, Method::Post] {
        let found = entry
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(method.as_str()));
        if let Some((_, operation)) = found {
            return Ok((method, operation));
        }
    }

    Err(unsupported())
}

/// Resolve an operation's raw parameter list against the shared pool.
///
/// Entries are processed in order and order is preserved in the output.
/// A `$ref` entry is looked up in the pool by the trailing path segment of
/// its reference string; pool misses are skipped silently, reflecting that
/// upstream metadata occasionally carries stale references. Inline entries
/// must carry `name` and `in`; they never receive a default value.
///
/// # Errors
///
/// Returns `ResolveError::MalformedParameter` when an inline entry lacks a
/// name or location, or carries one of the wrong type.
pub fn resolve_parameters(
    raw: &[Value],
    pool: &HashMap<String, ParameterDescriptor>,
    path: &str,
) -> Result<Vec<ParameterDescriptor>, ResolveError> {
    let mut resolved = Vec::with_capacity(raw.len());

    for (i, entry) in raw.iter().enumerate() {
        let entry_path = format!("{}/parameters/{}", path, i);

        if let Some(reference) = entry.get("$ref").and_then(|v| v.as_str()) {
            // Pool key is the trailing segment, e.g. "#/parameters/datasource"
            let pool_key = reference.rsplit('/').next().unwrap_or(reference);
            if let Some(shared) = pool.get(pool_key) {
                resolved.push(shared.clone());
            }
            continue;
        }

        resolved.push(parse_parameter_fields(entry, &entry_path)?);
    }

    Ok(resolved)
}

/// Parse the inline fields of a raw parameter entry.
///
/// `required` defaults to false and `type` to the empty string when absent.
/// The `default` field is not read here; defaults are only carried by
/// pool-sourced definitions.
pub(crate) fn parse_parameter_fields(
    entry: &Value,
    path: &str,
) -> Result<ParameterDescriptor, ResolveError> {
    let malformed = |reason: String| ResolveError::MalformedParameter {
        path: path.to_string(),
        reason,
    };

    let obj = entry
        .as_object()
        .ok_or_else(|| malformed(format!("expected object, got {}", json_type_name(entry))))?;

    let name = match obj.get("name") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::String(_)) => return Err(malformed("empty \"name\"".to_string())),
        Some(other) => {
            return Err(malformed(format!(
                "expected string \"name\", got {}",
                json_type_name(other)
            )))
        }
        None => return Err(malformed("missing \"name\"".to_string())),
    };

    let location = match obj.get("in") {
        Some(Value::String(s)) => ParameterLocation::parse(s)
            .ok_or_else(|| malformed(format!("unknown location \"{}\"", s)))?,
        Some(other) => {
            return Err(malformed(format!(
                "expected string \"in\", got {}",
                json_type_name(other)
            )))
        }
        None => return Err(malformed("missing \"in\"".to_string())),
    };

    let required = obj.get("required").and_then(|v| v.as_bool()).unwrap_or(false);
    let param_type = obj
        .get("type")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    Ok(ParameterDescriptor {
        name,
        location,
        required,
        param_type,
        default: None,
    })
}

/// Extract the authorization scopes an operation requires.
///
/// Absent or empty security blocks mean an unauthenticated endpoint. When
/// several requirement entries are present only the first is considered; the
/// rest are a recoverable inconsistency in the source data. The chosen
/// entry's scheme must list at most one scope: token lookup downstream
/// assumes one scope per endpoint, so more is a hard failure.
///
/// # Errors
///
/// Returns `ResolveError::MultipleScopesUnsupported` when the scheme lists
/// more than one scope, or `ResolveError::MalformedSecurity` when the block
/// doesn't have the documented shape.
pub fn resolve_security(raw: Option<&Value>, path: &str) -> Result<Vec<String>, ResolveError> {
    let malformed = |at: String, reason: String| ResolveError::MalformedSecurity {
        path: at,
        reason,
    };

    let block = match raw {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(value) => value,
    };

    let security_path = format!("{}/security", path);
    let entries = block.as_array().ok_or_else(|| {
        malformed(
            security_path.clone(),
            format!("expected array, got {}", json_type_name(block)),
        )
    })?;

    // Zero entries or an empty first entry: unauthenticated
    let Some(first) = entries.first() else {
        return Ok(Vec::new());
    };

    let entry_path = format!("{}/0", security_path);
    let schemes = first.as_object().ok_or_else(|| {
        malformed(
            entry_path.clone(),
            format!("expected object, got {}", json_type_name(first)),
        )
    })?;

    let Some((scheme, scope_list)) = schemes.iter().next() else {
        return Ok(Vec::new());
    };

    let scheme_path = format!("{}/{}", entry_path, pointer_escape(scheme));
    let scope_values = scope_list.as_array().ok_or_else(|| {
        malformed(
            scheme_path.clone(),
            format!("expected array of scopes, got {}", json_type_name(scope_list)),
        )
    })?;

    if scope_values.len() > 1 {
        return Err(ResolveError::MultipleScopesUnsupported {
            count: scope_values.len(),
        });
    }

    let mut scopes = Vec::with_capacity(scope_values.len());
    for (i, value) in scope_values.iter().enumerate() {
        let scope = value.as_str().ok_or_else(|| {
            malformed(
                format!("{}/{}", scheme_path, i),
                format!("expected string scope, got {}", json_type_name(value)),
            )
        })?;
        scopes.push(scope.to_string());
    }

    Ok(scopes)
}
