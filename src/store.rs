//! The parsed metadata store and the descriptor entry point.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{LoadError, ResolveError};
use crate::resolver::{
    parse_parameter_fields, pointer_escape, resolve_parameters, resolve_security,
    select_operation,
};
use crate::types::{json_type_name, ParameterDescriptor, RequestDescriptor};

/// Top-level keys a metadata document must carry.
const REQUIRED_KEYS: &[&str] = &["paths", "securityDefinitions", "parameters"];

/// Parsed swagger metadata, read-only after construction.
///
/// Holds the endpoint entries, the security definitions, and the shared
/// parameter pool (the document's top-level `parameters` section, parsed
/// eagerly). The type exposes accessors only; immutability is the contract
/// that makes [`SpecStore::resolve`] safe to call concurrently.
#[derive(Debug, Clone)]
pub struct SpecStore {
    paths: Map<String, Value>,
    security_definitions: Map<String, Value>,
    pool: HashMap<String, ParameterDescriptor>,
}

impl SpecStore {
    /// Build a store from a parsed metadata document.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::SpecMissing` when the document is empty, not an
    /// object, lacks any of the required top-level keys (`paths`,
    /// `securityDefinitions`, `parameters`), or carries a broken shared
    /// parameter definition.
    pub fn from_document(document: Value) -> Result<Self, LoadError> {
        let missing = |reason: String| LoadError::SpecMissing { reason };

        let mut doc = match document {
            Value::Object(map) => map,
            other => {
                return Err(missing(format!(
                    "expected object, got {}",
                    json_type_name(&other)
                )))
            }
        };

        if doc.is_empty() {
            return Err(missing("document has no keys".to_string()));
        }

        for key in REQUIRED_KEYS {
            if !doc.contains_key(*key) {
                return Err(missing(format!("missing top-level \"{}\"", key)));
            }
        }

        let take_object = |doc: &mut Map<String, Value>, key: &str| match doc.remove(key) {
            Some(Value::Object(map)) => Ok(map),
            Some(other) => Err(missing(format!(
                "expected object \"{}\", got {}",
                key,
                json_type_name(&other)
            ))),
            // Presence checked above
            None => Err(missing(format!("missing top-level \"{}\"", key))),
        };

        let paths = take_object(&mut doc, "paths")?;
        let security_definitions = take_object(&mut doc, "securityDefinitions")?;
        let shared = take_object(&mut doc, "parameters")?;

        let mut pool = HashMap::with_capacity(shared.len());
        for (key, entry) in &shared {
            let path = format!("/parameters/{}", pointer_escape(key));
            let mut descriptor = parse_parameter_fields(entry, &path).map_err(|e| {
                missing(format!("invalid shared parameter \"{}\": {}", key, e))
            })?;
            // Pool definitions are the only ones that carry a default
            descriptor.default = match entry.get("default") {
                None | Some(Value::Null) => None,
                Some(value) => Some(value.clone()),
            };
            pool.insert(key.clone(), descriptor);
        }

        Ok(SpecStore {
            paths,
            security_definitions,
            pool,
        })
    }

    /// Endpoint keys, in document order.
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// Whether an endpoint key exists in the store.
    pub fn contains(&self, key: &str) -> bool {
        self.paths.contains_key(key)
    }

    /// The document's raw `securityDefinitions` section.
    pub fn security_definitions(&self) -> &Map<String, Value> {
        &self.security_definitions
    }

    /// The shared parameter pool, keyed by pool key.
    pub fn shared_parameters(&self) -> &HashMap<String, ParameterDescriptor> {
        &self.pool
    }

    /// Resolve an endpoint key into a request descriptor.
    ///
    /// Selects the method, resolves the operation's parameters against the
    /// shared pool, and extracts the required scope. Pure given the store;
    /// each call allocates a fresh descriptor.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::UnknownEndpoint` for a key not in the store,
    /// or the underlying resolution error for inconsistent metadata.
    pub fn resolve(&self, key: &str) -> Result<RequestDescriptor, ResolveError> {
        let entry = self.paths.get(key).ok_or_else(|| ResolveError::UnknownEndpoint {
            key: key.to_string(),
        })?;

        let methods = entry
            .as_object()
            .ok_or_else(|| ResolveError::UnsupportedMethodSet {
                key: key.to_string(),
                methods: Vec::new(),
            })?;

        let (method, operation) = select_operation(key, methods)?;
        let operation_path = format!("/paths/{}/{}", pointer_escape(key), method.as_str());

        let raw_parameters = match operation.get("parameters") {
            None | Some(Value::Null) => &[][..],
            Some(Value::Array(entries)) => entries.as_slice(),
            Some(other) => {
                return Err(ResolveError::MalformedParameter {
                    path: format!("{}/parameters", operation_path),
                    reason: format!("expected array, got {}", json_type_name(other)),
                })
            }
        };

        let parameters = resolve_parameters(raw_parameters, &self.pool, &operation_path)?;
        let scopes = resolve_security(operation.get("security"), &operation_path)?;

        Ok(RequestDescriptor {
            key: key.to_string(),
            method,
            parameters,
            scopes,
        })
    }
}
