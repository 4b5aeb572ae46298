//! Core types for metadata resolution.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Where a parameter is attached to an outbound request.
///
/// Mirrors the swagger `"in"` field. Resolution only records the location;
/// attaching the value to a request is the HTTP layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
    FormData,
}

impl ParameterLocation {
    /// Parse a swagger `"in"` value.
    ///
    /// Returns `None` for unknown values (caller should error).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "body" => Some(ParameterLocation::Body),
            "formData" | "formdata" => Some(ParameterLocation::FormData),
            _ => None,
        }
    }

    /// The swagger spelling of this location.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
            ParameterLocation::FormData => "formData",
        }
    }
}

/// HTTP method of a resolved endpoint.
///
/// Only GET and POST are supported; the few ESI routes that also expose
/// DELETE or PUT are rejected at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Parse a method name, case-insensitively.
    ///
    /// Returns `None` for anything other than get/post (caller should error).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Some(Method::Get),
            "post" => Some(Method::Post),
            _ => None,
        }
    }

    /// The lowercase method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
        }
    }
}

/// A resolved, self-contained description of one request parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name, unique within one endpoint's resolved list.
    pub name: String,
    /// Where the parameter is attached (`in` in the source document).
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter is mandatory. Defaults to false when absent.
    #[serde(default)]
    pub required: bool,
    /// Type tag copied from the document, e.g. "integer". May be empty.
    #[serde(rename = "type", default)]
    pub param_type: String,
    /// Default value. Only present for pool-sourced definitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// The immutable result of resolving one endpoint.
///
/// Holds everything the HTTP layer needs to build an outbound call: the
/// method, the full parameter list, and the required authorization scope
/// (zero or one). Mutable request-building fields (URL, headers, token)
/// are filled in later by that layer and are not part of resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    /// Endpoint key the descriptor was resolved for,
    /// e.g. "/characters/{character_id}/search/".
    pub key: String,
    /// Selected HTTP method.
    pub method: Method,
    /// Resolved parameters, in resolution order.
    pub parameters: Vec<ParameterDescriptor>,
    /// Required authorization scopes. Never more than one element.
    pub scopes: Vec<String>,
}
