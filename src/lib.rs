//! ESI Metadata Resolver
//!
//! Resolution of swagger-style ESI metadata into concrete request descriptors.
//!
//! This library parses the metadata document EVE's ESI publishes for swagger
//! clients and, for a given endpoint key, resolves the HTTP method, the full
//! parameter list (inline definitions plus `$ref` indirection into the shared
//! parameter pool), and the required authorization scope into a single
//! immutable [`RequestDescriptor`]. Downstream layers use the descriptor to
//! build and authorize the actual network call without re-parsing the
//! document.
//!
//! # Example
//!
//! ```
//! use esi_metadata::SpecStore;
//! use serde_json::json;
//!
//! let document = json!({
//!     "paths": {
//!         "/markets/{region_id}/orders/": {
//!             "get": {
//!                 "parameters": [
//!                     { "name": "region_id", "in": "path", "required": true, "type": "integer" },
//!                     { "$ref": "#/parameters/datasource" }
//!                 ]
//!             }
//!         }
//!     },
//!     "securityDefinitions": {},
//!     "parameters": {
//!         "datasource": {
//!             "name": "datasource",
//!             "in": "query",
//!             "type": "string",
//!             "default": "tranquility"
//!         }
//!     }
//! });
//!
//! let store = SpecStore::from_document(document).unwrap();
//! let request = store.resolve("/markets/{region_id}/orders/").unwrap();
//!
//! assert_eq!(request.method.as_str(), "get");
//! assert_eq!(request.parameters.len(), 2);
//! assert_eq!(request.parameters[1].default, Some("tranquility".into()));
//! assert!(request.scopes.is_empty());
//! ```
//!
//! # Resolution Rules
//!
//! | Input | Outcome |
//! |-------|---------|
//! | single method | that method, if get or post |
//! | get and post both present | get |
//! | no get/post selectable | `UnsupportedMethodSet` |
//! | `$ref` found in pool | pool descriptor appended (with its default) |
//! | `$ref` not in pool | entry dropped silently |
//! | inline without `name`/`in` | `MalformedParameter` |
//! | no security block | no scopes |
//! | one scope | that scope |
//! | more than one scope | `MultipleScopesUnsupported` |
//!
//! The store is built once and never mutated, so `resolve` is a pure
//! function of it and may be called concurrently without coordination.

mod error;
mod loader;
mod report;
mod resolver;
mod store;
mod types;

pub use error::{LoadError, ResolveError};
pub use loader::{is_url, load_document, load_document_auto, load_document_str};
pub use report::{scan_parameters, EndpointFailure, ParamFilter, ParamScan};
pub use resolver::{resolve_parameters, resolve_security, select_operation};
pub use store::SpecStore;
pub use types::{Method, ParameterDescriptor, ParameterLocation, RequestDescriptor};

#[cfg(feature = "remote")]
pub use loader::{load_document_url, load_or_fetch};
