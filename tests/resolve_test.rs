//! Integration tests for endpoint resolution.

use serde_json::{json, Value};
use esi_metadata::{LoadError, Method, ParameterLocation, ResolveError, SpecStore};

fn store_from(paths: Value, parameters: Value) -> SpecStore {
    SpecStore::from_document(json!({
        "paths": paths,
        "securityDefinitions": { "evesso": { "type": "oauth2" } },
        "parameters": parameters
    }))
    .expect("document should build")
}

// === Store Construction Tests ===

mod construction {
    use super::*;

    #[test]
    fn empty_document_is_spec_missing() {
        let result = SpecStore::from_document(json!({}));
        assert!(matches!(result, Err(LoadError::SpecMissing { .. })));
    }

    #[test]
    fn keyless_document_is_spec_missing() {
        let result = SpecStore::from_document(json!({ "info": { "title": "ESI" } }));
        assert!(matches!(
            result,
            Err(LoadError::SpecMissing { reason }) if reason.contains("paths")
        ));
    }

    #[test]
    fn extra_top_level_keys_ignored() {
        let store = SpecStore::from_document(json!({
            "swagger": "2.0",
            "info": { "title": "ESI" },
            "host": "esi.evetech.net",
            "paths": {},
            "securityDefinitions": {},
            "parameters": {}
        }))
        .unwrap();

        assert_eq!(store.endpoints().count(), 0);
    }
}

// === Method Selection Tests ===

mod method_selection {
    use super::*;

    #[test]
    fn single_get() {
        let store = store_from(json!({ "/status/": { "get": {} } }), json!({}));
        let request = store.resolve("/status/").unwrap();
        assert_eq!(request.method, Method::Get);
    }

    #[test]
    fn single_post() {
        let store = store_from(json!({ "/window/": { "post": {} } }), json!({}));
        let request = store.resolve("/window/").unwrap();
        assert_eq!(request.method, Method::Post);
    }

    #[test]
    fn get_preferred_over_post() {
        let store = store_from(
            json!({ "/contacts/": { "post": {}, "get": {} } }),
            json!({}),
        );
        let request = store.resolve("/contacts/").unwrap();
        assert_eq!(request.method, Method::Get);
    }

    #[test]
    fn post_selected_when_get_absent() {
        let store = store_from(
            json!({ "/contacts/": { "delete": {}, "post": {} } }),
            json!({}),
        );
        let request = store.resolve("/contacts/").unwrap();
        assert_eq!(request.method, Method::Post);
    }

    #[test]
    fn neither_get_nor_post_errors() {
        let store = store_from(
            json!({ "/fleet/": { "put": {}, "delete": {} } }),
            json!({}),
        );
        let result = store.resolve("/fleet/");
        assert!(matches!(
            result,
            Err(ResolveError::UnsupportedMethodSet { key, .. }) if key == "/fleet/"
        ));
    }

    #[test]
    fn single_delete_errors() {
        let store = store_from(json!({ "/fleet/": { "delete": {} } }), json!({}));
        let result = store.resolve("/fleet/");
        assert!(matches!(
            result,
            Err(ResolveError::UnsupportedMethodSet { methods, .. }) if methods == ["delete"]
        ));
    }
}

// === Parameter Resolution Tests ===

mod parameters {
    use super::*;

    #[test]
    fn order_preserved_through_ref() {
        let store = store_from(
            json!({
                "/orders/": {
                    "get": {
                        "parameters": [
                            { "name": "a", "in": "query" },
                            { "$ref": "#/parameters/b" },
                            { "name": "c", "in": "query" }
                        ]
                    }
                }
            }),
            json!({ "b": { "name": "b", "in": "query", "type": "integer" } }),
        );
        let request = store.resolve("/orders/").unwrap();

        let names: Vec<&str> = request.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn dangling_ref_resolves_to_empty() {
        let store = store_from(
            json!({
                "/orders/": {
                    "get": { "parameters": [{ "$ref": "#/parameters/missing" }] }
                }
            }),
            json!({}),
        );
        let request = store.resolve("/orders/").unwrap();
        assert!(request.parameters.is_empty());
    }

    #[test]
    fn pool_descriptor_keeps_default() {
        let store = store_from(
            json!({
                "/orders/": {
                    "get": { "parameters": [{ "$ref": "#/parameters/datasource" }] }
                }
            }),
            json!({
                "datasource": {
                    "name": "datasource",
                    "in": "query",
                    "type": "string",
                    "default": "tranquility"
                }
            }),
        );
        let request = store.resolve("/orders/").unwrap();
        assert_eq!(request.parameters[0].default, Some(json!("tranquility")));
    }

    #[test]
    fn inline_missing_name_is_malformed() {
        let store = store_from(
            json!({
                "/orders/": { "get": { "parameters": [{ "in": "query" }] } }
            }),
            json!({}),
        );
        let result = store.resolve("/orders/");
        assert!(matches!(result, Err(ResolveError::MalformedParameter { .. })));
    }

    #[test]
    fn inline_missing_location_is_malformed() {
        let store = store_from(
            json!({
                "/orders/": { "get": { "parameters": [{ "name": "type_id" }] } }
            }),
            json!({}),
        );
        let result = store.resolve("/orders/");
        assert!(matches!(result, Err(ResolveError::MalformedParameter { .. })));
    }
}

// === Security Resolution Tests ===

mod security {
    use super::*;

    #[test]
    fn no_security_block_means_no_scopes() {
        let store = store_from(json!({ "/status/": { "get": {} } }), json!({}));
        let request = store.resolve("/status/").unwrap();
        assert!(request.scopes.is_empty());
    }

    #[test]
    fn empty_security_block_means_no_scopes() {
        let store = store_from(
            json!({ "/status/": { "get": { "security": [] } } }),
            json!({}),
        );
        let request = store.resolve("/status/").unwrap();
        assert!(request.scopes.is_empty());
    }

    #[test]
    fn single_scope_extracted() {
        let store = store_from(
            json!({
                "/search/": {
                    "get": { "security": [{ "evesso": ["scope1"] }] }
                }
            }),
            json!({}),
        );
        let request = store.resolve("/search/").unwrap();
        assert_eq!(request.scopes, ["scope1"]);
    }

    #[test]
    fn two_scopes_fail_hard() {
        let store = store_from(
            json!({
                "/mail/": {
                    "get": { "security": [{ "evesso": ["scope1", "scope2"] }] }
                }
            }),
            json!({}),
        );
        let result = store.resolve("/mail/");
        assert!(matches!(
            result,
            Err(ResolveError::MultipleScopesUnsupported { count: 2 })
        ));
    }

    #[test]
    fn second_requirement_entry_ignored() {
        let store = store_from(
            json!({
                "/search/": {
                    "get": {
                        "security": [
                            { "evesso": ["scope1"] },
                            { "evesso": ["scope2"] }
                        ]
                    }
                }
            }),
            json!({}),
        );
        let request = store.resolve("/search/").unwrap();
        assert_eq!(request.scopes, ["scope1"]);
    }
}

// === Resolution Contract Tests ===

mod contract {
    use super::*;

    #[test]
    fn unknown_key_errors() {
        let store = store_from(json!({ "/status/": { "get": {} } }), json!({}));
        let result = store.resolve("/unknown/");
        assert!(matches!(
            result,
            Err(ResolveError::UnknownEndpoint { key }) if key == "/unknown/"
        ));
    }

    #[test]
    fn descriptor_carries_requested_key() {
        let store = store_from(json!({ "/status/": { "get": {} } }), json!({}));
        let request = store.resolve("/status/").unwrap();
        assert_eq!(request.key, "/status/");
    }

    #[test]
    fn repeated_resolution_is_field_equal() {
        let store = store_from(
            json!({
                "/orders/": {
                    "get": {
                        "parameters": [
                            { "name": "region_id", "in": "path", "required": true, "type": "integer" },
                            { "$ref": "#/parameters/datasource" }
                        ],
                        "security": [{ "evesso": ["scope1"] }]
                    }
                }
            }),
            json!({
                "datasource": { "name": "datasource", "in": "query", "type": "string" }
            }),
        );

        let first = store.resolve("/orders/").unwrap();
        let second = store.resolve("/orders/").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn every_valid_key_yields_get_or_post() {
        let store = store_from(
            json!({
                "/a/": { "get": {} },
                "/b/": { "post": {} },
                "/c/": { "get": {}, "post": {} }
            }),
            json!({}),
        );

        for key in ["/a/", "/b/", "/c/"] {
            let request = store.resolve(key).unwrap();
            assert!(matches!(request.method, Method::Get | Method::Post));
        }
    }
}

// === Integration with a real-world style document ===

mod integration {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn load_fixture() -> SpecStore {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/swagger.json");
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Failed to read fixture: {}", path.display()));
        let document: Value =
            serde_json::from_str(&content).expect("Failed to parse fixture JSON");
        SpecStore::from_document(document).expect("Fixture should build a store")
    }

    #[test]
    fn public_endpoint() {
        let store = load_fixture();
        let request = store.resolve("/status/").unwrap();

        assert_eq!(request.method, Method::Get);
        assert_eq!(request.parameters.len(), 1);
        assert_eq!(request.parameters[0].name, "datasource");
        assert!(request.scopes.is_empty());
    }

    #[test]
    fn market_orders_drops_retired_ref() {
        let store = load_fixture();
        let request = store.resolve("/markets/{region_id}/orders/").unwrap();

        // retired_filter is a dangling pool reference and must be dropped
        let names: Vec<&str> = request.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["region_id", "type_id", "datasource", "page"]);

        assert_eq!(request.parameters[0].location, ParameterLocation::Path);
        assert!(request.parameters[0].required);
        assert_eq!(request.parameters[3].default, Some(json!(1)));
    }

    #[test]
    fn authorized_endpoint() {
        let store = load_fixture();
        let request = store.resolve("/markets/structures/{structure_id}/").unwrap();

        assert_eq!(request.scopes, ["esi-markets.structure_markets.v1"]);
    }

    #[test]
    fn post_only_endpoint() {
        let store = load_fixture();
        let request = store.resolve("/ui/openwindow/marketdetails/").unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.scopes, ["esi-ui.open_window.v1"]);
    }

    #[test]
    fn mixed_methods_prefer_get() {
        let store = load_fixture();
        let request = store.resolve("/characters/{character_id}/contacts/").unwrap();

        assert_eq!(request.method, Method::Get);
        assert_eq!(request.scopes, ["esi-characters.read_contacts.v1"]);
    }

    #[test]
    fn put_delete_only_endpoint_errors() {
        let store = load_fixture();
        let result = store.resolve("/fleets/{fleet_id}/members/");

        assert!(matches!(
            result,
            Err(ResolveError::UnsupportedMethodSet { .. })
        ));
    }

    #[test]
    fn multi_scope_endpoint_errors() {
        let store = load_fixture();
        let result = store.resolve("/characters/{character_id}/mail/");

        assert!(matches!(
            result,
            Err(ResolveError::MultipleScopesUnsupported { count: 2 })
        ));
    }

    #[test]
    fn endpoints_listed_in_document_order() {
        let store = load_fixture();
        let keys: Vec<&str> = store.endpoints().collect();

        assert_eq!(keys.first(), Some(&"/status/"));
        assert!(keys.contains(&"/characters/{character_id}/search/"));
        assert_eq!(keys.len(), 8);
    }
}
