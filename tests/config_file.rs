//! Loading route tables from TOML files.

use std::path::Path;

use route_template::config::{load_config, ConfigError, ValidationError};
use route_template::{RouteTable, Value, ValueTypeRegistry};

mod common;

const ROUTES: &str = r#"
[engine]
size_limit = 2097152

[observability]
log_level = "debug"

[[routes]]
template = "/item/{id}"
target = "items.show"
[routes.params.id]
type = "long"
pattern = "[0-9]+"

[[routes]]
template = "/archive/{since}"
target = "archive"
[routes.params.since]
type = "date"
format = "%Y-%m-%d"

[[routes]]
template = "/{section}/{name}"
target = "fallback"
"#;

#[test]
fn test_load_and_resolve() {
    let file = common::write_config(ROUTES);
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.engine.size_limit, 2_097_152);
    assert_eq!(config.observability.log_level, "debug");

    let table = RouteTable::from_config(&config, &ValueTypeRegistry::default()).unwrap();
    assert_eq!(table.len(), 3);

    let hit = table.resolve("/item/42").unwrap();
    assert_eq!(hit.target(), "items.show");
    assert_eq!(hit.param("id"), Some(&Value::Long(42)));

    let hit = table.resolve("/archive/2023-07-01").unwrap();
    assert_eq!(hit.target(), "archive");
    assert!(hit.param("since").and_then(Value::as_date).is_some());

    // Fails the declared pattern, then the date parse; lands on the fallback.
    assert_eq!(table.resolve("/item/abc").unwrap().target(), "fallback");
    assert_eq!(table.resolve("/archive/soon").unwrap().target(), "fallback");
}

#[test]
fn test_file_order_is_priority() {
    let file = common::write_config(
        r#"
        [[routes]]
        template = "/user/{id}"
        target = "show"

        [[routes]]
        template = "/user/profile"
        target = "profile"
        "#,
    );
    let config = load_config(file.path()).unwrap();
    let table = RouteTable::from_config(&config, &ValueTypeRegistry::default()).unwrap();
    assert_eq!(table.resolve("/user/profile").unwrap().target(), "show");
}

#[test]
fn test_url_for_from_config() {
    let file = common::write_config(ROUTES);
    let config = load_config(file.path()).unwrap();
    let table = RouteTable::from_config(&config, &ValueTypeRegistry::default()).unwrap();

    let path = table
        .url_for(
            &"items.show".to_string(),
            &common::values(&[("id", Value::Long(7))]),
        )
        .unwrap();
    assert_eq!(path, "/item/7");

    assert!(table
        .url_for(
            &"items.show".to_string(),
            &common::values(&[("id", Value::Long(-7))]),
        )
        .is_err());
}

#[test]
fn test_missing_file() {
    let err = load_config(Path::new("/nonexistent/routes.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_malformed_toml() {
    let file = common::write_config("[[routes]\ntemplate = ");
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_invalid_routes_report_every_error() {
    let file = common::write_config(
        r#"
        [[routes]]
        template = "/a/{x"
        target = "a"

        [[routes]]
        template = "/b/{id}"
        target = "b"
        [routes.params.id]
        type = "uuid"

        [[routes]]
        template = "/b/{slug}"
        target = "c"
        "#,
    );
    let err = load_config(file.path()).unwrap_err();
    let ConfigError::Validation(errors) = err else {
        panic!("expected validation errors, got {err:?}");
    };
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], ValidationError::Route { index: 0, .. }));
    assert!(matches!(errors[1], ValidationError::Route { index: 1, .. }));
}
