//! Shared utilities for integration tests.

use std::io::Write;

use indexmap::IndexMap;
use route_template::{PatternCompiler, Route, RouteTable, Value, ValueTypeRegistry};
use tempfile::NamedTempFile;

/// A table of untyped routes, in the given order.
#[allow(dead_code)]
pub fn string_table(routes: &[(&str, &str)]) -> RouteTable<String> {
    let table = RouteTable::new();
    for (template, target) in routes {
        let route = Route::builder(*template, target.to_string())
            .build(&PatternCompiler::default(), &ValueTypeRegistry::default())
            .unwrap();
        table.add(route).unwrap();
    }
    table
}

/// A route with typed placeholders, built against the default registry.
#[allow(dead_code)]
pub fn typed_route(template: &str, target: &str, types: &[(&str, &str)]) -> Route<String> {
    let mut builder = Route::builder(template, target.to_string());
    for (name, type_name) in types {
        builder = builder.param_type(name, type_name);
    }
    builder
        .build(&PatternCompiler::default(), &ValueTypeRegistry::default())
        .unwrap()
}

/// Build a typed value map from pairs.
#[allow(dead_code)]
pub fn values(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// Write a route file to a temporary path that lives as long as the handle.
#[allow(dead_code)]
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
