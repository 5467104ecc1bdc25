//! Match/render round-trip properties.

use indexmap::IndexMap;
use proptest::prelude::*;
use route_template::{MatchResult, RenderError, RoutePattern, RouteTable, Value};

mod common;

/// Templates built from separator/placeholder runs whose separators can also
/// appear inside values, paired with candidate values for every placeholder.
fn template_with_values() -> impl Strategy<Value = (String, IndexMap<String, String>)> {
    let part = (
        prop::sample::select(vec!["/", "-", ".", "_", "-x-"]),
        prop::sample::select(vec!["", ": [a-z-]+", ": [a-z.]*", ": [0-9a-z]+"]),
        "[a-z0-9.-]{0,5}",
    );
    prop::collection::vec(part, 1..5).prop_map(|parts| {
        let mut template = String::new();
        let mut values = IndexMap::new();
        for (i, (separator, constraint, value)) in parts.into_iter().enumerate() {
            template.push_str(separator);
            template.push_str(&format!("{{p{i}{constraint}}}"));
            values.insert(format!("p{i}"), value);
        }
        (template, values)
    })
}

proptest! {
    #[test]
    fn prop_rendered_path_matches_back_to_values(
        (template, values) in template_with_values(),
    ) {
        let pattern = RoutePattern::compile(&template).unwrap();
        match pattern.render(&values) {
            Ok(path) => {
                prop_assert_eq!(pattern.matches(&path), MatchResult::Matched(values));
            }
            Err(RenderError::ConstraintViolation { .. }) | Err(RenderError::Ambiguous { .. }) => {}
            Err(other) => {
                prop_assert!(false, "unexpected render error: {:?}", other);
            }
        }
    }

    #[test]
    fn prop_match_then_render_reproduces_path(
        year in "[0-9]{4}",
        slug in "[a-z0-9-]{1,16}",
    ) {
        let pattern = RoutePattern::compile("/blog/{year: [0-9]{4}}/{slug}").unwrap();
        let path = format!("/blog/{year}/{slug}");

        let params = pattern.matches(&path).into_params().unwrap();
        prop_assert_eq!(params.get("year"), Some(&year));
        prop_assert_eq!(params.get("slug"), Some(&slug));
        prop_assert_eq!(pattern.render(&params).unwrap(), path);
    }

    #[test]
    fn prop_render_then_match_recovers_values(
        lang in "[a-z]{2}",
        page in "[A-Za-z0-9_.~-]{1,20}",
    ) {
        let pattern = RoutePattern::compile("/{lang: [a-z]{2}}/docs/{page}").unwrap();
        let mut input = IndexMap::new();
        input.insert("lang".to_string(), lang.clone());
        input.insert("page".to_string(), page.clone());

        let path = pattern.render(&input).unwrap();
        prop_assert_eq!(pattern.matches(&path), MatchResult::Matched(input));
    }

    #[test]
    fn prop_default_constraint_stops_at_separator(
        a in "[a-z]{1,8}",
        b in "[a-z]{1,8}",
    ) {
        let pattern = RoutePattern::compile("/x/{a}").unwrap();
        prop_assert_eq!(pattern.matches(&format!("/x/{a}/{b}")), MatchResult::NoMatch);
    }

    #[test]
    fn prop_literals_match_literally(literal in "[.+*?()|^$\\[\\]]{1,6}") {
        let template = format!("/{literal}/{{id}}");
        let pattern = RoutePattern::compile(&template).unwrap();

        let literal_path = format!("/{literal}/7");
        prop_assert!(pattern.is_match(&literal_path));
        let other = "x".repeat(literal.len());
        let other_path = format!("/{other}/7");
        prop_assert!(!pattern.is_match(&other_path));
    }

    #[test]
    fn prop_typed_long_round_trip(n in any::<i64>()) {
        let table = RouteTable::new();
        table
            .add(common::typed_route("/n/{n: -?[0-9]+}", "n", &[("n", "long")]))
            .unwrap();

        let path = table
            .url_for(&"n".to_string(), &common::values(&[("n", Value::Long(n))]))
            .unwrap();
        let hit = table.resolve(&path).unwrap();
        prop_assert_eq!(hit.param("n"), Some(&Value::Long(n)));
    }
}

#[test]
fn test_date_round_trip_with_format() {
    use route_template::{PatternCompiler, Route, ValueTypeRegistry};

    let route = Route::builder("/archive/{day: [0-9]{8}}", "archive".to_string())
        .param_type("day", "date")
        .param_format("day", "%Y%m%d")
        .build(&PatternCompiler::default(), &ValueTypeRegistry::default())
        .unwrap();
    let table = RouteTable::new();
    table.add(route).unwrap();

    let hit = table.resolve("/archive/20240229").unwrap();
    let day = hit.param("day").and_then(Value::as_date).unwrap();
    assert_eq!(day.format("%Y-%m-%d").to_string(), "2024-02-29");

    let path = table
        .url_for(&"archive".to_string(), &hit.params)
        .unwrap();
    assert_eq!(path, "/archive/20240229");

    // Matches the constraint but is not a date.
    assert!(table.resolve("/archive/20240230").is_none());
}
