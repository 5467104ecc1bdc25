//! Metrics collection.
//!
//! # Metrics
//! - `route_patterns_compiled_total` (counter): templates compiled
//! - `route_resolutions_total` (counter): lookups by outcome (`hit`, `miss`)
//! - `route_param_parse_failures_total` (counter): matched routes skipped
//!   because a parameter did not parse, by route template
//! - `route_table_size` (gauge): routes in the most recently published table
//!
//! # Design Decisions
//! - Emitted through the `metrics` facade; exposition is left to the
//!   application's recorder
//! - Labels are bounded: outcome is fixed, route is a registered template

pub fn record_pattern_compiled() {
    ::metrics::counter!("route_patterns_compiled_total").increment(1);
}

pub fn record_resolution(hit: bool) {
    let outcome = if hit { "hit" } else { "miss" };
    ::metrics::counter!("route_resolutions_total", "outcome" => outcome).increment(1);
}

pub fn record_param_parse_failure(route: &str) {
    ::metrics::counter!("route_param_parse_failures_total", "route" => route.to_string())
        .increment(1);
}

pub fn record_table_size(size: usize) {
    ::metrics::gauge!("route_table_size").set(size as f64);
}
