//! Route table and dispatch.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Resolve a path to the first route whose pattern matches and whose
//!   parameters all parse
//! - Render a path for a target (reverse routing)
//!
//! # Design Decisions
//! - Lookups read an `ArcSwap` snapshot and never block
//! - Mutations take a writer lock, copy the snapshot, and swap it in
//! - O(n) scan in registration order (acceptable for typical route counts)

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use indexmap::IndexMap;

use crate::config::RouteTableConfig;
use crate::engine::NativeEngine;
use crate::observability::metrics;
use crate::pattern::{Params, PatternCompiler, RenderError, RenderResult};
use crate::routing::{Route, RouteError, RouteResult};
use crate::value::{Value, ValueTypeRegistry};

/// A successful resolution.
#[derive(Debug, Clone)]
pub struct Resolution<T> {
    pub route: Arc<Route<T>>,
    /// Typed parameters in declaration order.
    pub params: IndexMap<String, Value>,
    /// The raw captures the typed parameters were parsed from.
    pub raw: Params,
}

impl<T> Resolution<T> {
    pub fn target(&self) -> &T {
        self.route.target()
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }
}

type Snapshot<T> = Arc<Vec<Arc<Route<T>>>>;

/// Ordered route collection.
pub struct RouteTable<T> {
    routes: ArcSwap<Vec<Arc<Route<T>>>>,
    writer: Mutex<()>,
}

impl<T> RouteTable<T> {
    pub fn new() -> Self {
        Self {
            routes: ArcSwap::from_pointee(Vec::new()),
            writer: Mutex::new(()),
        }
    }

    /// Append a route.
    ///
    /// Rejects a route structurally identical to one already registered.
    pub fn add(&self, route: Route<T>) -> RouteResult<()> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.routes.load_full();

        if let Some(existing) = find_duplicate(&current, &route) {
            tracing::warn!(
                template = %route.template(),
                existing = %existing.template(),
                "Rejected duplicate route"
            );
            return Err(RouteError::Duplicate {
                template: route.template().to_string(),
                existing: existing.template().to_string(),
            });
        }

        tracing::info!(
            template = %route.template(),
            position = current.len(),
            "Route registered"
        );
        let mut next = Vec::with_capacity(current.len() + 1);
        next.extend(current.iter().cloned());
        next.push(Arc::new(route));
        self.publish(next);
        Ok(())
    }

    /// Remove the route registered with exactly this template.
    pub fn remove(&self, template: &str) -> Option<Arc<Route<T>>> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.routes.load_full();
        let index = current.iter().position(|r| r.template() == template)?;

        let mut next: Vec<_> = current.iter().cloned().collect();
        let removed = next.remove(index);
        tracing::info!(template = %template, "Route removed");
        self.publish(next);
        Some(removed)
    }

    /// Replace every route at once. On error the table is unchanged.
    pub fn replace_all(&self, routes: Vec<Route<T>>) -> RouteResult<()> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next: Vec<Arc<Route<T>>> = Vec::with_capacity(routes.len());
        for route in routes {
            if let Some(existing) = find_duplicate(&next, &route) {
                tracing::warn!(
                    template = %route.template(),
                    existing = %existing.template(),
                    "Rejected route table replacement with duplicate route"
                );
                return Err(RouteError::Duplicate {
                    template: route.template().to_string(),
                    existing: existing.template().to_string(),
                });
            }
            next.push(Arc::new(route));
        }
        tracing::info!(routes = next.len(), "Route table replaced");
        self.publish(next);
        Ok(())
    }

    fn publish(&self, routes: Vec<Arc<Route<T>>>) {
        metrics::record_table_size(routes.len());
        self.routes.store(Arc::new(routes));
    }

    /// Resolve a path.
    ///
    /// Routes are tried in registration order. A route whose pattern
    /// matches but whose parameters do not parse is skipped.
    pub fn resolve(&self, path: &str) -> Option<Resolution<T>> {
        let snapshot = self.routes.load();
        for route in snapshot.iter() {
            let Some(raw) = route.pattern().matches(path).into_params() else {
                continue;
            };
            match route.parse_params(&raw) {
                Ok(params) => {
                    metrics::record_resolution(true);
                    return Some(Resolution {
                        route: Arc::clone(route),
                        params,
                        raw,
                    });
                }
                Err((param, error)) => {
                    tracing::debug!(
                        path = %path,
                        route = %route.template(),
                        param = %param,
                        error = %error,
                        "Parameter did not parse, trying next route"
                    );
                    metrics::record_param_parse_failure(route.template());
                }
            }
        }
        tracing::trace!(path = %path, "No route");
        metrics::record_resolution(false);
        None
    }

    /// The current routes in registration order.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.routes.load_full()
    }

    pub fn len(&self) -> usize {
        self.routes.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.load().is_empty()
    }
}

impl<T: PartialEq + fmt::Display> RouteTable<T> {
    /// Render a path for the first route registered for `target`.
    pub fn url_for(&self, target: &T, values: &IndexMap<String, Value>) -> RenderResult<String> {
        let snapshot = self.routes.load();
        let route = snapshot
            .iter()
            .find(|r| r.target() == target)
            .ok_or_else(|| RenderError::UnknownTarget {
                target: target.to_string(),
            })?;
        route.render(values)
    }
}

impl RouteTable<String> {
    /// Build a table from a validated configuration, in file order.
    pub fn from_config(
        config: &RouteTableConfig,
        registry: &ValueTypeRegistry,
    ) -> RouteResult<Self> {
        let engine = NativeEngine::with_size_limit(config.engine.size_limit);
        let compiler = PatternCompiler::new(Arc::new(engine));
        let table = Self::new();
        for route_config in &config.routes {
            table.add(route_config.builder().build(&compiler, registry)?)?;
        }
        Ok(table)
    }
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RouteTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &*self.routes.load_full())
            .finish()
    }
}

fn find_duplicate<'a, T>(routes: &'a [Arc<Route<T>>], route: &Route<T>) -> Option<&'a Arc<Route<T>>> {
    let skeleton = route.pattern().skeleton();
    routes.iter().find(|r| r.pattern().skeleton() == skeleton)
}
