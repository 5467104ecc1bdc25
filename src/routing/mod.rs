//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path
//!     → router.rs (snapshot scan in registration order)
//!     → RoutePattern::matches (raw strings)
//!     → Route::parse_params (typed values via ValueType)
//!     → Return: first route whose params all parse, or no route
//!
//! Route Compilation (at startup):
//!     RouteConfig[] / RouteBuilder
//!     → PatternCompiler (template → RoutePattern)
//!     → bind ValueTypes from the registry
//!     → RouteTable::add (reject structural duplicates)
//! ```
//!
//! # Design Decisions
//! - Registration order is priority; no specificity reordering
//! - A parameter that fails to parse skips that route, not the lookup
//! - Readers load an immutable snapshot; writers are serialized and
//!   publish a new snapshot atomically
//! - Explicit no-route rather than a silent default

pub mod route;
pub mod router;

use thiserror::Error;

use crate::pattern::PatternError;
use crate::value::ValueError;

pub use route::{ParamBinding, Route, RouteBuilder};
pub use router::{Resolution, RouteTable};

/// Errors raised while building or registering routes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    /// Same literal skeleton and placeholder positions as a registered route.
    #[error("route `{template}` duplicates registered route `{existing}`")]
    Duplicate { template: String, existing: String },

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("unknown value type `{type_name}` for parameter `{param}`")]
    UnknownValueType { param: String, type_name: String },

    #[error("parameter `{param}` is not a placeholder of `{template}`")]
    UnknownPlaceholder { param: String, template: String },

    #[error("invalid options for parameter `{param}`")]
    InvalidOptions {
        param: String,
        #[source]
        source: ValueError,
    },
}

/// Result type for route construction and registration.
pub type RouteResult<T> = Result<T, RouteError>;
