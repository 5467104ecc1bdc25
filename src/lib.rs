//! URL route templates: compile, match, render, and dispatch.
//!
//! # Architecture Overview
//!
//! ```text
//!     "/item/{id: [0-9]+}"                         "/item/42"
//!            │                                          │
//!            ▼                                          ▼
//!     ┌─────────────┐    ┌──────────────┐     ┌──────────────────┐
//!     │   pattern   │───▶│   routing    │────▶│ first route whose│
//!     │  compiler   │    │ RouteTable   │     │ params all parse │
//!     └──────┬──────┘    └──────┬───────┘     └──────────────────┘
//!            │                  │
//!            ▼                  ▼
//!     ┌─────────────┐    ┌──────────────┐
//!     │   engine    │    │    value     │
//!     │ RegexEngine │    │  ValueType   │
//!     └─────────────┘    └──────────────┘
//!
//!     Cross-cutting: config (TOML route files), observability (tracing, metrics)
//! ```

// Core subsystems
pub mod engine;
pub mod pattern;
pub mod routing;
pub mod value;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::RouteTableConfig;
pub use engine::{NativeEngine, RegexEngine};
pub use pattern::{MatchResult, PatternCompiler, PatternError, RenderError, RoutePattern};
pub use routing::{Resolution, Route, RouteBuilder, RouteError, RouteTable};
pub use value::{Value, ValueError, ValueOptions, ValueType, ValueTypeRegistry};
