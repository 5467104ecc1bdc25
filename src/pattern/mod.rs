//! Route pattern compiler, matcher and renderer.
//!
//! # Data Flow
//! ```text
//! Route template "/item/{id: [0-9]+}/{slug}"
//!     → parser.rs (literal runs + placeholder spans)
//!     → compiler.rs (escape literals, wrap constraints in groups,
//!                    anchor, compile via RegexEngine)
//!     → RoutePattern (immutable)
//!
//! Request path
//!     → matcher.rs (anchored match, group → name table)
//!     → MatchResult::Matched(name → raw string) | NoMatch
//!
//! name → raw string
//!     → matcher.rs (per-placeholder constraint check, substitution)
//!     → rendered path | RenderError
//! ```
//!
//! # Design Decisions
//! - All template errors surface at compile time; matching never errors
//! - A path that fails to match is `NoMatch`, an ordinary outcome
//! - Each constraint is also compiled alone so rendering can check it
//!   without the surrounding path
//! - Inner capture groups in constraints are counted so the name → group
//!   table stays correct

pub mod compiler;
pub mod error;
pub mod matcher;
pub mod parser;

pub use compiler::{PatternCompiler, RoutePattern, Segment, DEFAULT_CONSTRAINT};
pub use error::{PatternError, PatternResult, RenderError, RenderResult};
pub use matcher::{MatchResult, Params};
