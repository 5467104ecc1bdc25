//! Regular-expression engine abstraction.
//!
//! # Data Flow
//! ```text
//! constraint / assembled route expression
//!     → RegexEngine::compile
//!     → Box<dyn CompiledRegex> (immutable, Send + Sync)
//!     → captures(input) → Option<Vec<Option<&str>>>
//! ```
//!
//! # Design Decisions
//! - The pattern compiler only sees these traits, never a concrete engine
//! - One built-in backend (`NativeEngine`, the `regex` crate)
//! - Compiled expressions are shared read-only across threads

pub mod native;

use std::fmt;

use thiserror::Error;

pub use native::NativeEngine;

/// The expression could not be compiled by the backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{engine} rejected pattern `{pattern}`: {message}")]
pub struct EngineError {
    /// Backend name, as reported by [`RegexEngine::name`].
    pub engine: String,
    /// The offending expression.
    pub pattern: String,
    /// Backend diagnostic.
    pub message: String,
}

/// A regular-expression backend.
pub trait RegexEngine: Send + Sync + fmt::Debug {
    /// Identifies the backend for diagnostics.
    fn name(&self) -> &str;

    /// Compile an expression.
    fn compile(&self, pattern: &str) -> Result<Box<dyn CompiledRegex>, EngineError>;

    /// Escape literal text so it matches itself inside an expression.
    fn escape(&self, literal: &str) -> String;
}

/// A compiled expression produced by a [`RegexEngine`].
pub trait CompiledRegex: Send + Sync + fmt::Debug {
    /// The source the expression was compiled from.
    fn as_str(&self) -> &str;

    /// Number of capturing groups, excluding the implicit whole-match group.
    fn group_count(&self) -> usize;

    /// Search `input` and return groups `1..=group_count()` in order.
    ///
    /// Groups that did not participate in the match are `None`.
    fn captures<'h>(&self, input: &'h str) -> Option<Vec<Option<&'h str>>>;

    /// Returns true if the expression matches somewhere in `input`.
    fn is_match(&self, input: &str) -> bool {
        self.captures(input).is_some()
    }
}
