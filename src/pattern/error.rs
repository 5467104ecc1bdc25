//! Compile-time and render-time pattern errors.

use thiserror::Error;

use crate::engine::EngineError;
use crate::value::ValueError;

/// A route template could not be compiled.
///
/// Raised at registration time only; matching never fails with an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    /// Malformed template: unterminated or empty placeholder, stray `}`,
    /// invalid placeholder name.
    #[error("invalid route template `{template}` at byte {position}: {message}")]
    Syntax {
        template: String,
        position: usize,
        message: &'static str,
    },

    #[error("placeholder `{name}` is declared more than once in `{template}`")]
    DuplicatePlaceholder { template: String, name: String },

    /// A placeholder constraint is not a valid expression for the engine.
    #[error("invalid constraint `{constraint}` for placeholder `{name}`")]
    InvalidConstraint {
        name: String,
        constraint: String,
        #[source]
        source: EngineError,
    },

    /// A placeholder carries an inline constraint and a declared pattern.
    #[error("placeholder `{name}` has both an inline constraint and a declared pattern")]
    ConflictingConstraint { name: String },

    /// A declared pattern names a placeholder the template does not have.
    #[error("pattern declared for `{name}`, which is not a placeholder of `{template}`")]
    UnknownPlaceholder { template: String, name: String },

    /// The assembled route expression was rejected by the engine.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type for pattern compilation.
pub type PatternResult<T> = Result<T, PatternError>;

/// A path could not be rendered from the supplied values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("missing value for placeholder `{name}`")]
    MissingParameter { name: String },

    /// The value does not fully match the placeholder's constraint.
    #[error("value `{value}` for placeholder `{name}` does not satisfy `{constraint}`")]
    ConstraintViolation {
        name: String,
        value: String,
        constraint: String,
    },

    /// The rendered path would not match back to the supplied values: a
    /// value also matches the literal text after its placeholder.
    #[error("rendered path `{path}` does not match back to the value for `{name}`")]
    Ambiguous { name: String, path: String },

    /// A typed value could not be formatted by its value type.
    #[error("cannot format value for placeholder `{name}`")]
    Format {
        name: String,
        #[source]
        source: ValueError,
    },

    /// No route is registered for the requested target.
    #[error("no route registered for target `{target}`")]
    UnknownTarget { target: String },
}

/// Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;
