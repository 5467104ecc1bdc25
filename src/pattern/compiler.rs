//! Template → compiled route pattern.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::engine::{CompiledRegex, NativeEngine, RegexEngine};
use crate::observability::metrics;
use crate::pattern::error::{PatternError, PatternResult};
use crate::pattern::parser::{tokenize, Token};

/// Constraint applied to placeholders that declare none: one or more
/// characters other than the path separator.
pub const DEFAULT_CONSTRAINT: &str = "[^/]+";

/// A piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// A named placeholder with its effective constraint.
    Placeholder { name: String, constraint: String },
}

/// A placeholder as stored in a compiled pattern.
#[derive(Debug)]
pub(crate) struct ParamSlot {
    pub(crate) name: String,
    pub(crate) constraint: String,
    /// Capture group in the whole-path expression (1-based).
    pub(crate) group: usize,
    /// The constraint alone, anchored at both ends.
    pub(crate) validator: Box<dyn CompiledRegex>,
}

/// An immutable, compiled route template.
///
/// Built once at registration and shared read-only; `matches` and `render`
/// take `&self` and may run concurrently from any thread.
#[derive(Debug)]
pub struct RoutePattern {
    template: String,
    segments: Vec<Segment>,
    regex: Box<dyn CompiledRegex>,
    pub(crate) params: Vec<ParamSlot>,
    engine_name: String,
}

impl RoutePattern {
    /// Compile `template` with the native engine.
    pub fn compile(template: &str) -> PatternResult<Self> {
        PatternCompiler::default().compile(template)
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Effective constraint of a placeholder.
    pub fn constraint(&self, name: &str) -> Option<&str> {
        self.slot(name).map(|p| p.constraint.as_str())
    }

    /// Capture group index of a placeholder in the assembled expression.
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.slot(name).map(|p| p.group)
    }

    /// The assembled, anchored expression.
    pub fn regex_source(&self) -> &str {
        self.regex.as_str()
    }

    pub fn engine_name(&self) -> &str {
        &self.engine_name
    }

    /// The literal skeleton with every placeholder collapsed to `{}`.
    ///
    /// Two patterns with the same skeleton are structurally identical.
    pub fn skeleton(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => text.as_str(),
                Segment::Placeholder { .. } => "{}",
            })
            .collect()
    }

    pub(crate) fn regex(&self) -> &dyn CompiledRegex {
        self.regex.as_ref()
    }

    fn slot(&self, name: &str) -> Option<&ParamSlot> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Compiles route templates through a pluggable [`RegexEngine`].
#[derive(Debug, Clone)]
pub struct PatternCompiler {
    engine: Arc<dyn RegexEngine>,
}

impl PatternCompiler {
    pub fn new(engine: Arc<dyn RegexEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<dyn RegexEngine> {
        &self.engine
    }

    /// Compile a template using only its inline constraints.
    pub fn compile(&self, template: &str) -> PatternResult<RoutePattern> {
        self.compile_with(template, &IndexMap::new())
    }

    /// Compile a template, applying `declared` constraints to placeholders
    /// that have no inline one.
    pub fn compile_with(
        &self,
        template: &str,
        declared: &IndexMap<String, String>,
    ) -> PatternResult<RoutePattern> {
        let tokens = tokenize(template)?;

        for name in declared.keys() {
            let known = tokens
                .iter()
                .any(|t| matches!(t, Token::Placeholder { name: n, .. } if n == name));
            if !known {
                return Err(PatternError::UnknownPlaceholder {
                    template: template.to_string(),
                    name: name.clone(),
                });
            }
        }

        let mut source = String::from("^");
        let mut segments = Vec::with_capacity(tokens.len());
        let mut params = Vec::new();
        let mut group = 1;

        for token in tokens {
            match token {
                Token::Literal(text) => {
                    source.push_str(&self.engine.escape(text));
                    segments.push(Segment::Literal(text.to_string()));
                }
                Token::Placeholder {
                    name, constraint, ..
                } => {
                    let constraint = match (constraint, declared.get(name)) {
                        (Some(_), Some(_)) => {
                            return Err(PatternError::ConflictingConstraint {
                                name: name.to_string(),
                            })
                        }
                        (Some(inline), None) => inline,
                        (None, Some(declared)) => declared.as_str(),
                        (None, None) => DEFAULT_CONSTRAINT,
                    };

                    let invalid = |source| PatternError::InvalidConstraint {
                        name: name.to_string(),
                        constraint: constraint.to_string(),
                        source,
                    };
                    // Must compile unwrapped, or a stray `)` escapes its group.
                    let bare = self.engine.compile(constraint).map_err(invalid)?;
                    let inner_groups = bare.group_count();
                    let validator = self
                        .engine
                        .compile(&format!("^(?:{})$", constraint))
                        .map_err(invalid)?;

                    source.push('(');
                    source.push_str(constraint);
                    source.push(')');

                    segments.push(Segment::Placeholder {
                        name: name.to_string(),
                        constraint: constraint.to_string(),
                    });
                    params.push(ParamSlot {
                        name: name.to_string(),
                        constraint: constraint.to_string(),
                        group,
                        validator,
                    });
                    group += 1 + inner_groups;
                }
            }
        }
        source.push('$');

        let regex = self.engine.compile(&source)?;
        debug_assert_eq!(regex.group_count(), group - 1);

        tracing::debug!(
            template = %template,
            regex = %source,
            engine = self.engine.name(),
            "Compiled route pattern"
        );
        metrics::record_pattern_compiled();

        Ok(RoutePattern {
            template: template.to_string(),
            segments,
            regex,
            params,
            engine_name: self.engine.name().to_string(),
        })
    }
}

impl Default for PatternCompiler {
    fn default() -> Self {
        Self::new(Arc::new(NativeEngine::new()))
    }
}
