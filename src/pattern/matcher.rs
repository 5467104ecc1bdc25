//! Matching paths against, and rendering paths from, a compiled pattern.

use indexmap::IndexMap;

use crate::pattern::compiler::{RoutePattern, Segment};
use crate::pattern::error::{RenderError, RenderResult};

/// Raw placeholder values in declaration order.
pub type Params = IndexMap<String, String>;

/// Outcome of matching a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    NoMatch,
    /// One entry per declared placeholder, in declaration order.
    Matched(Params),
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    pub fn params(&self) -> Option<&Params> {
        match self {
            MatchResult::Matched(params) => Some(params),
            MatchResult::NoMatch => None,
        }
    }

    pub fn into_params(self) -> Option<Params> {
        match self {
            MatchResult::Matched(params) => Some(params),
            MatchResult::NoMatch => None,
        }
    }
}

impl RoutePattern {
    /// Match the whole of `path`.
    pub fn matches(&self, path: &str) -> MatchResult {
        let Some(groups) = self.regex().captures(path) else {
            return MatchResult::NoMatch;
        };

        let params = self
            .params
            .iter()
            .map(|slot| {
                let value = groups
                    .get(slot.group - 1)
                    .copied()
                    .flatten()
                    .unwrap_or_default();
                (slot.name.clone(), value.to_string())
            })
            .collect();
        MatchResult::Matched(params)
    }

    /// Returns true if the whole of `path` matches.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex().is_match(path)
    }

    /// Render a path from raw values.
    ///
    /// Every placeholder needs a value that fully matches its own constraint.
    /// Entries for names that are not placeholders are ignored.
    pub fn render<V: AsRef<str>>(&self, values: &IndexMap<String, V>) -> RenderResult<String> {
        self.render_with(|name| values.get(name).map(|v| v.as_ref()))
    }

    /// Render a path, asking `lookup` for each placeholder value in
    /// template order.
    ///
    /// The rendered path is matched back; if any placeholder would capture
    /// something other than its value the render fails with
    /// [`RenderError::Ambiguous`].
    pub fn render_with<'v, F>(&self, mut lookup: F) -> RenderResult<String>
    where
        F: FnMut(&str) -> Option<&'v str>,
    {
        let mut out = String::with_capacity(self.template().len());
        let mut slots = self.params.iter();
        let mut substituted: Vec<&'v str> = Vec::with_capacity(self.params.len());

        for segment in self.segments() {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { name, constraint } => {
                    let value = lookup(name).ok_or_else(|| RenderError::MissingParameter {
                        name: name.clone(),
                    })?;
                    let satisfied = slots
                        .next()
                        .is_some_and(|slot| slot.validator.is_match(value));
                    if !satisfied {
                        return Err(RenderError::ConstraintViolation {
                            name: name.clone(),
                            value: value.to_string(),
                            constraint: constraint.clone(),
                        });
                    }
                    out.push_str(value);
                    substituted.push(value);
                }
            }
        }
        self.verify_rendered(&out, &substituted)?;
        Ok(out)
    }

    fn verify_rendered(&self, path: &str, substituted: &[&str]) -> RenderResult<()> {
        let groups = self.regex().captures(path);
        for (slot, expected) in self.params.iter().zip(substituted) {
            let captured = groups
                .as_ref()
                .and_then(|g| g.get(slot.group - 1).copied().flatten());
            if captured != Some(*expected) {
                return Err(RenderError::Ambiguous {
                    name: slot.name.clone(),
                    path: path.to_string(),
                });
            }
        }
        Ok(())
    }
}
