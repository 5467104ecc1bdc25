//! Backend built on the `regex` crate.
//!
//! The `regex` crate runs in time linear in the input, so constraints with
//! nested quantifiers cannot blow up at match time. Program size is bounded
//! by `size_limit` instead.

use regex::{Regex, RegexBuilder};

use crate::engine::{CompiledRegex, EngineError, RegexEngine};

/// Default compiled-program size limit (1 MiB).
pub const DEFAULT_SIZE_LIMIT: usize = 1024 * 1024;

/// The built-in engine.
#[derive(Debug, Clone)]
pub struct NativeEngine {
    size_limit: usize,
}

impl NativeEngine {
    /// Create an engine with the default size limit.
    pub fn new() -> Self {
        Self::with_size_limit(DEFAULT_SIZE_LIMIT)
    }

    /// Create an engine that rejects expressions whose compiled program
    /// exceeds `size_limit` bytes.
    pub fn with_size_limit(size_limit: usize) -> Self {
        Self { size_limit }
    }

    pub fn size_limit(&self) -> usize {
        self.size_limit
    }
}

impl Default for NativeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RegexEngine for NativeEngine {
    fn name(&self) -> &str {
        "regex"
    }

    fn compile(&self, pattern: &str) -> Result<Box<dyn CompiledRegex>, EngineError> {
        let regex = RegexBuilder::new(pattern)
            .size_limit(self.size_limit)
            .build()
            .map_err(|e| EngineError {
                engine: self.name().to_string(),
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(Box::new(NativeRegex { regex }))
    }

    fn escape(&self, literal: &str) -> String {
        regex::escape(literal)
    }
}

#[derive(Debug)]
struct NativeRegex {
    regex: Regex,
}

impl CompiledRegex for NativeRegex {
    fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    fn captures<'h>(&self, input: &'h str) -> Option<Vec<Option<&'h str>>> {
        let caps = self.regex.captures(input)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str()))
                .collect(),
        )
    }

    fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_name() {
        assert_eq!(NativeEngine::new().name(), "regex");
    }

    #[test]
    fn test_compile_and_capture() {
        let engine = NativeEngine::new();
        let re = engine.compile(r"^/a/([0-9]+)/(x)?$").unwrap();
        assert_eq!(re.group_count(), 2);
        assert_eq!(re.as_str(), r"^/a/([0-9]+)/(x)?$");

        let caps = re.captures("/a/42/").unwrap();
        assert_eq!(caps, vec![Some("42"), None]);
        assert!(re.captures("/a/b/").is_none());
        assert!(re.is_match("/a/1/x"));
    }

    #[test]
    fn test_escape() {
        let engine = NativeEngine::new();
        let re = engine.compile(&format!("^{}$", engine.escape("/a.b/(c)"))).unwrap();
        assert!(re.is_match("/a.b/(c)"));
        assert!(!re.is_match("/axb/c"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = NativeEngine::new().compile("([0-9]").unwrap_err();
        assert_eq!(err.engine, "regex");
        assert_eq!(err.pattern, "([0-9]");
    }

    #[test]
    fn test_size_limit() {
        let engine = NativeEngine::with_size_limit(16);
        assert!(engine.compile(r"\w{1000}").is_err());
    }
}
