//! Route template scanner.
//!
//! Splits a template such as `/item/{id: [0-9]+}/{slug}` into literal runs
//! and placeholder spans. Braces inside a constraint nest, so `{year: [0-9]{4}}`
//! is one placeholder; braces inside a character class or after `\` are not
//! counted. Braces never appear in literal text.

use std::collections::HashSet;

use crate::pattern::error::{PatternError, PatternResult};

/// One lexical piece of a template, borrowed from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'t> {
    Literal(&'t str),
    Placeholder {
        name: &'t str,
        /// Inline constraint, trimmed; `None` when the span has no `:`.
        constraint: Option<&'t str>,
        /// Byte offset of the opening `{`.
        position: usize,
    },
}

fn syntax_error(template: &str, position: usize, message: &'static str) -> PatternError {
    PatternError::Syntax {
        template: template.to_string(),
        position,
        message,
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Index of the `}` closing the span whose body starts at `start`.
///
/// Escaped bytes and character classes are skipped, so `\}` and `[}]` do
/// not close the span.
fn find_closing_brace(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut class_depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'[' => {
                class_depth += 1;
                // A `]` right after `[` or `[^` is literal.
                if bytes.get(i + 1) == Some(&b'^') {
                    i += 1;
                }
                if bytes.get(i + 1) == Some(&b']') {
                    i += 1;
                }
            }
            b']' if class_depth > 0 => class_depth -= 1,
            _ if class_depth > 0 => {}
            b'{' => depth += 1,
            b'}' if depth == 0 => return Some(i),
            b'}' => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    None
}

/// Scan a template into tokens.
///
/// Rejects unterminated spans, stray closing braces, empty or
/// non-identifier names, empty constraints and duplicate names.
pub fn tokenize(template: &str) -> PatternResult<Vec<Token<'_>>> {
    let bytes = template.as_bytes();
    let mut tokens = Vec::new();
    let mut seen = HashSet::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                if literal_start < i {
                    tokens.push(Token::Literal(&template[literal_start..i]));
                }
                let close = find_closing_brace(bytes, i + 1)
                    .ok_or_else(|| syntax_error(template, i, "unterminated placeholder"))?;
                let body = &template[i + 1..close];
                let (name, constraint) = match body.split_once(':') {
                    Some((name, constraint)) => (name.trim(), Some(constraint.trim())),
                    None => (body.trim(), None),
                };

                if name.is_empty() {
                    return Err(syntax_error(template, i, "placeholder has no name"));
                }
                if !is_identifier(name) {
                    return Err(syntax_error(template, i, "placeholder name is not an identifier"));
                }
                if constraint == Some("") {
                    return Err(syntax_error(template, i, "placeholder constraint is empty"));
                }
                if !seen.insert(name) {
                    return Err(PatternError::DuplicatePlaceholder {
                        template: template.to_string(),
                        name: name.to_string(),
                    });
                }

                tokens.push(Token::Placeholder {
                    name,
                    constraint,
                    position: i,
                });
                i = close + 1;
                literal_start = i;
            }
            b'}' => return Err(syntax_error(template, i, "unmatched `}`")),
            _ => i += 1,
        }
    }

    if literal_start < bytes.len() {
        tokens.push(Token::Literal(&template[literal_start..]));
    }
    Ok(tokens)
}

/// Placeholder names in template order.
pub fn placeholder_names(template: &str) -> PatternResult<Vec<&str>> {
    Ok(tokenize(template)?
        .into_iter()
        .filter_map(|t| match t {
            Token::Placeholder { name, .. } => Some(name),
            Token::Literal(_) => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder(
        name: &'static str,
        constraint: Option<&'static str>,
        position: usize,
    ) -> Token<'static> {
        Token::Placeholder {
            name,
            constraint,
            position,
        }
    }

    #[test]
    fn test_literal_only() {
        assert_eq!(tokenize("/about/team").unwrap(), vec![Token::Literal("/about/team")]);
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_placeholders() {
        let tokens = tokenize("/foo/{name}/{id: [0-9]+}").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("/foo/"),
                placeholder("name", None, 5),
                Token::Literal("/"),
                placeholder("id", Some("[0-9]+"), 12),
            ]
        );
    }

    #[test]
    fn test_nested_braces_in_constraint() {
        let tokens = tokenize("/{year: [0-9]{4}}-{month:[0-9]{1,2}}").unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1], placeholder("year", Some("[0-9]{4}"), 1));
        assert_eq!(tokens[3], placeholder("month", Some("[0-9]{1,2}"), 18));
    }

    #[test]
    fn test_braces_in_class_and_escape() {
        assert_eq!(
            tokenize("/x/{a: [}]+}").unwrap(),
            vec![Token::Literal("/x/"), placeholder("a", Some("[}]+"), 3)]
        );
        assert_eq!(
            tokenize("{a: []{]+}").unwrap(),
            vec![placeholder("a", Some("[]{]+"), 0)]
        );
        assert_eq!(
            tokenize("{a: \\}+}/b").unwrap(),
            vec![placeholder("a", Some("\\}+"), 0), Token::Literal("/b")]
        );
        assert!(tokenize("/x/{a: [}+}").is_err());
    }

    #[test]
    fn test_constraint_with_colon() {
        let tokens = tokenize("{kind: (?:a|b)}").unwrap();
        assert_eq!(tokens, vec![placeholder("kind", Some("(?:a|b)"), 0)]);
    }

    #[test]
    fn test_adjacent_placeholders() {
        let names = placeholder_names("{a}{b}.{c}").unwrap();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unterminated() {
        let err = tokenize("/foo/{name").unwrap_err();
        assert_eq!(
            err,
            PatternError::Syntax {
                template: "/foo/{name".into(),
                position: 5,
                message: "unterminated placeholder",
            }
        );
        assert!(tokenize("/foo/{id: [0-9]{2}").is_err());
    }

    #[test]
    fn test_stray_closing_brace() {
        assert!(matches!(
            tokenize("/foo}/bar"),
            Err(PatternError::Syntax { position: 4, .. })
        ));
    }

    #[test]
    fn test_bad_names() {
        assert!(tokenize("/x/{}").is_err());
        assert!(tokenize("/x/{: [a-z]+}").is_err());
        assert!(tokenize("/x/{1abc}").is_err());
        assert!(tokenize("/x/{a-b}").is_err());
        assert!(tokenize("/x/{a:}").is_err());
        assert!(tokenize("/x/{ _ok1 }").is_ok());
    }

    #[test]
    fn test_duplicate_names() {
        let err = tokenize("/x/{a}/{a}").unwrap_err();
        assert_eq!(
            err,
            PatternError::DuplicatePlaceholder {
                template: "/x/{a}/{a}".into(),
                name: "a".into(),
            }
        );
    }
}
