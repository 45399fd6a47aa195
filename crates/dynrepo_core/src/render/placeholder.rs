//! Placeholder token discovery and parsing.
//!
//! # Responsibility
//! - Find `:name` / `:name.property` tokens with plain text tokenization.
//! - Parse raw tokens into root/property references.
//!
//! # Invariants
//! - Discovery is deliberately not SQL-aware: the template is split on
//!   whitespace, comma and parentheses only.
//! - A raw token keeps its exact template spelling so substitution can
//!   replace occurrences verbatim.

use crate::render::{RenderError, RenderResult};
use once_cell::sync::Lazy;
use regex::Regex;

/// Marker that introduces a placeholder token.
pub const PLACEHOLDER_MARKER: char = ':';

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^:[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
        .expect("placeholder pattern must compile")
});

/// One parsed template reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Exact raw spelling in the template, marker included.
    pub raw: String,
    /// Declared parameter name the token resolves against.
    pub root: String,
    /// Optional single-level nested field name.
    pub property: Option<String>,
}

/// Returns whether a template expands objects positionally (INSERT rows).
pub fn is_insert_shaped(template: &str) -> bool {
    template
        .trim_start()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("insert"))
}

/// Discovers distinct raw placeholder tokens in first-seen order.
///
/// INSERT-shaped templates strip a trailing comma adjacent to each raw
/// token before parsing (column-list syntax).
pub fn discover(template: &str) -> Vec<String> {
    let insert_shaped = is_insert_shaped(template);
    let mut tokens: Vec<String> = Vec::new();

    for word in template.split(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')')) {
        if !word.starts_with(PLACEHOLDER_MARKER) {
            continue;
        }
        let raw = if insert_shaped {
            word.trim_end_matches(',')
        } else {
            word
        };
        if !tokens.iter().any(|seen| seen == raw) {
            tokens.push(raw.to_string());
        }
    }

    tokens
}

/// Parses one raw token into a root/property reference.
///
/// # Errors
/// - `MalformedTemplate` when the token violates the placeholder grammar
///   (bad identifier characters, or more than one `.` level).
pub fn parse(raw: &str) -> RenderResult<Placeholder> {
    if !PLACEHOLDER_RE.is_match(raw) {
        return Err(RenderError::MalformedTemplate(format!(
            "token `{raw}` is not a valid placeholder"
        )));
    }

    let body = &raw[1..];
    let (root, property) = match body.split_once('.') {
        Some((root, property)) => (root.to_string(), Some(property.to_string())),
        None => (body.to_string(), None),
    };

    Ok(Placeholder {
        raw: raw.to_string(),
        root,
        property,
    })
}

#[cfg(test)]
mod tests {
    use super::{discover, is_insert_shaped, parse};
    use crate::render::RenderError;

    #[test]
    fn discovers_tokens_between_sql_punctuation() {
        let tokens = discover("SELECT * FROM t WHERE id IN :ids AND name = :name");
        assert_eq!(tokens, vec![":ids".to_string(), ":name".to_string()]);

        let tokens = discover("INSERT INTO t (a, b) VALUES (:u.a,:u.b)");
        assert_eq!(tokens, vec![":u.a".to_string(), ":u.b".to_string()]);
    }

    #[test]
    fn discovery_deduplicates_repeated_spellings() {
        let tokens = discover("SELECT :id, :id");
        assert_eq!(tokens, vec![":id".to_string()]);
    }

    #[test]
    fn insert_prefix_detection_is_case_insensitive() {
        assert!(is_insert_shaped("insert into t VALUES (:v)"));
        assert!(is_insert_shaped("  INSERT INTO t VALUES (:v)"));
        assert!(!is_insert_shaped("SELECT * FROM t"));
    }

    #[test]
    fn parses_root_and_property_forms() {
        let root_only = parse(":user").expect("root token should parse");
        assert_eq!(root_only.root, "user");
        assert_eq!(root_only.property, None);

        let nested = parse(":user.id").expect("nested token should parse");
        assert_eq!(nested.root, "user");
        assert_eq!(nested.property.as_deref(), Some("id"));
    }

    #[test]
    fn rejects_tokens_outside_grammar() {
        for raw in [":", ":1abc", ":a.b.c", ":a..b", ":a-b"] {
            assert!(
                matches!(parse(raw), Err(RenderError::MalformedTemplate(_))),
                "token `{raw}` should be rejected"
            );
        }
    }
}
