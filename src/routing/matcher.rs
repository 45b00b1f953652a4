//! Route pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile a pattern such as `/users/:id` into tokens at registration
//! - Match request segments against tokens at dispatch
//!
//! # Design Decisions
//! - Static segments compare case-sensitively and are never decoded
//! - Parameter captures are percent-decoded, falling back to the raw segment
//! - Token count must equal segment count (no wildcards, no prefixes)

use std::collections::HashMap;

use crate::error::{Result, RouteDefinitionError};
use crate::http::decode_component;
use crate::routing::path::{normalize, split};

/// One compiled segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal segment, matched verbatim.
    Static(String),
    /// Named placeholder capturing one segment.
    Param(String),
}

/// Parameter names follow `[A-Za-z_][A-Za-z0-9_]*`.
fn is_valid_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Compile a route pattern into tokens.
pub fn tokenize(pattern: &str) -> Result<Vec<Token>> {
    let normalized = normalize(pattern, true);
    split(&normalized)
        .into_iter()
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) if is_valid_param_name(name) => Ok(Token::Param(name.to_string())),
            Some(name) => Err(RouteDefinitionError::InvalidParam {
                pattern: pattern.to_string(),
                name: name.to_string(),
            }),
            None => Ok(Token::Static(segment.to_string())),
        })
        .collect()
}

/// Match request segments against compiled tokens.
///
/// Returns the captured parameters, or `None` on a structural mismatch.
pub fn match_tokens(tokens: &[Token], segments: &[&str]) -> Option<HashMap<String, String>> {
    if tokens.len() != segments.len() {
        return None;
    }
    let mut params = HashMap::new();
    for (token, segment) in tokens.iter().zip(segments) {
        match token {
            Token::Static(value) => {
                if value != segment {
                    return None;
                }
            }
            Token::Param(name) => {
                params.insert(name.clone(), decode_component(segment));
            }
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert!(tokenize("/").unwrap().is_empty());
        assert_eq!(
            tokenize("/users/:id/posts/:post_id").unwrap(),
            vec![
                Token::Static("users".into()),
                Token::Param("id".into()),
                Token::Static("posts".into()),
                Token::Param("post_id".into()),
            ]
        );
        assert_eq!(
            tokenize("users/:_x1/").unwrap(),
            vec![Token::Static("users".into()), Token::Param("_x1".into())]
        );
    }

    #[test]
    fn test_tokenize_invalid_param() {
        for pattern in ["/users/:", "/users/:1id", "/users/:id-x", "/:a.b"] {
            let err = tokenize(pattern).unwrap_err();
            assert!(
                matches!(err, RouteDefinitionError::InvalidParam { .. }),
                "pattern {pattern:?}"
            );
        }
    }

    #[test]
    fn test_match_captures_decoded() {
        let tokens = tokenize("/files/:name").unwrap();
        let params = match_tokens(&tokens, &["files", "my%20doc"]).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["name"], "my doc");

        let params = match_tokens(&tokens, &["files", "bad%zz"]).unwrap();
        assert_eq!(params["name"], "bad%zz");
    }

    #[test]
    fn test_match_static_not_decoded() {
        let tokens = tokenize("/a b").unwrap();
        assert!(match_tokens(&tokens, &["a%20b"]).is_none());
        assert!(match_tokens(&tokens, &["a b"]).is_some());
    }

    #[test]
    fn test_match_length_mismatch() {
        let tokens = tokenize("/users/:id").unwrap();
        assert!(match_tokens(&tokens, &["users"]).is_none());
        assert!(match_tokens(&tokens, &["users", "1", "extra"]).is_none());
        assert!(match_tokens(&[], &["x"]).is_none());
        assert_eq!(match_tokens(&[], &[]), Some(HashMap::new()));
    }

    #[test]
    fn test_match_case_sensitive() {
        let tokens = tokenize("/Users").unwrap();
        assert!(match_tokens(&tokens, &["users"]).is_none());
        assert!(match_tokens(&tokens, &["Users"]).is_some());
    }
}
