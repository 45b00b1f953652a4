//! Query string and cookie parsing.
//!
//! Both parsers share one fold: parts are sorted, split on the first `=`,
//! percent-decoded, and inserted last-write-wins. Pairs whose decoded value
//! is empty never reach the map.
//!
//! Sorting happens before the fold, so on duplicate keys the
//! lexicographically greatest `key=value` part wins rather than the last
//! one in request order (`a=2&a=1` yields `a=2`).

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

/// Percent-decode `raw`, returning it untouched if it is malformed.
///
/// Malformed means a `%` not followed by two hex digits, or escapes that do
/// not form valid UTF-8. `+` is left alone.
pub fn decode_component(raw: &str) -> String {
    if !raw.contains('%') {
        return raw.to_string();
    }
    if !escapes_well_formed(raw) {
        return raw.to_string();
    }
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

fn escapes_well_formed(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .map(|pair| pair.iter().all(u8::is_ascii_hexdigit))
                .unwrap_or(false);
            if !valid {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

/// Parse a raw query string (leading `?` optional).
pub fn parse_query(raw: &str) -> HashMap<String, String> {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    if raw.is_empty() {
        return HashMap::new();
    }
    fold_pairs(raw.split('&').collect())
}

/// Parse a `cookie` header value.
///
/// Pairs must be separated by `"; "`: every `;` is removed and the rest is
/// split on spaces.
pub fn parse_cookie(raw: &str) -> HashMap<String, String> {
    if raw.is_empty() {
        return HashMap::new();
    }
    let stripped = raw.replace(';', "");
    fold_pairs(stripped.split(' ').collect())
}

fn fold_pairs(mut parts: Vec<&str>) -> HashMap<String, String> {
    parts.sort_unstable();
    parts.into_iter().fold(HashMap::new(), |mut acc, part| {
        let (key, value) = part.split_once('=').unwrap_or((part, ""));
        let value = decode_component(value);
        if !value.is_empty() {
            acc.insert(decode_component(key), value);
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component("hello%20world"), "hello world");
        assert_eq!(decode_component("caf%C3%A9"), "café");
        assert_eq!(decode_component("a+b"), "a+b");
        // Malformed escapes fall back to the raw input as a whole.
        assert_eq!(decode_component("a%20%zz"), "a%20%zz");
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%E4%B8"), "%E4%B8");
    }

    #[test]
    fn test_parse_query_basic() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("?").is_empty());
        assert_eq!(parse_query("?a=1&b=two"), map(&[("a", "1"), ("b", "two")]));
        assert_eq!(parse_query("q=a%20b&k%31=v"), map(&[("q", "a b"), ("k1", "v")]));
    }

    #[test]
    fn test_parse_query_drops_empty_values() {
        assert_eq!(parse_query("a=1&a=2&b="), map(&[("a", "2")]));
        assert!(parse_query("flag").is_empty());
        assert!(parse_query("a=&&b").is_empty());
    }

    #[test]
    fn test_parse_query_sorted_fold() {
        // Sorting runs before the fold, so request order does not decide.
        assert_eq!(parse_query("a=2&a=1"), map(&[("a", "2")]));
        assert_eq!(parse_query("a=1&a=2"), map(&[("a", "2")]));
    }

    #[test]
    fn test_parse_query_value_keeps_later_equals() {
        assert_eq!(parse_query("expr=a=b"), map(&[("expr", "a=b")]));
    }

    #[test]
    fn test_parse_cookie() {
        assert!(parse_cookie("").is_empty());
        assert_eq!(
            parse_cookie("session=abc; theme=dark%20blue; empty="),
            map(&[("session", "abc"), ("theme", "dark blue")])
        );
        // Without the space separator the pairs run together.
        assert_eq!(parse_cookie("a=1;b=2"), map(&[("a", "1b=2")]));
    }
}
