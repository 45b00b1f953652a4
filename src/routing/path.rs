//! Path canonicalization and segmentation.

/// Canonicalize a path.
///
/// Empty input becomes `/`, a missing leading slash is added, and with
/// `ignore_trailing_slash` any trailing slashes are removed (the root stays
/// `/`). The result is stable under repeated application.
pub fn normalize(path: &str, ignore_trailing_slash: bool) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    let mut canonical = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    if ignore_trailing_slash {
        while canonical.len() > 1 && canonical.ends_with('/') {
            canonical.pop();
        }
    }
    canonical
}

/// Split a path into trimmed, non-empty segments.
pub fn split(path: &str) -> Vec<&str> {
    path.split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}
