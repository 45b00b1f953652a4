//! Inbound event record.
//!
//! # Responsibilities
//! - Deserialize the invocation payload (camelCase keys)
//! - Expose method, raw path, raw query and headers to the dispatcher
//! - Locate the cookie string (header or cookie list)
//!
//! # Design Decisions
//! - Header names are looked up case-insensitively; values are kept as sent
//! - Missing fields deserialize to empty values rather than failing
//! - The record is cloned once per dispatch so the error handler sees the
//!   request as it was before any middleware touched it

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Header carrying cookies on a plain HTTP request.
pub const COOKIE: &str = "cookie";

/// The inbound request record handed to the dispatcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Request {
    /// Path as received, without query string.
    pub raw_path: String,

    /// Query string as received, with or without a leading `?`.
    pub raw_query_string: String,

    /// Request headers.
    pub headers: HashMap<String, String>,

    /// Cookies delivered as a list instead of a `cookie` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<String>>,

    /// Invocation metadata.
    pub request_context: RequestContext,

    /// Request body, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Invocation metadata wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestContext {
    pub http: HttpDescription,
}

/// HTTP-level description of the invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpDescription {
    pub method: String,
}

impl Request {
    /// Create a request for the given method and raw path.
    pub fn new(method: impl Into<String>, raw_path: impl Into<String>) -> Self {
        Self {
            raw_path: raw_path.into(),
            request_context: RequestContext {
                http: HttpDescription {
                    method: method.into(),
                },
            },
            ..Self::default()
        }
    }

    /// Set the raw query string.
    pub fn with_query(mut self, raw_query_string: impl Into<String>) -> Self {
        self.raw_query_string = raw_query_string.into();
        self
    }

    /// Set a header, replacing any previous value.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Set a header in place, replacing any entry whose name differs only
    /// in ASCII case.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        replace_header(&mut self.headers, name.into(), value.into());
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The request method as sent by the caller.
    pub fn method(&self) -> &str {
        &self.request_context.http.method
    }

    /// Look up a header, ignoring ASCII case of the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Raw cookie string for this request.
    ///
    /// The `cookie` header wins; otherwise the cookie list is joined with
    /// `"; "`, the separator the cookie parser expects.
    pub fn cookie_header(&self) -> Option<String> {
        if let Some(header) = self.header(COOKIE) {
            return Some(header.to_string());
        }
        self.cookies
            .as_ref()
            .filter(|list| !list.is_empty())
            .map(|list| list.join("; "))
    }
}

/// Insert `name`, dropping every existing key equal to it ignoring ASCII case.
pub(crate) fn replace_header(headers: &mut HashMap<String, String>, name: String, value: String) {
    headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
    headers.insert(name, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_event() {
        let raw = r#"{
            "rawPath": "/users/42",
            "rawQueryString": "a=1",
            "headers": { "Host": "example.com" },
            "requestContext": { "http": { "method": "GET", "sourceIp": "1.2.3.4" } },
            "version": "2.0"
        }"#;
        let req: Request = serde_json::from_str(raw).unwrap();
        assert_eq!(req.method(), "GET");
        assert_eq!(req.raw_path, "/users/42");
        assert_eq!(req.raw_query_string, "a=1");
        assert_eq!(req.header("host"), Some("example.com"));
        assert!(req.body.is_none());
    }

    #[test]
    fn test_missing_fields_default() {
        let req: Request = serde_json::from_str("{}").unwrap();
        assert_eq!(req.method(), "");
        assert_eq!(req.raw_path, "");
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_cookie_source() {
        let req = Request::new("GET", "/").with_header("Cookie", "a=1; b=2");
        assert_eq!(req.cookie_header().as_deref(), Some("a=1; b=2"));

        let mut req = Request::new("GET", "/");
        req.cookies = Some(vec!["a=1".into(), "b=2".into()]);
        assert_eq!(req.cookie_header().as_deref(), Some("a=1; b=2"));

        let req = Request::new("GET", "/");
        assert_eq!(req.cookie_header(), None);
    }

    #[test]
    fn test_set_header_replaces_any_case() {
        let mut req = Request::new("POST", "/")
            .with_header("X-Request-Id", "client")
            .with_body("payload");
        req.set_header("x-request-id", "server");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.header("X-REQUEST-ID"), Some("server"));
        assert_eq!(req.headers.get("x-request-id").map(String::as_str), Some("server"));
        assert_eq!(req.body.as_deref(), Some("payload"));
    }
}
