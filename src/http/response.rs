//! Outbound response record.
//!
//! # Responsibilities
//! - Carry status code, headers and body back to the caller
//! - Provide builders for the common text and JSON shapes
//! - Build the fixed fallback responses (404, 405, 500)
//!
//! # Design Decisions
//! - Body is always a string; no streaming
//! - Headers are a plain map; setting an existing name replaces its value

use std::collections::HashMap;

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::http::request::replace_header;

/// Content type used for every JSON body the router produces.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// The outbound response record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: String,
}

impl Response {
    /// Empty response with the given status.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status_code: status.as_u16(),
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    /// Plain text response.
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status)
            .with_header("content-type", "text/plain; charset=utf-8")
            .with_body(body)
    }

    /// JSON response; fails only if `value` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(
        status: StatusCode,
        value: &T,
    ) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(value)?;
        Ok(Self::new(status)
            .with_header("content-type", JSON_CONTENT_TYPE)
            .with_body(body))
    }

    /// `{"message": ...}` body with the JSON content type.
    pub fn message(status: StatusCode, message: &str) -> Self {
        let body = serde_json::json!({ "message": message }).to_string();
        Self::new(status)
            .with_header("content-type", JSON_CONTENT_TYPE)
            .with_body(body)
    }

    pub fn not_found() -> Self {
        Self::message(StatusCode::NOT_FOUND, "Not Found")
    }

    /// 405 with an `Allow` header listing `allowed` in the given order.
    pub fn method_not_allowed<S: AsRef<str>>(allowed: &[S]) -> Self {
        let allow = allowed
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ");
        Self::message(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
            .with_header("Allow", allow)
    }

    pub fn internal_error() -> Self {
        Self::message(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }

    /// Set a header, replacing any previous value.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        replace_header(&mut self.headers, name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(StatusCode::OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_bodies() {
        let res = Response::not_found();
        assert_eq!(res.status_code, 404);
        assert_eq!(res.body, r#"{"message":"Not Found"}"#);
        assert_eq!(res.header("content-type"), Some(JSON_CONTENT_TYPE));

        let res = Response::method_not_allowed(&["GET", "POST"]);
        assert_eq!(res.status_code, 405);
        assert_eq!(res.header("allow"), Some("GET, POST"));
        assert_eq!(res.body, r#"{"message":"Method Not Allowed"}"#);

        let res = Response::internal_error();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body, r#"{"message":"Internal Server Error"}"#);
    }

    #[test]
    fn test_serialize_shape() {
        let res = Response::text(StatusCode::CREATED, "ok");
        let value = serde_json::to_value(&res).unwrap();
        assert_eq!(value["statusCode"], 201);
        assert_eq!(value["body"], "ok");
        assert_eq!(value["headers"]["content-type"], "text/plain; charset=utf-8");
    }

    #[test]
    fn test_with_header_replaces_any_case() {
        let res = Response::text(StatusCode::OK, "ok")
            .with_header("X-Powered-By", "handler")
            .with_header("x-powered-by", "router");
        let matching: Vec<_> = res
            .headers
            .keys()
            .filter(|k| k.eq_ignore_ascii_case("x-powered-by"))
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(res.header("X-Powered-By"), Some("router"));
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
    }
}
