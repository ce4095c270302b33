//! Envelope response format for all API responses.
//!
//! Every JSON response is wrapped in a consistent envelope:
//! ```json
//! {
//!   "data": { ... },
//!   "meta": { "request_id": "...", "timestamp": "...", "response_time_ms": 5 },
//!   "errors": [],
//!   "_links": { "self": "..." }
//! }
//! ```

use std::collections::HashMap;

use serde::Serialize;

/// Envelope response wrapping all API data.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// The main response payload. `null` on errors.
    pub data: Option<T>,

    pub meta: ApiMeta,

    /// Error list (empty on success).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,

    #[serde(rename = "_links", skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, String>,
}

/// Metadata included in every response.
#[derive(Debug, Serialize)]
pub struct ApiMeta {
    pub request_id: String,
    /// RFC 3339 timestamp of the response.
    pub timestamp: String,
    pub response_time_ms: u64,
}

/// Individual error detail.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    pub message: String,
}

impl ApiMeta {
    fn now(request_id: String, response_time_ms: u64) -> Self {
        Self {
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
            response_time_ms,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, request_id: String, response_time_ms: u64) -> Self {
        Self {
            data: Some(data),
            meta: ApiMeta::now(request_id, response_time_ms),
            errors: Vec::new(),
            links: HashMap::new(),
        }
    }

    /// Add a HATEOAS link.
    pub fn with_link(mut self, rel: &str, href: &str) -> Self {
        self.links.insert(rel.to_string(), href.to_string());
        self
    }
}

impl ApiResponse<()> {
    /// An error envelope carrying a single error and no data.
    pub fn error(code: &str, message: &str, request_id: String) -> Self {
        Self {
            data: None,
            meta: ApiMeta::now(request_id, 0),
            errors: vec![ApiErrorDetail {
                code: code.to_string(),
                message: message.to_string(),
            }],
            links: HashMap::new(),
        }
    }
}

/// Links shared by every session-scoped response.
pub fn session_links<T: Serialize>(resp: ApiResponse<T>, id: &str) -> ApiResponse<T> {
    let base = format!("/api/v1/sessions/{id}");
    resp.with_link("self", &base)
        .with_link("advance", &format!("{base}/advance"))
        .with_link("retreat", &format!("{base}/retreat"))
        .with_link("answers", &format!("{base}/answers"))
        .with_link("submit", &format!("{base}/submit"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::success(serde_json::json!({"step": 1}), "req-1".to_string(), 3)
            .with_link("self", "/api/v1/sessions/abc");
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["data"]["step"], 1);
        assert_eq!(json["meta"]["request_id"], "req-1");
        assert_eq!(json["meta"]["response_time_ms"], 3);
        assert_eq!(json["_links"]["self"], "/api/v1/sessions/abc");
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_error_envelope_has_null_data() {
        let resp = ApiResponse::error("SESSION_NOT_FOUND", "Session not found", "req-2".to_string());
        let json = serde_json::to_value(&resp).unwrap();

        assert!(json["data"].is_null());
        assert_eq!(json["errors"][0]["code"], "SESSION_NOT_FOUND");
        assert!(json.get("_links").is_none());
    }

    #[test]
    fn test_session_links() {
        let resp = session_links(ApiResponse::success(1, "r".to_string(), 0), "abc");
        assert_eq!(resp.links["submit"], "/api/v1/sessions/abc/submit");
        assert_eq!(resp.links.len(), 5);
    }
}
