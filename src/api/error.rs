//! Backend API errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(err) => err.status().map(|s| s.as_u16()),
            ApiError::Url(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Pull `detail` out of an error body.
///
/// The backend answers `{"detail": "..."}`, or a list of field errors on
/// validation failures. Non-JSON bodies are returned trimmed.
pub(crate) fn parse_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        },
        Err(_) => Some(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_detail() {
        assert_eq!(
            parse_detail(r#"{"detail":"Active subscription required"}"#).as_deref(),
            Some("Active subscription required")
        );
    }

    #[test]
    fn test_parse_structured_detail() {
        let detail = parse_detail(r#"{"detail":[{"loc":["body","code"],"msg":"field required"}]}"#).unwrap();
        assert!(detail.contains("field required"));
    }

    #[test]
    fn test_parse_missing_or_plain_detail() {
        assert_eq!(parse_detail(""), None);
        assert_eq!(parse_detail(r#"{"error":"x"}"#), None);
        assert_eq!(parse_detail(" Bad Gateway \n").as_deref(), Some("Bad Gateway"));
    }

    #[test]
    fn test_status_display() {
        let err = ApiError::Status {
            status: 403,
            detail: Some("Active subscription required".into()),
        };
        assert_eq!(err.to_string(), "backend returned 403: Active subscription required");
        assert!(err.is_forbidden());

        let err = ApiError::Status { status: 401, detail: None };
        assert_eq!(err.to_string(), "backend returned 401: no detail");
        assert!(err.is_unauthorized());
        assert!(!err.is_not_found());
    }
}
