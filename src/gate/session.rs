//! Session marker detection.
//!
//! Only presence is checked; the cookie value is authoritative to the backend alone.

use axum::http::{header, HeaderMap};
use cookie::Cookie;

/// Whether the request carries the session marker cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Present,
    Absent,
}

impl SessionState {
    /// Look for a non-empty `cookie_name` in every `Cookie` header.
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Self {
        let present = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| Cookie::split_parse(value))
            .filter_map(Result::ok)
            .any(|cookie| cookie.name() == cookie_name && !cookie.value().is_empty());

        Self::from(present)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, SessionState::Present)
    }
}

impl From<bool> for SessionState {
    fn from(present: bool) -> Self {
        if present {
            SessionState::Present
        } else {
            SessionState::Absent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        headers
    }

    #[test]
    fn test_no_cookie_header() {
        assert_eq!(SessionState::from_headers(&HeaderMap::new(), "access_token"), SessionState::Absent);
    }

    #[test]
    fn test_cookie_present() {
        let h = headers(&["theme=dark; access_token=eyJhbGciOi.x.y; lang=es"]);
        assert_eq!(SessionState::from_headers(&h, "access_token"), SessionState::Present);
    }

    #[test]
    fn test_cookie_in_second_header() {
        let h = headers(&["theme=dark", "access_token=abc"]);
        assert!(SessionState::from_headers(&h, "access_token").is_present());
    }

    #[test]
    fn test_value_is_not_validated() {
        let h = headers(&["access_token=forged"]);
        assert!(SessionState::from_headers(&h, "access_token").is_present());
    }

    #[test]
    fn test_empty_value_is_absent() {
        let h = headers(&["access_token="]);
        assert_eq!(SessionState::from_headers(&h, "access_token"), SessionState::Absent);
    }

    #[test]
    fn test_other_cookie_names_ignored() {
        let h = headers(&["refresh_token=abc; access_token_old=1"]);
        assert_eq!(SessionState::from_headers(&h, "access_token"), SessionState::Absent);
    }
}
