//! 会话 cookie
//!
//! 登录后签发的 JWT 放在 HttpOnly cookie `booking_session` 中。
//! API 客户端也可以用 `Authorization: Bearer <token>`。

use http::HeaderMap;
use http::header::{AUTHORIZATION, COOKIE, HeaderValue, InvalidHeaderValue};

pub const SESSION_COOKIE: &str = "booking_session";

/// `Set-Cookie` value carrying a fresh session token
pub fn session_cookie(
    token: &str,
    max_age_seconds: i64,
    secure: bool,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// `Set-Cookie` value that drops the session
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("booking_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Strip the `Bearer ` prefix from an Authorization header
pub fn extract_bearer(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
}

/// Session token from the cookie, falling back to a Bearer header
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string());

    from_cookie.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(extract_bearer)
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; booking_session=abc.def"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer other"));
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc.def"));
    }

    #[test]
    fn bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("booking_session="));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(token_from_headers(&headers).as_deref(), Some("tok"));
        assert_eq!(token_from_headers(&HeaderMap::new()), None);
        assert_eq!(extract_bearer("Basic zzz"), None);
    }

    #[test]
    fn cookie_attributes() {
        let v = session_cookie("t", 3600, true).unwrap();
        let s = v.to_str().unwrap();
        assert!(s.starts_with("booking_session=t;"));
        assert!(s.contains("HttpOnly"));
        assert!(s.contains("Max-Age=3600"));
        assert!(s.ends_with("Secure"));
        assert!(clear_session_cookie().to_str().unwrap().contains("Max-Age=0"));
    }
}
