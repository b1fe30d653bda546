use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;

/// Cookie carrying the OAuth state between the request and callback phases
pub const OAUTH_STATE_COOKIE: &str = "curator_oauth_state";

/// Lifetime of the state cookie; the user has this long to finish consent
pub const OAUTH_STATE_TTL_MINUTES: i64 = 10;

/// Create the short-lived cookie holding the OAuth state
///
/// `SameSite=Lax` so the cookie survives the top-level redirect back from Google.
#[must_use]
pub fn create_state_cookie(state: &str, secure: bool) -> Cookie<'static> {
    Cookie::build(OAUTH_STATE_COOKIE, state.to_owned())
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/auth")
        .max_age(Duration::minutes(OAUTH_STATE_TTL_MINUTES))
        .finish()
}

/// Create an expired cookie to clear the OAuth state cookie
#[must_use]
pub fn create_expired_state_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build(OAUTH_STATE_COOKIE, "")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/auth")
        .max_age(Duration::seconds(-1))
        .finish()
}

/// Read the stored OAuth state from the request, if any
#[must_use]
pub fn extract_state_cookie(req: &HttpRequest) -> Option<String> {
    req.cookie(OAUTH_STATE_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_state_cookie_attributes() {
        let cookie = create_state_cookie("abc", true);
        assert_eq!(cookie.name(), OAUTH_STATE_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(Duration::minutes(10)));
    }

    #[test]
    fn test_expired_state_cookie() {
        let cookie = create_expired_state_cookie(false);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::seconds(-1)));
    }

    #[test]
    fn test_extract_state_cookie() {
        let req = TestRequest::default()
            .cookie(Cookie::new(OAUTH_STATE_COOKIE, "stored"))
            .to_http_request();
        assert_eq!(extract_state_cookie(&req).as_deref(), Some("stored"));

        let empty = TestRequest::default()
            .cookie(Cookie::new(OAUTH_STATE_COOKIE, ""))
            .to_http_request();
        assert_eq!(extract_state_cookie(&empty), None);

        let none = TestRequest::default().to_http_request();
        assert_eq!(extract_state_cookie(&none), None);
    }
}
