//! HTTP response helpers
//!
//! Every sign-in outcome leaves the service through one of these builders so
//! status codes and body shapes stay consistent across handlers.

use actix_web::{cookie::Cookie, http::header, HttpResponse};

use crate::models::{AuthError, AuthResult};

/// Unified response builder for sign-in outcomes
pub struct ResponseBuilder;

impl ResponseBuilder {
    /// 200 with `{"email", "authentication_token"}`
    #[must_use]
    pub fn auth_success(result: &AuthResult) -> HttpResponse {
        Self::auth_success_with_cookies(result, Vec::new())
    }

    /// 200 sign-in payload, attaching cookies (used to clear the state cookie)
    #[must_use]
    pub fn auth_success_with_cookies(
        result: &AuthResult,
        cookies: Vec<Cookie<'static>>,
    ) -> HttpResponse {
        let mut builder = HttpResponse::Ok();
        for cookie in cookies {
            builder.cookie(cookie);
        }
        builder
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(result)
    }

    /// 401 with `{"error"}`
    #[must_use]
    pub fn auth_failure(error: &AuthError) -> HttpResponse {
        Self::auth_failure_with_cookies(error, Vec::new())
    }

    /// 401 failure payload, attaching cookies
    #[must_use]
    pub fn auth_failure_with_cookies(
        error: &AuthError,
        cookies: Vec<Cookie<'static>>,
    ) -> HttpResponse {
        let mut builder = HttpResponse::Unauthorized();
        for cookie in cookies {
            builder.cookie(cookie);
        }
        builder
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(error)
    }

    /// Create a redirect response (302 Found) with cookies
    #[must_use]
    pub fn redirect_with_cookies(location: &str, cookies: Vec<Cookie<'static>>) -> HttpResponse {
        let mut builder = HttpResponse::Found();
        for cookie in cookies {
            builder.cookie(cookie);
        }
        builder
            .append_header((header::LOCATION, location.to_string()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_auth_success_response() {
        let result = AuthResult {
            email: "a@example.com".to_string(),
            authentication_token: "00112233445566778899aabbccddeeff".to_string(),
        };
        let response = ResponseBuilder::auth_success(&result);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["email"], "a@example.com");
        assert_eq!(
            json["authentication_token"],
            "00112233445566778899aabbccddeeff"
        );
    }

    #[actix_web::test]
    async fn test_auth_failure_response() {
        let response = ResponseBuilder::auth_failure(&AuthError::new("access_denied"));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "access_denied" }));
    }

    #[test]
    fn test_redirect_with_cookies() {
        let response = ResponseBuilder::redirect_with_cookies(
            "https://accounts.google.com/o/oauth2/v2/auth",
            vec![Cookie::new("a", "b")],
        );
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://accounts.google.com/o/oauth2/v2/auth"
        );
        assert_eq!(response.cookies().count(), 1);
    }
}
