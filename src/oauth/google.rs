//! Google OAuth2 strategy
//!
//! Authorization-code flow against Google's token and OpenID userinfo
//! endpoints. Client credentials travel in the token request body.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use super::{OAuthFailure, OAuthStrategy};
use crate::models::ProviderInfo;
use crate::settings::CuratorSettings;
use crate::utils::logging::LoggingHelper;

/// Route segment and log name of this strategy
pub const STRATEGY_NAME: &str = "google_oauth2";

#[derive(Debug, Serialize)]
struct TokenExchangeRequest<'a> {
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    grant_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: String,
    scope: Option<String>,
}

/// Error body returned by Google's OAuth endpoints
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    error_description: Option<String>,
}

/// OpenID Connect userinfo document
#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: Option<String>,
    email: Option<String>,
    name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    picture: Option<String>,
}

impl From<GoogleUserInfo> for ProviderInfo {
    fn from(info: GoogleUserInfo) -> Self {
        Self {
            uid: info.sub,
            email: info.email,
            name: info.name,
            first_name: info.given_name,
            last_name: info.family_name,
            image: info.picture,
        }
    }
}

/// Google OAuth2 strategy built once at startup
#[derive(Debug, Clone)]
pub struct GoogleStrategy {
    client_id: Option<String>,
    client_secret: Option<String>,
    scopes: Vec<String>,
    authorization_endpoint: String,
    token_endpoint: String,
    userinfo_endpoint: String,
    callback_url: String,
    http_client: reqwest::Client,
}

impl GoogleStrategy {
    /// Resolve credentials and endpoints from settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn from_settings(settings: &CuratorSettings) -> anyhow::Result<Self> {
        let google = &settings.google;
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(google.request_timeout_seconds))
            .build()
            .context("Failed to build HTTP client for Google OAuth2")?;

        let strategy = Self {
            client_id: google.get_client_id(),
            client_secret: google.get_client_secret(),
            scopes: google.scopes.clone(),
            authorization_endpoint: google.authorization_endpoint.clone(),
            token_endpoint: google.token_endpoint.clone(),
            userinfo_endpoint: google.userinfo_endpoint.clone(),
            callback_url: settings.get_callback_url(),
            http_client,
        };

        LoggingHelper::log_strategy_init(
            STRATEGY_NAME,
            strategy.is_configured(),
            google.provider_ignores_state,
        );
        Ok(strategy)
    }

    fn credentials(&self) -> Result<(&str, &str), OAuthFailure> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            _ => Err(OAuthFailure::Configuration(
                "Google client id or secret not configured".to_string(),
            )),
        }
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, OAuthFailure> {
        let (client_id, client_secret) = self.credentials()?;
        let request = TokenExchangeRequest {
            code,
            client_id,
            client_secret,
            redirect_uri,
            grant_type: "authorization_code",
        };

        LoggingHelper::log_token_exchange_start(STRATEGY_NAME);
        let response = self
            .http_client
            .post(&self.token_endpoint)
            .form(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to exchange Google OAuth code: {e}");
                OAuthFailure::from_transport(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::classify_error_response(status, &error_text));
        }

        let tokens: TokenResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Google token response: {e}");
            OAuthFailure::InvalidResponse("token response is not valid JSON".to_string())
        })?;
        LoggingHelper::log_token_exchange_summary(
            STRATEGY_NAME,
            &tokens.token_type,
            tokens.scope.as_deref(),
        );
        Ok(tokens)
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, OAuthFailure> {
        let response = self
            .http_client
            .get(&self.userinfo_endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to get Google user info: {e}");
                OAuthFailure::from_transport(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::classify_error_response(status, &error_text));
        }

        response.json().await.map_err(|e| {
            error!("Failed to parse Google user info: {e}");
            OAuthFailure::InvalidResponse("userinfo response is not valid JSON".to_string())
        })
    }

    /// Client errors mean Google refused the code or token; anything else is unexpected
    fn classify_error_response(status: reqwest::StatusCode, body: &str) -> OAuthFailure {
        let detail = serde_json::from_str::<ErrorResponse>(body).map_or_else(
            |_| format!("status {status}"),
            |err| match err.error_description {
                Some(description) => format!("{}: {description}", err.error),
                None => err.error,
            },
        );
        warn!("Google OAuth error ({status}): {detail}");

        if status.is_client_error() {
            OAuthFailure::InvalidCredentials(detail)
        } else {
            OAuthFailure::InvalidResponse(detail)
        }
    }
}

#[async_trait]
impl OAuthStrategy for GoogleStrategy {
    fn name(&self) -> &str {
        STRATEGY_NAME
    }

    fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }

    fn authorize_url(&self, state: Option<&str>) -> Result<String, OAuthFailure> {
        let (client_id, _) = self.credentials()?;
        let scopes = self.scopes.join(" ");

        let mut url = url::Url::parse(&self.authorization_endpoint).map_err(|e| {
            OAuthFailure::Configuration(format!("invalid authorization endpoint: {e}"))
        })?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", client_id)
                .append_pair("redirect_uri", &self.callback_url)
                .append_pair("response_type", "code")
                .append_pair("scope", &scopes)
                .append_pair("access_type", "offline");
            if let Some(state) = state {
                query.append_pair("state", state);
            }
        }

        LoggingHelper::log_oauth_url_built(STRATEGY_NAME, &scopes, state.is_some());
        Ok(url.into())
    }

    async fn fetch_provider_info(
        &self,
        code: &str,
        redirect_uri: Option<&str>,
    ) -> Result<ProviderInfo, OAuthFailure> {
        let redirect_uri = redirect_uri.unwrap_or(&self.callback_url);
        debug!("Exchanging Google OAuth code with redirect_uri {redirect_uri}");

        let tokens = self.exchange_code(code, redirect_uri).await?;
        let user_info = self.fetch_user_info(&tokens.access_token).await?;
        Ok(user_info.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn test_settings(base_url: &str) -> CuratorSettings {
        let mut settings = CuratorSettings::default();
        settings.application.redirect_base_url = "http://localhost:8080".to_string();
        settings.google.client_id = Some("test-client-id".to_string());
        settings.google.client_secret = Some("test-client-secret".to_string());
        // Point env indirection at names nothing else sets
        settings.google.client_id_env = "CURATOR_GOOGLE_TEST_UNUSED_ID".to_string();
        settings.google.client_secret_env = "CURATOR_GOOGLE_TEST_UNUSED_SECRET".to_string();
        settings.google.token_endpoint = format!("{base_url}/token");
        settings.google.userinfo_endpoint = format!("{base_url}/userinfo");
        settings
    }

    #[test]
    fn test_authorize_url_without_state() {
        let strategy = GoogleStrategy::from_settings(&test_settings("http://unused")).unwrap();
        let url = url::Url::parse(&strategy.authorize_url(None).unwrap()).unwrap();

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["client_id"], "test-client-id");
        assert_eq!(
            pairs["redirect_uri"],
            "http://localhost:8080/auth/google_oauth2/callback"
        );
        assert_eq!(pairs["response_type"], "code");
        assert_eq!(pairs["scope"], "openid email profile");
        assert_eq!(pairs["access_type"], "offline");
        assert!(!pairs.contains_key("state"));
    }

    #[test]
    fn test_authorize_url_with_state() {
        let strategy = GoogleStrategy::from_settings(&test_settings("http://unused")).unwrap();
        let url = url::Url::parse(&strategy.authorize_url(Some("xyz")).unwrap()).unwrap();
        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["state"], "xyz");
    }

    #[test]
    fn test_unconfigured_strategy() {
        let mut settings = test_settings("http://unused");
        settings.google.client_secret = None;
        let strategy = GoogleStrategy::from_settings(&settings).unwrap();

        assert!(!strategy.is_configured());
        let err = strategy.authorize_url(None).unwrap_err();
        assert_eq!(err.error_key(), "configuration_error");
    }

    #[tokio::test]
    async fn test_fetch_provider_info_success() {
        let mut server = Server::new_async().await;
        let token_mock = server
            .mock("POST", "/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("code".into(), "4/auth-code".into()),
                Matcher::UrlEncoded("client_id".into(), "test-client-id".into()),
                Matcher::UrlEncoded("client_secret".into(), "test-client-secret".into()),
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded(
                    "redirect_uri".into(),
                    "http://localhost:8080/auth/google_oauth2/callback".into(),
                ),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"access_token":"ya29.token","token_type":"Bearer","expires_in":3599,"scope":"openid email"}"#,
            )
            .create_async()
            .await;
        let userinfo_mock = server
            .mock("GET", "/userinfo")
            .match_header("authorization", "Bearer ya29.token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"sub":"1234567890","email":"a@example.com","email_verified":true,"name":"Ada Lovelace","given_name":"Ada","family_name":"Lovelace","picture":"https://example.com/a.png"}"#,
            )
            .create_async()
            .await;

        let strategy = GoogleStrategy::from_settings(&test_settings(&server.url())).unwrap();
        let info = strategy
            .fetch_provider_info("4/auth-code", None)
            .await
            .unwrap();

        token_mock.assert_async().await;
        userinfo_mock.assert_async().await;
        assert_eq!(info.uid.as_deref(), Some("1234567890"));
        assert_eq!(info.email.as_deref(), Some("a@example.com"));
        assert_eq!(info.first_name.as_deref(), Some("Ada"));
        assert_eq!(info.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(info.image.as_deref(), Some("https://example.com/a.png"));
    }

    #[tokio::test]
    async fn test_client_supplied_redirect_uri_is_forwarded() {
        let mut server = Server::new_async().await;
        let token_mock = server
            .mock("POST", "/token")
            .match_body(Matcher::UrlEncoded(
                "redirect_uri".into(),
                "urn:ietf:wg:oauth:2.0:oob".into(),
            ))
            .with_status(200)
            .with_body(r#"{"access_token":"ya29.mobile","token_type":"Bearer"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/userinfo")
            .with_status(200)
            .with_body(r#"{"sub":"42"}"#)
            .create_async()
            .await;

        let strategy = GoogleStrategy::from_settings(&test_settings(&server.url())).unwrap();
        let info = strategy
            .fetch_provider_info("mobile-code", Some("urn:ietf:wg:oauth:2.0:oob"))
            .await
            .unwrap();

        token_mock.assert_async().await;
        assert_eq!(info.uid.as_deref(), Some("42"));
        assert_eq!(info.email, None);
    }

    #[tokio::test]
    async fn test_rejected_code_is_invalid_credentials() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"invalid_grant","error_description":"Bad Request"}"#)
            .create_async()
            .await;

        let strategy = GoogleStrategy::from_settings(&test_settings(&server.url())).unwrap();
        let err = strategy
            .fetch_provider_info("used-code", None)
            .await
            .unwrap_err();

        assert_eq!(err.error_key(), "invalid_credentials");
        assert!(err.to_string().contains("invalid_grant"));
    }

    #[tokio::test]
    async fn test_provider_server_error_is_invalid_response() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(503)
            .with_body("<html>unavailable</html>")
            .create_async()
            .await;

        let strategy = GoogleStrategy::from_settings(&test_settings(&server.url())).unwrap();
        let err = strategy.fetch_provider_info("code", None).await.unwrap_err();
        assert_eq!(err.error_key(), "invalid_response");
    }

    #[tokio::test]
    async fn test_malformed_token_response() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let strategy = GoogleStrategy::from_settings(&test_settings(&server.url())).unwrap();
        let err = strategy.fetch_provider_info("code", None).await.unwrap_err();
        assert_eq!(err.error_key(), "invalid_response");
    }

    #[tokio::test]
    async fn test_expired_access_token_on_userinfo() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_body(r#"{"access_token":"ya29.expired","token_type":"Bearer"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/userinfo")
            .with_status(401)
            .with_body(r#"{"error":"invalid_token"}"#)
            .create_async()
            .await;

        let strategy = GoogleStrategy::from_settings(&test_settings(&server.url())).unwrap();
        let err = strategy.fetch_provider_info("code", None).await.unwrap_err();
        assert_eq!(err.error_key(), "invalid_credentials");
    }

    #[tokio::test]
    async fn test_unreachable_provider() {
        // Port 1 is reserved and nothing listens there
        let strategy =
            GoogleStrategy::from_settings(&test_settings("http://127.0.0.1:1")).unwrap();
        let err = strategy.fetch_provider_info("code", None).await.unwrap_err();
        assert_eq!(err.error_key(), "failed_to_connect");
    }
}
