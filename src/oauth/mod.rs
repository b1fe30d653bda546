//! OAuth authentication module
//!
//! This module performs the OAuth2 protocol work the callback handler relies
//! on: building the consent URL, checking the `state` parameter, exchanging
//! the authorization code and fetching the user's profile.

pub mod google;
pub mod state;

pub use google::GoogleStrategy;
pub use state::{verify_state, StateCheck};

use crate::models::ProviderInfo;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Parameters delivered to the callback route, via query string or form post
#[derive(Deserialize, Debug, Default, Clone)]
pub struct OAuthCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
    /// Sent by clients that obtained the code themselves (server auth code flow)
    pub redirect_uri: Option<String>,
}

/// Everything that can go wrong between the consent screen and a usable profile
#[derive(Debug, Clone, Error)]
pub enum OAuthFailure {
    /// The provider redirected back with an `error` parameter
    #[error("provider returned error: {error}")]
    Provider {
        error: String,
        description: Option<String>,
    },
    #[error("OAuth state parameter missing or mismatched")]
    CsrfDetected,
    #[error("no authorization code received")]
    MissingCode,
    #[error("authorization code rejected: {0}")]
    InvalidCredentials(String),
    #[error("request to provider timed out: {0}")]
    Timeout(String),
    #[error("could not connect to provider: {0}")]
    FailedToConnect(String),
    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),
    #[error("OAuth strategy misconfigured: {0}")]
    Configuration(String),
}

impl OAuthFailure {
    /// Key echoed back to the client in the failure payload
    #[must_use]
    pub fn error_key(&self) -> &str {
        match self {
            Self::Provider { error, .. } => error,
            Self::CsrfDetected => "csrf_detected",
            Self::MissingCode => "missing_code",
            Self::InvalidCredentials(_) => "invalid_credentials",
            Self::Timeout(_) => "timeout",
            Self::FailedToConnect(_) => "failed_to_connect",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Configuration(_) => "configuration_error",
        }
    }

    /// Human-readable detail supplied by the provider alongside its error
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Provider { description, .. } => description.as_deref(),
            _ => None,
        }
    }

    /// Classify a transport error from the HTTP client
    #[must_use]
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::FailedToConnect(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::FailedToConnect(err.to_string())
        }
    }
}

/// An OAuth2 provider integration
#[async_trait]
pub trait OAuthStrategy: Send + Sync {
    /// Strategy name as it appears in routes, e.g. `google_oauth2`
    fn name(&self) -> &str;

    /// Whether client credentials are available
    fn is_configured(&self) -> bool;

    /// Build the provider consent URL, embedding `state` when present
    ///
    /// # Errors
    ///
    /// Returns an error if the strategy is not configured or the endpoint is not a valid URL
    fn authorize_url(&self, state: Option<&str>) -> Result<String, OAuthFailure>;

    /// Exchange an authorization code and return the user's profile
    ///
    /// # Errors
    ///
    /// Returns an error if the code is rejected, the provider is unreachable,
    /// or its responses cannot be parsed
    async fn fetch_provider_info(
        &self,
        code: &str,
        redirect_uri: Option<&str>,
    ) -> Result<ProviderInfo, OAuthFailure>;
}
