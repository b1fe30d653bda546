// OAuth callback handler: turns the strategy's outcome into a sign-in response
use std::sync::Arc;

use actix_web::error::{InternalError, QueryPayloadError};
use actix_web::{web, HttpRequest, HttpResponse, Result};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{AuthError, AuthResult, MissingFieldError, ProviderInfo};
use crate::oauth::{verify_state, OAuthCallback, OAuthFailure, OAuthStrategy};
use crate::settings::CuratorSettings;
use crate::utils::cookie_utils::{create_expired_state_cookie, extract_state_cookie};
use crate::utils::crypto::generate_authentication_token;
use crate::utils::logging::LoggingHelper;
use crate::utils::responses::ResponseBuilder;

/// Error key reported by `/auth/failure` when no message is given
pub const UNKNOWN_FAILURE: &str = "unknown_error";

/// Error key for query strings that cannot be parsed, e.g. repeated parameters
pub const INVALID_REQUEST: &str = "invalid_request";

/// Callback behaviour fixed at startup
#[derive(Debug, Clone, Copy)]
pub struct CallbackConfig {
    /// Skip the OAuth `state` check on callback
    pub provider_ignores_state: bool,
    /// Mark the state cookie `Secure`
    pub cookie_secure: bool,
}

impl CallbackConfig {
    #[must_use]
    pub fn from_settings(settings: &CuratorSettings) -> Self {
        Self {
            provider_ignores_state: settings.google.provider_ignores_state,
            cookie_secure: settings.cookies.secure,
        }
    }
}

/// Any reason a callback does not end in a sign-in
#[derive(Debug, Error)]
pub enum CallbackError {
    #[error(transparent)]
    OAuth(#[from] OAuthFailure),
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
}

impl CallbackError {
    #[must_use]
    pub fn error_key(&self) -> String {
        match self {
            Self::OAuth(failure) => failure.error_key().to_string(),
            Self::MissingField(missing) => missing.error_key(),
        }
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::OAuth(failure) => failure.description(),
            Self::MissingField(_) => None,
        }
    }
}

/// Success and failure entry points for the OAuth callback
pub struct CallbackHandler {
    config: CallbackConfig,
    strategy: Arc<dyn OAuthStrategy>,
}

impl CallbackHandler {
    #[must_use]
    pub fn new(config: CallbackConfig, strategy: Arc<dyn OAuthStrategy>) -> Self {
        Self { config, strategy }
    }

    #[must_use]
    pub fn config(&self) -> &CallbackConfig {
        &self.config
    }

    #[must_use]
    pub fn strategy(&self) -> &dyn OAuthStrategy {
        self.strategy.as_ref()
    }

    /// Issue a fresh authentication token for the provider's user
    ///
    /// No session is created; the token is handed to the client and forgotten.
    ///
    /// # Errors
    ///
    /// Returns `MissingFieldError` if the provider data has no usable email
    #[allow(clippy::unused_self)]
    pub fn handle_success(
        &self,
        provider_info: &ProviderInfo,
    ) -> Result<AuthResult, MissingFieldError> {
        let email = provider_info.require_email()?;
        Ok(AuthResult {
            email: email.to_string(),
            authentication_token: generate_authentication_token(),
        })
    }

    /// Wrap a failure produced by the OAuth layer for the 401 payload
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn handle_failure(&self, provider_error: &str) -> AuthError {
        AuthError::new(provider_error)
    }

    /// Run the callback phase: provider errors, state, code exchange, success handler
    ///
    /// # Errors
    ///
    /// Returns the first failure encountered; see `CallbackError::error_key`
    pub async fn process_callback(
        &self,
        callback: &OAuthCallback,
        stored_state: Option<&str>,
    ) -> Result<AuthResult, CallbackError> {
        if let Some(error) = &callback.error {
            return Err(OAuthFailure::Provider {
                error: error.clone(),
                description: callback.error_description.clone(),
            }
            .into());
        }

        let check = verify_state(
            self.config.provider_ignores_state,
            callback.state.as_deref(),
            stored_state,
        )?;
        debug!("OAuth state check: {check:?}");

        let code = callback
            .code
            .as_deref()
            .filter(|code| !code.is_empty())
            .ok_or(OAuthFailure::MissingCode)?;

        let provider_info = self
            .strategy
            .fetch_provider_info(code, callback.redirect_uri.as_deref())
            .await?;

        self.handle_success(&provider_info).map_err(Into::into)
    }

    /// Cookies to attach to every callback response
    fn callback_cookies(&self) -> Vec<actix_web::cookie::Cookie<'static>> {
        if self.config.provider_ignores_state {
            Vec::new()
        } else {
            vec![create_expired_state_cookie(self.config.cookie_secure)]
        }
    }
}

/// Query parameters of the failure route
#[derive(Deserialize, Debug)]
pub struct FailureQuery {
    pub message: Option<String>,
    pub strategy: Option<String>,
}

/// OAuth callback route, GET from browsers and form POST from the mobile client
///
/// # Errors
///
/// Never fails; every outcome is rendered as a 200 or 401 response
pub async fn oauth_callback(
    query: web::Query<OAuthCallback>,
    form: Option<web::Form<OAuthCallback>>,
    req: HttpRequest,
    handler: web::Data<CallbackHandler>,
) -> Result<HttpResponse> {
    let callback_data = extract_callback_data(query, form);
    LoggingHelper::log_callback_debug(&req, &callback_data);

    let stored_state = extract_state_cookie(&req);
    let cookies = handler.callback_cookies();

    match handler
        .process_callback(&callback_data, stored_state.as_deref())
        .await
    {
        Ok(result) => {
            LoggingHelper::log_authentication_success(&result.email, handler.strategy().name());
            Ok(ResponseBuilder::auth_success_with_cookies(&result, cookies))
        }
        Err(e) => {
            let error_key = e.error_key();
            LoggingHelper::log_authentication_failure(&error_key, &e.to_string());
            let auth_error = handler
                .handle_failure(&error_key)
                .with_description(e.description());
            Ok(ResponseBuilder::auth_failure_with_cookies(&auth_error, cookies))
        }
    }
}

/// Failure route for OAuth errors reported by redirect
///
/// # Errors
///
/// Never fails; always renders a 401 response
pub async fn oauth_failure(
    query: web::Query<FailureQuery>,
    handler: web::Data<CallbackHandler>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let error_key = query
        .message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| UNKNOWN_FAILURE.to_string());

    LoggingHelper::log_authentication_failure(
        &error_key,
        &format!(
            "reported via failure route (strategy: {})",
            query.strategy.as_deref().unwrap_or("unknown")
        ),
    );
    Ok(ResponseBuilder::auth_failure(&handler.handle_failure(&error_key)))
}

/// Render query strings the extractor rejects as a regular 401 failure
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    LoggingHelper::log_authentication_failure(INVALID_REQUEST, &err.to_string());
    let response = ResponseBuilder::auth_failure(&AuthError::new(INVALID_REQUEST));
    InternalError::from_response(err, response).into()
}

/// Extract callback data from either query parameters or form submission
fn extract_callback_data(
    query: web::Query<OAuthCallback>,
    form: Option<web::Form<OAuthCallback>>,
) -> OAuthCallback {
    form.map_or_else(
        || query.into_inner(),
        |form_data| {
            debug!("OAuth callback received via form post");
            form_data.into_inner()
        },
    )
}
