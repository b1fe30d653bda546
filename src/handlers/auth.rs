// Request phase: send the browser to the provider's consent screen
use actix_web::{web, HttpResponse, Result};
use log::debug;

use super::callback::CallbackHandler;
use crate::utils::cookie_utils::create_state_cookie;
use crate::utils::crypto::generate_state_token;
use crate::utils::logging::LoggingHelper;
use crate::utils::responses::ResponseBuilder;

/// OAuth request phase handler
///
/// Redirects to the provider, storing a fresh `state` in a cookie unless the
/// strategy is configured to ignore it.
///
/// # Errors
///
/// Never fails; misconfiguration is rendered as a 401 failure response
pub async fn oauth_request(handler: web::Data<CallbackHandler>) -> Result<HttpResponse> {
    let config = handler.config();
    let (state, cookies) = if config.provider_ignores_state {
        (None, Vec::new())
    } else {
        let state = generate_state_token();
        let cookie = create_state_cookie(&state, config.cookie_secure);
        (Some(state), vec![cookie])
    };

    match handler.strategy().authorize_url(state.as_deref()) {
        Ok(url) => {
            debug!("Redirecting to {} consent screen", handler.strategy().name());
            Ok(ResponseBuilder::redirect_with_cookies(&url, cookies))
        }
        Err(e) => {
            LoggingHelper::log_authentication_failure(e.error_key(), &e.to_string());
            Ok(ResponseBuilder::auth_failure(&handler.handle_failure(e.error_key())))
        }
    }
}
