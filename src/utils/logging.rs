// Centralized logging utilities to reduce verbose logging patterns
use log::{debug, info, warn};

use crate::oauth::OAuthCallback;

pub struct LoggingHelper;

impl LoggingHelper {
    /// Log strategy initialization status
    pub fn log_strategy_init(strategy: &str, configured: bool, ignores_state: bool) {
        if configured {
            let verification = if ignores_state { "disabled" } else { "enabled" };
            info!("✅ {strategy} OAuth2 configured (state verification: {verification})");
        } else {
            warn!("❌ {strategy} OAuth2 not configured - missing client id or secret");
        }
    }

    /// Log OAuth URL building
    pub fn log_oauth_url_built(strategy: &str, scopes: &str, with_state: bool) {
        info!("🔍 Built {strategy} OAuth URL with scopes: {scopes} (state: {with_state})");
    }

    /// Log token exchange start
    pub fn log_token_exchange_start(strategy: &str) {
        info!("🔄 Exchanging authorization code for tokens with {strategy}");
    }

    /// Log token exchange summary without exposing token values
    pub fn log_token_exchange_summary(strategy: &str, token_type: &str, scope: Option<&str>) {
        debug!(
            "🔍 Token exchange summary for {strategy}: token_type={token_type}, scope={scope:?}"
        );
    }

    /// Log OAuth callback details
    pub fn log_callback_debug(req: &actix_web::HttpRequest, callback_data: &OAuthCallback) {
        debug!(
            "OAuth callback received via {}: code={}, state={}, error={:?}",
            req.method(),
            if callback_data.code.is_some() { "present" } else { "missing" },
            if callback_data.state.is_some() { "present" } else { "missing" },
            callback_data.error
        );
        debug!("Callback request connection info: {:?}", req.connection_info());
    }

    /// Log a successful sign-in
    pub fn log_authentication_success(email: &str, strategy: &str) {
        info!("Authentication succeeded for user: {email} (strategy: {strategy})");
    }

    /// Log a failed sign-in
    pub fn log_authentication_failure(error_key: &str, detail: &str) {
        warn!("Authentication failed with {error_key}: {detail}");
    }
}
