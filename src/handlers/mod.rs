// HTTP request handlers for the Google sign-in flow
pub mod auth;
pub mod callback;
pub mod health;

use actix_web::web;

// Re-export the main handler functions
pub use auth::oauth_request;
pub use callback::{
    oauth_callback, oauth_failure, query_error_handler, CallbackConfig, CallbackError,
    CallbackHandler,
};
pub use health::health;

/// Register every route served by the application
///
/// Expects a `web::Data<CallbackHandler>` to be registered as app data.
/// Unparseable query strings are answered with a 401 `invalid_request`.
pub fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        // OmniAuth-compatible OAuth2 endpoints
        .route("/auth/google_oauth2", web::get().to(oauth_request))
        .route("/auth/google_oauth2/callback", web::get().to(oauth_callback))
        .route("/auth/google_oauth2/callback", web::post().to(oauth_callback))
        .route("/auth/failure", web::get().to(oauth_failure))
        // Health endpoint
        .route("/ping", web::get().to(health));
}
