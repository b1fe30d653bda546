#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use curator_auth::{
    configure_services,
    oauth::{GoogleStrategy, OAuthStrategy},
    settings::CuratorSettings,
    CallbackConfig, CallbackHandler,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration from Settings.toml and environment variables
    // This also loads .env file and initializes the logger
    let settings = CuratorSettings::load()
        .map_err(|e| std::io::Error::other(format!("Failed to load settings: {e}")))?;

    let strategy = GoogleStrategy::from_settings(&settings).map_err(|e| {
        std::io::Error::other(format!("Failed to initialize Google OAuth2 strategy: {e}"))
    })?;
    if !strategy.is_configured() {
        return Err(std::io::Error::other(format!(
            "Google OAuth2 credentials missing: set {} and {}",
            settings.google.client_id_env, settings.google.client_secret_env
        )));
    }

    let handler = web::Data::new(CallbackHandler::new(
        CallbackConfig::from_settings(&settings),
        Arc::new(strategy),
    ));
    start_server(handler, settings).await
}

/// Start the HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Server binding fails
/// - Server fails to start
async fn start_server(
    handler: web::Data<CallbackHandler>,
    settings: CuratorSettings,
) -> std::io::Result<()> {
    let bind_address = settings.get_bind_address();
    print_startup_info(&bind_address, &settings);

    // Configure CORS for the web and mobile clients
    let cors_origins = settings.get_cors_origins();

    HttpServer::new(move || {
        let cors_origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                cors_origins
                    .iter()
                    .any(|allowed| allowed == origin.to_str().unwrap_or(""))
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["Content-Type", "Accept"])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(handler.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .configure(configure_services)
    })
    .bind(&bind_address)?
    .run()
    .await
}

fn print_startup_info(bind_address: &str, settings: &CuratorSettings) {
    println!(
        "Starting Curator auth service v{} on http://{bind_address}",
        curator_auth::VERSION
    );
    println!();
    println!("OAuth2 endpoints:");
    println!("  GET  /auth/google_oauth2          - Redirect to Google consent screen");
    println!("  GET|POST /auth/google_oauth2/callback - OAuth callback");
    println!("                                    (POST for mobile server auth code)");
    println!("  GET  /auth/failure                - OAuth failure report");
    println!();
    println!("OAuth callback URL for Google:");
    println!("  {}", settings.get_callback_url());
    println!(
        "  State verification: {}",
        if settings.google.provider_ignores_state {
            "disabled"
        } else {
            "enabled"
        }
    );
    println!();
    println!("System endpoints:");
    println!("  GET  /ping                        - Health check");
}
