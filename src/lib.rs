#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the curator-auth application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod handlers;
pub mod models;
pub mod oauth;
pub mod settings;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use handlers::{
    configure_services, health, oauth_callback, oauth_failure, oauth_request, CallbackConfig,
    CallbackHandler,
};
pub use models::{AuthError, AuthResult, MissingFieldError, ProviderInfo};
pub use oauth::{GoogleStrategy, OAuthStrategy};
pub use settings::CuratorSettings;
