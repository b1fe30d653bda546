//! Test fixtures providing pre-built test objects

use std::sync::Arc;

use actix_web::web;

use super::constants::{TEST_EMAIL, TEST_PROVIDER_UID, TEST_USER_NAME};
use super::mock::MockStrategy;
use crate::handlers::{CallbackConfig, CallbackHandler};
use crate::models::ProviderInfo;
use crate::settings::CuratorSettings;

/// Central fixture provider for all test data
pub struct TestFixtures;

impl TestFixtures {
    /// Settings with direct credentials and env indirection pointed at unused names
    #[must_use]
    pub fn settings() -> CuratorSettings {
        let mut settings = CuratorSettings::default();
        settings.google.client_id = Some("test-client-id".to_string());
        settings.google.client_secret = Some("test-client-secret".to_string());
        settings.google.client_id_env = "CURATOR_FIXTURE_UNUSED_ID".to_string();
        settings.google.client_secret_env = "CURATOR_FIXTURE_UNUSED_SECRET".to_string();
        settings.cookies.secure = false;
        settings
    }

    /// A complete Google-style profile
    #[must_use]
    pub fn provider_info() -> ProviderInfo {
        ProviderInfo {
            uid: Some(TEST_PROVIDER_UID.to_string()),
            email: Some(TEST_EMAIL.to_string()),
            name: Some(TEST_USER_NAME.to_string()),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            image: None,
        }
    }

    /// Handler around `strategy`, ready to be registered as app data
    #[must_use]
    pub fn callback_handler(
        strategy: MockStrategy,
        provider_ignores_state: bool,
    ) -> web::Data<CallbackHandler> {
        web::Data::new(CallbackHandler::new(
            CallbackConfig {
                provider_ignores_state,
                cookie_secure: false,
            },
            Arc::new(strategy),
        ))
    }
}
