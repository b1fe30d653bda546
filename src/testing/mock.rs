//! Mock objects and fake implementations for testing
//!
//! `MockStrategy` stands in for the Google strategy so callback handling can
//! be exercised without any HTTP traffic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::constants::{TEST_AUTHORIZE_URL, TEST_EMAIL};
use crate::models::ProviderInfo;
use crate::oauth::{OAuthFailure, OAuthStrategy};

/// Scripted strategy returning a fixed outcome for every code exchange
pub struct MockStrategy {
    outcome: Result<ProviderInfo, OAuthFailure>,
    configured: bool,
    calls: Arc<AtomicUsize>,
    last_redirect_uri: Arc<Mutex<Option<String>>>,
}

impl Default for MockStrategy {
    fn default() -> Self {
        Self::succeeding(ProviderInfo::with_email(TEST_EMAIL))
    }
}

impl MockStrategy {
    /// Strategy whose exchange always yields `info`
    #[must_use]
    pub fn succeeding(info: ProviderInfo) -> Self {
        Self::with_outcome(Ok(info))
    }

    /// Strategy whose exchange always fails with `failure`
    #[must_use]
    pub fn failing(failure: OAuthFailure) -> Self {
        Self::with_outcome(Err(failure))
    }

    /// Strategy without client credentials
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::default()
        }
    }

    fn with_outcome(outcome: Result<ProviderInfo, OAuthFailure>) -> Self {
        Self {
            outcome,
            configured: true,
            calls: Arc::new(AtomicUsize::new(0)),
            last_redirect_uri: Arc::new(Mutex::new(None)),
        }
    }

    /// Shared counter of code exchanges performed
    #[must_use]
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Shared slot holding the redirect URI of the last exchange
    #[must_use]
    pub fn redirect_uri_recorder(&self) -> Arc<Mutex<Option<String>>> {
        Arc::clone(&self.last_redirect_uri)
    }
}

#[async_trait]
impl OAuthStrategy for MockStrategy {
    fn name(&self) -> &str {
        "mock_oauth2"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn authorize_url(&self, state: Option<&str>) -> Result<String, OAuthFailure> {
        if !self.configured {
            return Err(OAuthFailure::Configuration(
                "mock strategy not configured".to_string(),
            ));
        }
        Ok(match state {
            Some(state) => format!("{TEST_AUTHORIZE_URL}?state={state}"),
            None => TEST_AUTHORIZE_URL.to_string(),
        })
    }

    async fn fetch_provider_info(
        &self,
        _code: &str,
        redirect_uri: Option<&str>,
    ) -> Result<ProviderInfo, OAuthFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut slot) = self.last_redirect_uri.lock() {
            *slot = redirect_uri.map(ToString::to_string);
        }
        self.outcome.clone()
    }
}
