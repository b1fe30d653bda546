//! Testing utilities for curator-auth
//!
//! Available to unit tests and, through the `testing` feature, to the
//! integration tests under `tests/`.
//!
//! - [`fixtures`] - Pre-built settings, handlers and test applications
//! - [`mock`] - A scripted `OAuthStrategy` that never touches the network
//!
//! ## Usage
//!
//! ```rust,ignore
//! use curator_auth::testing::{fixtures::TestFixtures, mock::MockStrategy};
//!
//! let strategy = MockStrategy::succeeding(TestFixtures::provider_info());
//! let handler = TestFixtures::callback_handler(strategy, true);
//! ```

pub mod fixtures;
pub mod mock;

pub use fixtures::TestFixtures;
pub use mock::MockStrategy;

/// Common test constants
pub mod constants {
    /// Default test email address
    pub const TEST_EMAIL: &str = "test@example.com";

    /// Default test user name
    pub const TEST_USER_NAME: &str = "Test User";

    /// Default test provider uid
    pub const TEST_PROVIDER_UID: &str = "123456789";

    /// Authorization code accepted by the mock strategy
    pub const TEST_AUTH_CODE: &str = "4/test-authorization-code";

    /// Consent URL returned by the mock strategy
    pub const TEST_AUTHORIZE_URL: &str = "https://accounts.example.test/o/oauth2/auth";
}
