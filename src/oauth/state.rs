//! OAuth `state` parameter verification
//!
//! The request phase stores a random state in a cookie and sends the same
//! value to the provider; the callback must echo it back unchanged.

use subtle::ConstantTimeEq;

use super::OAuthFailure;

/// Outcome of a successful state check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCheck {
    /// Verification is disabled by configuration
    Skipped,
    /// The received state matched the stored one
    Verified,
}

/// Compare the state received on callback with the one stored at request time
///
/// # Errors
///
/// Returns `OAuthFailure::CsrfDetected` if verification is enabled and either
/// value is missing or they differ
pub fn verify_state(
    ignores_state: bool,
    received: Option<&str>,
    stored: Option<&str>,
) -> Result<StateCheck, OAuthFailure> {
    if ignores_state {
        return Ok(StateCheck::Skipped);
    }

    match (received, stored) {
        (Some(received), Some(stored))
            if !stored.is_empty() && states_match(received, stored) =>
        {
            log::debug!("OAuth state verified");
            Ok(StateCheck::Verified)
        }
        (None, _) => {
            log::debug!("No state parameter received");
            Err(OAuthFailure::CsrfDetected)
        }
        (Some(_), None) => {
            log::debug!("No stored OAuth state found");
            Err(OAuthFailure::CsrfDetected)
        }
        (Some(_), Some(_)) => {
            log::debug!("OAuth state mismatch: received state does not match stored state");
            Err(OAuthFailure::CsrfDetected)
        }
    }
}

// Constant-time comparison; slices of different length never match
fn states_match(received: &str, stored: &str) -> bool {
    received.as_bytes().ct_eq(stored.as_bytes()).into()
}
