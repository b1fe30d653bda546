use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Profile data handed over by the OAuth strategy after a successful exchange
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderInfo {
    pub uid: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
}

impl ProviderInfo {
    /// Shorthand for a profile carrying only an email address
    #[must_use]
    pub fn with_email(email: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            ..Default::default()
        }
    }

    /// Return the email address, rejecting absent or blank values
    ///
    /// # Errors
    ///
    /// Returns `MissingFieldError` if the provider did not supply an email
    pub fn require_email(&self) -> Result<&str, MissingFieldError> {
        self.email
            .as_deref()
            .filter(|email| !email.trim().is_empty())
            .ok_or(MissingFieldError { field: "email" })
    }
}

/// A field the callback handler requires was not present in the provider data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("provider data is missing required field `{field}`")]
pub struct MissingFieldError {
    pub field: &'static str,
}

impl MissingFieldError {
    /// Error key reported to the client, e.g. `missing_email`
    #[must_use]
    pub fn error_key(&self) -> String {
        format!("missing_{}", self.field)
    }
}

/// Successful sign-in payload
///
/// Issued once per authentication and never persisted.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthResult {
    pub email: String,
    pub authentication_token: String,
}

/// Failed sign-in payload, echoing the error key produced by the OAuth layer
///
/// `description` carries the provider's `error_description` and is omitted
/// from the body when absent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AuthError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AuthError {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description
            .filter(|text| !text.is_empty())
            .map(ToString::to_string);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_email_present() {
        let info = ProviderInfo::with_email("a@example.com");
        assert_eq!(info.require_email(), Ok("a@example.com"));
    }

    #[test]
    fn test_require_email_missing_or_blank() {
        let missing = ProviderInfo::default();
        let blank = ProviderInfo::with_email("   ");

        assert_eq!(
            missing.require_email(),
            Err(MissingFieldError { field: "email" })
        );
        assert!(blank.require_email().is_err());
        assert_eq!(
            missing.require_email().unwrap_err().error_key(),
            "missing_email"
        );
    }

    #[test]
    fn test_auth_result_serialization() {
        let result = AuthResult {
            email: "a@example.com".to_string(),
            authentication_token: "0123456789abcdef0123456789abcdef".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": "a@example.com",
                "authentication_token": "0123456789abcdef0123456789abcdef"
            })
        );
    }

    #[test]
    fn test_auth_error_serialization() {
        let json = serde_json::to_value(AuthError::new("access_denied")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "access_denied" }));
    }

    #[test]
    fn test_auth_error_with_description() {
        let error = AuthError::new("access_denied").with_description(Some("User denied"));
        let json = serde_json::to_value(error).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "error": "access_denied", "description": "User denied" })
        );

        let blank = AuthError::new("access_denied").with_description(Some(""));
        assert_eq!(blank, AuthError::new("access_denied"));
    }
}
