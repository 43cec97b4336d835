//! GitHub App installation domain types.
//!
//! Only the fields this crate acts on are modelled. GitHub sends a lot more in both
//! responses; unknown fields are ignored.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[cfg(test)]
#[path = "installation_tests.rs"]
mod tests;

/// Body of `GET /orgs/{org}/installation`, `GET /repos/{owner}/{repo}/installation`
/// and `GET /users/{user}/installation`.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallationResponse {
    /// The unique ID of the installation
    pub id: i64,
}

/// Body of `POST /app/installations/{id}/access_tokens`.
#[derive(Deserialize)]
pub struct AccessTokenResponse {
    /// The installation access token
    pub token: String,
}

impl std::fmt::Debug for AccessTokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenResponse")
            .field("token", &"<REDACTED>")
            .finish()
    }
}

/// An installation access token, the output of the whole workflow.
#[derive(Debug, Clone)]
pub struct InstallationToken(SecretString);

impl InstallationToken {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Returns the bearer token.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether GitHub handed back an empty string.
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}
