//! JWT generation for GitHub App authentication.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::{AppPrivateKey, Error};

#[cfg(test)]
#[path = "jwt_tests.rs"]
mod tests;

/// How far `iat` is moved into the past to absorb clock drift between this host and
/// GitHub.
pub const CLOCK_SKEW_ALLOWANCE: Duration = Duration::from_secs(60);

/// How long a JWT stays valid, counted from the un-skewed signing time. GitHub
/// rejects anything longer than ten minutes.
pub const JWT_VALIDITY: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct JWTClaims {
    iat: i64,
    exp: i64,
    iss: String,
}

/// A signed App JWT.
///
/// Meant to be used once, immediately, to talk to GitHub as the App. The value is
/// kept in a secret string so it does not end up in logs.
#[derive(Debug, Clone)]
pub struct SignedJwt(SecretString);

impl SignedJwt {
    /// Returns the compact JWT (`header.payload.signature`).
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Signs a JWT for `app_id`, valid from one minute ago until ten minutes from now.
///
/// # Errors
///
/// Returns `Error::Signing` if the RS256 signature cannot be produced.
pub fn sign(app_id: i64, key: &AppPrivateKey) -> Result<SignedJwt, Error> {
    sign_at(app_id, key, Utc::now())
}

/// Signs a JWT for `app_id` using `now` as the reference time.
///
/// The claims are `iss = app_id`, `iat = now - CLOCK_SKEW_ALLOWANCE` and
/// `exp = now + JWT_VALIDITY`.
///
/// # Errors
///
/// Returns `Error::Signing` if the RS256 signature cannot be produced.
#[instrument(skip(key))]
pub fn sign_at(app_id: i64, key: &AppPrivateKey, now: DateTime<Utc>) -> Result<SignedJwt, Error> {
    let issued_at = now.timestamp();
    let claims = JWTClaims {
        iat: issued_at - CLOCK_SKEW_ALLOWANCE.as_secs() as i64,
        exp: issued_at + JWT_VALIDITY.as_secs() as i64,
        iss: app_id.to_string(),
    };

    let token = encode(&Header::new(Algorithm::RS256), &claims, key.encoding_key()).map_err(|e| {
        error!(app_id = app_id, error = %e, "Failed to sign GitHub App JWT");
        Error::Signing(e)
    })?;

    debug!(app_id = app_id, exp = claims.exp, "Generated GitHub App JWT");

    Ok(SignedJwt(SecretString::from(token)))
}
