//! Crate for authenticating as a GitHub App.
//!
//! This crate loads the App's RSA private key from PEM and signs the short-lived
//! JSON Web Token (JWT) that GitHub expects when an App talks to the REST API as
//! itself. The JWT is the only credential needed to look up installations and to
//! exchange an installation id for an installation access token.
//!
//! # Example
//!
//! ```rust,no_run
//! use app_jwt::{sign, AppPrivateKey};
//!
//! # fn example() -> Result<(), app_jwt::Error> {
//! let key = AppPrivateKey::load("app-key.pem")?;
//! let jwt = sign(12345, &key)?;
//! # let _ = jwt;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub use errors::Error;

pub mod jwt;
pub use jwt::{sign, sign_at, SignedJwt, CLOCK_SKEW_ALLOWANCE, JWT_VALIDITY};

pub mod private_key;
pub use private_key::AppPrivateKey;
