//! Error types for GitHub App key loading and JWT signing.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while loading the App's private key or signing a JWT.
///
/// All of these are configuration problems or unexpected cryptographic failures.
/// None of them is worth retrying within the same invocation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The private key could not be read, or the bytes do not contain a decodable
    /// PEM block.
    ///
    /// `origin` names where the key came from (a file path, or `PEM input` when the
    /// bytes were handed over directly).
    #[error("Failed to load private key from {origin}: {source}")]
    KeyLoad {
        origin: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The PEM block was decoded but does not hold a valid RSA private key.
    ///
    /// This happens when the block carries another kind of object (a certificate or a
    /// public key, for example) or when the DER payload is corrupt.
    #[error("Failed to parse private key: {0}")]
    KeyParse(String),

    /// The RS256 signing step itself failed.
    ///
    /// With a key that passed parsing this is not expected to happen.
    #[error("Failed to sign JWT: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}
