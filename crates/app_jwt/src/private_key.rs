//! Loading of the GitHub App's RSA private key.
//!
//! GitHub hands out App keys as PKCS#1 PEM files (`BEGIN RSA PRIVATE KEY`), but keys
//! that were converted with `openssl pkcs8` (`BEGIN PRIVATE KEY`) are accepted too.
//! Loading happens in two steps so that the caller can tell an unreadable or
//! non-PEM file apart from a PEM block that is not an RSA private key.

use std::fs;
use std::path::Path;

use jsonwebtoken::EncodingKey;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;
use tracing::{debug, error, instrument};

use crate::Error;

#[cfg(test)]
#[path = "private_key_tests.rs"]
mod tests;

const PKCS1_TAG: &str = "RSA PRIVATE KEY";
const PKCS8_TAG: &str = "PRIVATE KEY";

/// An RSA private key ready to sign App JWTs.
///
/// The key material is never printed; the `Debug` implementation is redacted.
pub struct AppPrivateKey {
    encoding_key: EncodingKey,
}

impl AppPrivateKey {
    /// Reads and parses the PEM-encoded private key stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyLoad` if the file cannot be read or holds no PEM block, and
    /// `Error::KeyParse` if the PEM block is not an RSA private key.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            error!(error = %e, "Failed to read private key file");
            Error::KeyLoad {
                origin: path.display().to_string(),
                source: Box::new(e),
            }
        })?;

        Self::from_pem(&bytes)
    }

    /// Parses a PEM-encoded PKCS#1 or PKCS#8 RSA private key.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyLoad` if `bytes` do not contain a decodable PEM block, and
    /// `Error::KeyParse` if the block is not a valid RSA private key.
    pub fn from_pem(bytes: &[u8]) -> Result<Self, Error> {
        let block = pem::parse(bytes).map_err(|e| Error::KeyLoad {
            origin: "PEM input".to_string(),
            source: Box::new(e),
        })?;

        let pkcs1_der = match block.tag() {
            PKCS1_TAG => {
                RsaPrivateKey::from_pkcs1_der(block.contents()).map_err(|e| {
                    Error::KeyParse(format!("invalid PKCS#1 RSA private key: {e}"))
                })?;
                block.contents().to_vec()
            }
            PKCS8_TAG => {
                let key = RsaPrivateKey::from_pkcs8_der(block.contents()).map_err(|e| {
                    Error::KeyParse(format!("invalid PKCS#8 RSA private key: {e}"))
                })?;
                key.to_pkcs1_der()
                    .map_err(|e| {
                        Error::KeyParse(format!("cannot re-encode key as PKCS#1: {e}"))
                    })?
                    .as_bytes()
                    .to_vec()
            }
            other => {
                return Err(Error::KeyParse(format!(
                    "expected a '{PKCS1_TAG}' or '{PKCS8_TAG}' PEM block, found '{other}'"
                )))
            }
        };

        debug!(pem_tag = block.tag(), "Parsed RSA private key");

        Ok(Self {
            encoding_key: EncodingKey::from_rsa_der(&pkcs1_der),
        })
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }
}

impl std::fmt::Debug for AppPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppPrivateKey")
            .field("encoding_key", &"<REDACTED>")
            .finish()
    }
}
