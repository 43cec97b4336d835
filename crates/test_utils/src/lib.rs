//! Test utilities shared by the workspace crates.
//!
//! Generating a 2048-bit RSA key takes long enough in debug builds that every test
//! binary shares a single key, created on first use.

use std::io::Write;
use std::sync::OnceLock;

use rand::thread_rng;
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding};
use rsa::pkcs8::EncodePrivateKey;
use rsa::RsaPrivateKey;
use tempfile::NamedTempFile;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// GitHub App id used across the test suites.
pub const TEST_APP_ID: i64 = 12345;

static SHARED_KEY: OnceLock<RsaPrivateKey> = OnceLock::new();

/// Returns the RSA key shared by all tests in the current binary.
pub fn shared_test_key() -> &'static RsaPrivateKey {
    SHARED_KEY.get_or_init(generate_rsa_key)
}

/// Generates a fresh 2048-bit RSA private key.
pub fn generate_rsa_key() -> RsaPrivateKey {
    let mut rng = thread_rng();
    RsaPrivateKey::new(&mut rng, 2048).expect("Failed to generate key")
}

/// Encodes `key` as a PKCS#1 PEM block (`BEGIN RSA PRIVATE KEY`), the format
/// GitHub uses for App keys.
pub fn pkcs1_pem(key: &RsaPrivateKey) -> String {
    key.to_pkcs1_pem(LineEnding::LF)
        .expect("Failed to encode PKCS#1 PEM")
        .to_string()
}

/// Encodes `key` as a PKCS#8 PEM block (`BEGIN PRIVATE KEY`).
pub fn pkcs8_pem(key: &RsaPrivateKey) -> String {
    key.to_pkcs8_pem(LineEnding::LF)
        .expect("Failed to encode PKCS#8 PEM")
        .to_string()
}

/// Encodes the public half of `key` as a PKCS#1 PEM block, for verifying JWTs.
pub fn public_key_pem(key: &RsaPrivateKey) -> String {
    key.to_public_key()
        .to_pkcs1_pem(LineEnding::LF)
        .expect("Failed to encode public key PEM")
}

/// Writes `contents` to a temporary file that is removed when dropped.
pub fn write_key_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write key file");
    file.flush().expect("Failed to flush key file");
    file
}
