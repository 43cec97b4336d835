use super::*;
use chrono::TimeZone;
use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};
use test_utils::{pkcs1_pem, public_key_pem, shared_test_key};

fn test_key() -> AppPrivateKey {
    AppPrivateKey::from_pem(pkcs1_pem(shared_test_key()).as_bytes()).expect("valid test key")
}

fn decode_claims(jwt: &SignedJwt) -> JWTClaims {
    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem(shared_test_key()).as_bytes())
        .expect("Failed to create decoding key");

    let mut validation = Validation::new(Algorithm::RS256);
    validation.validate_exp = false; // checked by hand below
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<JWTClaims>(jwt.expose_secret(), &decoding_key, &validation)
        .expect("Failed to decode JWT")
        .claims
}

#[test]
fn test_sign_at_sets_issuer_and_window() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let jwt = sign_at(12345, &test_key(), now).expect("Failed to sign JWT");
    let claims = decode_claims(&jwt);

    assert_eq!(claims.iss, "12345");
    assert_eq!(claims.iat, now.timestamp() - 60);
    assert_eq!(claims.exp, now.timestamp() + 600);
}

#[test]
fn test_lifetime_is_validity_plus_skew() {
    let jwt = sign(987, &test_key()).expect("Failed to sign JWT");
    let claims = decode_claims(&jwt);

    let expected = (JWT_VALIDITY + CLOCK_SKEW_ALLOWANCE).as_secs() as i64;
    assert_eq!(claims.exp - claims.iat, expected);
    assert_eq!(expected, 660);
}

#[test]
fn test_sign_uses_current_time() {
    let before = Utc::now().timestamp();
    let jwt = sign(42, &test_key()).expect("Failed to sign JWT");
    let after = Utc::now().timestamp();

    let claims = decode_claims(&jwt);

    // iat is in the past, exp is in the future
    assert!(claims.iat >= before - 60 && claims.iat <= after - 60);
    assert!(claims.exp >= before + 600 && claims.exp <= after + 600);
}

#[test]
fn test_header_uses_rs256() {
    let jwt = sign(42, &test_key()).expect("Failed to sign JWT");

    let header = decode_header(jwt.expose_secret()).expect("Failed to decode header");

    assert_eq!(header.alg, Algorithm::RS256);
}

#[test]
fn test_pkcs8_key_signs_verifiable_jwt() {
    let key = AppPrivateKey::from_pem(test_utils::pkcs8_pem(shared_test_key()).as_bytes())
        .expect("valid PKCS#8 key");

    let jwt = sign(7, &key).expect("Failed to sign JWT");

    assert_eq!(decode_claims(&jwt).iss, "7");
}

#[test]
fn test_signed_jwt_debug_is_redacted() {
    let jwt = sign(42, &test_key()).expect("Failed to sign JWT");

    let debug_output = format!("{jwt:?}");

    assert!(!debug_output.contains(jwt.expose_secret()));
}
