//! Signed bearer tokens: HS256 with a fixed two-hour expiry carrying the
//! subject id and email. Verification failure of any kind degrades to "no
//! identity" rather than an error; the absence is the signal downstream.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::principal::Identity;

/// Fixed token lifetime: two hours.
pub const TOKEN_TTL_SECS: i64 = 2 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    email: String,
    iat: i64,
    exp: i64,
}

/// Sign a token for the given subject. Expiry is always `now + 2h`.
pub fn sign_token(secret: &str, subject_id: Uuid, email: &str) -> anyhow::Result<String> {
    let now = Utc::now().timestamp();
    let claims = Claims { sub: subject_id, email: email.to_string(), iat: now, exp: now + TOKEN_TTL_SECS };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))?;
    Ok(token)
}

/// Verify signature and expiry; `None` on any failure (malformed, expired,
/// wrong signature). Pure function of token + clock + secret.
pub fn verify_token(secret: &str, token: &str) -> Option<Identity> {
    let validation = Validation::default();
    match decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation) {
        Ok(data) => Some(Identity { subject_id: data.claims.sub, email: data.claims.email }),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn valid_token_yields_matching_identity() {
        let sid = Uuid::new_v4();
        let token = sign_token(SECRET, sid, "ana@x.com").expect("sign");
        let ident = verify_token(SECRET, &token).expect("identity");
        assert_eq!(ident.subject_id, sid);
        assert_eq!(ident.email, "ana@x.com");
    }

    #[test]
    fn wrong_secret_yields_anonymous() {
        let token = sign_token(SECRET, Uuid::new_v4(), "a@x.com").expect("sign");
        assert!(verify_token("other-secret", &token).is_none());
    }

    #[test]
    fn garbage_token_yields_anonymous() {
        assert!(verify_token(SECRET, "not.a.jwt").is_none());
        assert!(verify_token(SECRET, "").is_none());
    }

    #[test]
    fn expired_token_yields_anonymous() {
        // Hand-roll claims already past expiry.
        let now = Utc::now().timestamp();
        let claims = Claims { sub: Uuid::new_v4(), email: "a@x.com".into(), iat: now - 7300, exp: now - 100 };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).expect("encode");
        assert!(verify_token(SECRET, &token).is_none());
    }

    #[test]
    fn tampered_token_yields_anonymous() {
        let token = sign_token(SECRET, Uuid::new_v4(), "a@x.com").expect("sign");
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });
        assert!(verify_token(SECRET, &tampered).is_none());
    }
}
