//! Bearer credential verification.
//!
//! Tokens are compact HS256 JWTs (`header.claims.signature`, unpadded
//! base64url) carrying `{ "id": <user id>, "iat": <secs>, "exp": <secs> }`.
//! Issuance exists for the `teatrack token` developer command and tests;
//! production tokens come from an external login service that shares the
//! secret.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use teatrack_core::{AuthError, IdentityVerifier, UserId};
use tracing::warn;

use crate::error::HttpError;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Default token lifetime, matching the login service's one day.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::days(1);

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: String,
    #[serde(default)]
    iat: Option<i64>,
    exp: i64,
}

/// HS256 verifier (and issuer) keyed by a shared secret.
#[derive(Clone)]
pub struct Hs256Verifier {
    mac: HmacSha256,
}

impl std::fmt::Debug for Hs256Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hs256Verifier").finish_non_exhaustive()
    }
}

impl Hs256Verifier {
    /// Key a verifier with `secret`. Empty secrets are refused.
    pub fn new(secret: impl AsRef<[u8]>) -> anyhow::Result<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            anyhow::bail!("token secret must not be empty");
        }
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| anyhow::anyhow!("invalid token secret: {e}"))?;
        Ok(Self { mac })
    }

    fn mac(&self) -> HmacSha256 {
        self.mac.clone()
    }

    /// Issue a token for `user` valid for `ttl` from now.
    pub fn issue(&self, user: &UserId, ttl: Duration) -> anyhow::Result<String> {
        self.issue_at(user, Utc::now(), ttl)
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// Fails when `now + ttl` is outside the representable date range.
    pub fn issue_at(
        &self,
        user: &UserId,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> anyhow::Result<String> {
        let expires = now
            .checked_add_signed(ttl)
            .ok_or_else(|| anyhow::anyhow!("token lifetime of {ttl} is out of range"))?;
        let header = Header {
            alg: "HS256".to_string(),
            typ: Some("JWT".to_string()),
        };
        let claims = Claims {
            id: user.as_str().to_string(),
            iat: Some(now.timestamp()),
            exp: expires.timestamp(),
        };
        let signing_input = format!("{}.{}", encode_json(&header), encode_json(&claims));
        let mut mac = self.mac();
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{signing_input}.{signature}"))
    }

    /// Verify `token` against the clock value `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::Missing);
        }

        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::Malformed("expected three segments".to_string()));
        };

        let header: Header = decode_json(header_b64)?;
        if header.alg != "HS256" {
            return Err(AuthError::Malformed(format!(
                "unsupported algorithm {}",
                header.alg
            )));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|e| AuthError::Malformed(format!("signature: {e}")))?;
        let mut mac = self.mac();
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::InvalidSignature)?;

        let claims: Claims = decode_json(claims_b64)?;
        if claims.exp <= now.timestamp() {
            return Err(AuthError::Expired);
        }

        UserId::new(claims.id).ok_or_else(|| AuthError::Malformed("empty id claim".to_string()))
    }
}

impl IdentityVerifier for Hs256Verifier {
    fn verify(&self, credential: &str) -> Result<UserId, AuthError> {
        self.verify_at(credential, Utc::now())
    }
}

fn encode_json<T: Serialize>(value: &T) -> String {
    // Plain structs of strings and integers always serialize.
    let bytes = serde_json::to_vec(value).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(bytes)
}

fn decode_json<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| AuthError::Malformed(format!("base64: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| AuthError::Malformed(format!("json: {e}")))
}

/// Pull the credential out of an `Authorization: Bearer <token>` header.
pub fn bearer_credential(parts: &Parts) -> Result<&str, AuthError> {
    let value = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::Missing)?
        .to_str()
        .map_err(|_| AuthError::Malformed("non-ASCII authorization header".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .ok_or_else(|| AuthError::Malformed("expected Bearer scheme".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::Missing);
    }
    Ok(token)
}

/// The authenticated caller, resolved by the configured identity verifier.
///
/// Adding this extractor to a handler makes the route require a valid
/// bearer credential.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserId);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let outcome = bearer_credential(parts).and_then(|token| state.verifier.verify(token));
        match outcome {
            Ok(user) => Ok(Self(user)),
            Err(err) => {
                warn!(path = %parts.uri.path(), error = %err, "Rejected credential");
                Err(HttpError::from(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("64f0c2a1e4b0a1b2c3d4e5f6").unwrap()
    }

    #[test]
    fn issued_token_verifies() {
        let verifier = Hs256Verifier::new("secret").unwrap();
        let token = verifier.issue(&user(), DEFAULT_TOKEN_TTL).unwrap();
        assert_eq!(verifier.verify(&token).unwrap(), user());
    }

    #[test]
    fn wrong_secret_is_invalid_signature() {
        let token = Hs256Verifier::new("secret")
            .unwrap()
            .issue(&user(), DEFAULT_TOKEN_TTL)
            .unwrap();
        assert_eq!(
            Hs256Verifier::new("other").unwrap().verify(&token),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let verifier = Hs256Verifier::new("secret").unwrap();
        let issued = Utc::now() - Duration::days(2);
        let token = verifier
            .issue_at(&user(), issued, DEFAULT_TOKEN_TTL)
            .unwrap();
        assert_eq!(verifier.verify(&token), Err(AuthError::Expired));
    }

    #[test]
    fn out_of_range_lifetime_is_an_error() {
        let verifier = Hs256Verifier::new("secret").unwrap();
        assert!(verifier.issue(&user(), Duration::hours(i64::from(u32::MAX))).is_err());
    }

    #[test]
    fn tampered_claims_fail_signature() {
        let verifier = Hs256Verifier::new("secret").unwrap();
        let token = verifier.issue(&user(), DEFAULT_TOKEN_TTL).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = URL_SAFE_NO_PAD.encode(br#"{"id":"intruder","exp":9999999999}"#);
        parts[1] = &forged;
        assert_eq!(
            verifier.verify(&parts.join(".")),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(Hs256Verifier::new("").is_err());
    }

    #[test]
    fn garbage_is_malformed() {
        let verifier = Hs256Verifier::new("secret").unwrap();
        assert!(matches!(
            verifier.verify("not-a-token"),
            Err(AuthError::Malformed(_))
        ));
        assert_eq!(verifier.verify("  "), Err(AuthError::Missing));
    }

    #[test]
    fn accepts_tokens_signed_by_standard_libraries() {
        // header {"alg":"HS256","typ":"JWT"}, claims {"id":"abc","iat":1700000000,"exp":4102444800}
        let verifier = Hs256Verifier::new("secret").unwrap();
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(br#"{"id":"abc","iat":1700000000,"exp":4102444800}"#);
        let mut mac = verifier.mac();
        mac.update(format!("{header}.{claims}").as_bytes());
        let sig = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        let id = verifier.verify(&format!("{header}.{claims}.{sig}")).unwrap();
        assert_eq!(id.as_str(), "abc");
    }
}
