//! Bearer token issuance and verification.
//!
//! Tokens are self-contained HS256 JWTs signed with the server-held secret;
//! verification needs no database lookup.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i32,
    pub username: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Signing secret is not configured")]
    MissingSecret,

    #[error("Token generation failed: {0}")]
    Generation(String),

    #[error("Token rejected: {0}")]
    Invalid(String),
}

/// Issues and verifies tokens with a secret held for the process lifetime.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_minutes: i64,
}

impl TokenSigner {
    pub fn from_config(security: &SecurityConfig) -> Result<Self, TokenError> {
        if security.jwt_secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(security.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(security.jwt_secret.as_bytes()),
            expiry_minutes: security.token_expiry_minutes,
        })
    }

    /// Signs a token for the given identity, expiring a fixed duration from
    /// now.
    pub fn issue(&self, user_id: i32, username: &str, role: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.expiry_minutes)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Decodes a token, checking the signature and the expiration timestamp.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(expiry_minutes: i64) -> TokenSigner {
        TokenSigner::from_config(&SecurityConfig {
            jwt_secret: "test-secret".to_string(),
            token_expiry_minutes: expiry_minutes,
        })
        .unwrap()
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let signer = signer(60);
        let token = signer.issue(1, "admin", "admin").unwrap();

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.sub, 1);
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let signer = signer(60);
        let token = signer.issue(1, "admin", "admin").unwrap();

        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(signer.verify(&tampered).is_err());
        assert!(signer.verify("not-a-token").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Expiry far enough in the past to clear the default leeway
        let signer = signer(-120);
        let token = signer.issue(1, "admin", "admin").unwrap();

        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer_a = signer(60);
        let signer_b = TokenSigner::from_config(&SecurityConfig {
            jwt_secret: "other-secret".to_string(),
            token_expiry_minutes: 60,
        })
        .unwrap();

        let token = signer_a.issue(1, "admin", "admin").unwrap();
        assert!(signer_b.verify(&token).is_err());
    }

    #[test]
    fn test_empty_secret_refused() {
        let result = TokenSigner::from_config(&SecurityConfig {
            jwt_secret: String::new(),
            token_expiry_minutes: 60,
        });

        assert!(result.is_err());
    }
}
