//! # JWT Token Management
//!
//! JWT token generation and validation (HS256).

use crate::{Error, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT Claims structure containing user authentication information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Display name of the user
    pub name: String,
    /// Set for every token issued after a successful password check
    pub authorized: bool,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// The subject parsed back into a user id.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Encode a JWT token with user claims.
pub fn encode_jwt(user_id: i64, name: &str, secret: &str, expiration_hours: i64) -> Result<String> {
    let now = Utc::now();
    let exp = now + Duration::hours(expiration_hours);

    let claims = Claims {
        sub: user_id.to_string(),
        name: name.to_string(),
        authorized: true,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::TokenEncoding(e.to_string()))
}

/// Decode and validate a JWT token.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims> {
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => Error::TokenExpired,
        ErrorKind::InvalidSignature => Error::TokenInvalidSignature,
        _ => Error::TokenMalformed(e.to_string()),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-must-be-at-least-32-chars-long!";

    #[test]
    fn test_jwt_encoding_decoding() {
        let token = encode_jwt(7, "testuser", SECRET, 72).expect("JWT encoding should succeed");
        let claims = decode_jwt(&token, SECRET).expect("JWT decoding should succeed");

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.name, "testuser");
        assert!(claims.authorized);
        assert!(claims.exp > Utc::now().timestamp());
        assert_eq!(claims.exp - claims.iat, 72 * 3600);
    }

    #[test]
    fn test_jwt_wrong_secret_is_invalid_signature() {
        let token = encode_jwt(1, "a", SECRET, 1).unwrap();
        let result = decode_jwt(&token, "another-secret-that-is-also-32-chars-long");

        assert_eq!(result, Err(Error::TokenInvalidSignature));
    }

    #[test]
    fn test_jwt_expired() {
        // Well past the default 60s leeway
        let token = encode_jwt(1, "a", SECRET, -2).unwrap();

        assert_eq!(decode_jwt(&token, SECRET), Err(Error::TokenExpired));
    }

    #[test]
    fn test_jwt_tampered_payload() {
        let token = encode_jwt(1, "a", SECRET, 1).unwrap();
        let forged = encode_jwt(2, "a", SECRET, 1).unwrap();

        // Header and signature of the first token, payload of the second
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(decode_jwt(&tampered, SECRET), Err(Error::TokenInvalidSignature));
    }

    #[test]
    fn test_jwt_garbage() {
        assert!(matches!(
            decode_jwt("not.a.jwt", SECRET),
            Err(Error::TokenMalformed(_))
        ));
        assert!(matches!(decode_jwt("", SECRET), Err(Error::TokenMalformed(_))));
    }
}
