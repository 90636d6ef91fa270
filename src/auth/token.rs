use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of an issued token. There is no revocation or refresh flow:
/// once issued, a token stays valid for the whole window regardless of logout.
const TOKEN_LIFETIME_HOURS: i64 = 48;

/// Signing and verification key material, built once at startup from the
/// configured secret and shared through application data. Call sites never
/// touch the environment.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Reasons a bearer token is rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// No token was supplied with the request.
    Missing,
    /// The token is malformed, its signature does not match, or it has expired.
    Invalid,
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> AppError {
        match error {
            AuthError::Missing => AppError::Unauthorized("Authentication token required".into()),
            AuthError::Invalid => AppError::Unauthorized("Invalid or expired token".into()),
        }
    }
}

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the authenticated username.
    pub sub: String,
    /// Unique identifier of this token issuance.
    pub jti: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Generates a JWT for a given username.
///
/// The token expires 2 days after issuance and carries a fresh `jti` so that
/// two tokens issued for the same user are distinguishable.
///
/// # Arguments
/// * `keys` - Key material built from the configured signing secret.
/// * `username` - The username the token attests to.
///
/// # Returns
/// A `Result` containing the JWT string if successful.
/// Returns `AppError::InternalServerError` if token encoding fails.
pub fn issue_token(keys: &TokenKeys, username: &str) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expiration = now
        .checked_add_signed(chrono::Duration::hours(TOKEN_LIFETIME_HOURS))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: username.to_string(),
        jti: Uuid::new_v4().to_string(),
        iat: now.timestamp() as usize,
        exp: expiration,
    };

    encode(&Header::default(), &claims, &keys.encoding)
        .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a JWT string and decodes its claims.
///
/// Default validation checks are applied (signature, expiration).
///
/// # Arguments
/// * `keys` - Key material built from the configured signing secret.
/// * `token` - The JWT string to verify.
///
/// # Returns
/// A `Result` containing the decoded `Claims` if the token is valid, or
/// `AuthError::Invalid` if it is malformed, mis-signed, or expired.
pub fn verify_token(keys: &TokenKeys, token: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(token, &keys.decoding, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| AuthError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_issuance_and_verification() {
        let keys = TokenKeys::from_secret("test_secret_for_issue_verify");
        let token = issue_token(&keys, "alice1").unwrap();
        let claims = verify_token(&keys, &token).unwrap();
        assert_eq!(claims.sub, "alice1");
        assert!(!claims.jti.is_empty());
        // The expiry window is 2 days from issuance.
        assert_eq!(claims.exp - claims.iat, 48 * 60 * 60);
    }

    #[test]
    fn test_tokens_carry_unique_identifiers() {
        let keys = TokenKeys::from_secret("test_secret_for_jti");
        let first = verify_token(&keys, &issue_token(&keys, "alice1").unwrap()).unwrap();
        let second = verify_token(&keys, &issue_token(&keys, "alice1").unwrap()).unwrap();
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_token_expiration() {
        let keys = TokenKeys::from_secret("test_secret_for_expiration");

        let issued = chrono::Utc::now()
            .checked_sub_signed(chrono::Duration::hours(50))
            .expect("valid timestamp")
            .timestamp() as usize;

        // Hand-build a token whose 2-day window has already elapsed.
        let claims_expired = Claims {
            sub: "alice1".to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: issued,
            exp: issued + 48 * 60 * 60,
        };
        let expired_token = encode(
            &Header::default(),
            &claims_expired,
            &EncodingKey::from_secret("test_secret_for_expiration".as_bytes()),
        )
        .unwrap();

        assert_eq!(verify_token(&keys, &expired_token), Err(AuthError::Invalid));
    }

    #[test]
    fn test_invalid_token_signature() {
        let keys = TokenKeys::from_secret("a_completely_different_secret");

        // Signed with some other secret; our keys must reject it.
        let other_keys = TokenKeys::from_secret("the_original_secret");
        let foreign_token = issue_token(&other_keys, "alice1").unwrap();

        assert_eq!(verify_token(&keys, &foreign_token), Err(AuthError::Invalid));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let keys = TokenKeys::from_secret("test_secret_for_garbage");
        assert_eq!(
            verify_token(&keys, "not-even-a-jwt"),
            Err(AuthError::Invalid)
        );
    }
}
