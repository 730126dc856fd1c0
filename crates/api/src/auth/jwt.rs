//! JWT access-token validation.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload.
//! Claims are typed: a token that verifies cryptographically but lacks a
//! usable `userId` claim fails deserialization inside `decode`, which is
//! the same uniform failure as a bad signature or an expired token.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use sketchrelay_core::types::DbId;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's internal database id. The wire name `userId` matches the
    /// tokens the deployed account service issues.
    #[serde(rename = "userId")]
    pub user_id: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for JWT token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the issuing service.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self { secret }
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically. Every failure mode
/// (malformed token, expired, bad signature, missing `userId`) surfaces as
/// the same opaque `Err`; callers must not distinguish them in responses.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        }
    }

    /// Helper to sign arbitrary claims with the test secret.
    fn sign(claims: &impl serde::Serialize, config: &JwtConfig) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn valid_token_yields_user_id() {
        let config = test_config();
        let claims = Claims {
            user_id: 42,
            exp: chrono::Utc::now().timestamp() + 3600,
        };

        let token = sign(&claims, &config);
        let decoded = validate_token(&token, &config).expect("validation should succeed");

        assert_eq!(decoded.user_id, 42);
    }

    #[test]
    fn expired_token_fails() {
        let config = test_config();

        // Expired well past the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            user_id: 1,
            exp: now - 300,
        };

        let token = sign(&claims, &config);
        assert!(
            validate_token(&token, &config).is_err(),
            "expired token must fail validation"
        );
    }

    #[test]
    fn token_signed_with_different_secret_fails() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
        };

        let claims = Claims {
            user_id: 1,
            exp: chrono::Utc::now().timestamp() + 3600,
        };

        let token = sign(&claims, &config_a);
        assert!(
            validate_token(&token, &config_b).is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn token_missing_user_id_claim_fails() {
        let config = test_config();

        // Verifies cryptographically, but carries no user identity.
        let claims = serde_json::json!({
            "exp": chrono::Utc::now().timestamp() + 3600,
        });

        let token = sign(&claims, &config);
        assert!(
            validate_token(&token, &config).is_err(),
            "a token without a userId claim must be refused"
        );
    }

    #[test]
    fn garbage_token_fails() {
        let config = test_config();
        assert!(validate_token("not-a-jwt", &config).is_err());
    }
}
