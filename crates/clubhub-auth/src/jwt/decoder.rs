//! JWT access token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use clubhub_core::config::auth::AuthConfig;

use super::claims::AccessClaims;

/// Validates JWT access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew
        validation.set_issuer(&[&config.issuer]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token.
    ///
    /// Returns `None` for any invalid token: bad signature, expired, wrong
    /// issuer, wrong token type or malformed. The reason is logged but not surfaced; callers
    /// treat every failure as "not authenticated".
    pub fn decode_access_token(&self, token: &str) -> Option<AccessClaims> {
        match decode::<AccessClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) if data.claims.token_type == AccessClaims::TOKEN_TYPE => Some(data.claims),
            Ok(data) => {
                debug!(token_type = %data.claims.token_type, "Rejected non-access token");
                None
            }
            Err(e) => {
                debug!(reason = %e, "Rejected access token");
                None
            }
        }
    }
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use clubhub_core::config::auth::AuthConfig;

    use super::super::encoder::JwtEncoder;
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn encode_then_decode() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let user_id = Uuid::new_v4();
        let (token, _) = encoder.encode_access_token(user_id, "anna").unwrap();

        let claims = decoder.decode_access_token(&token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.username, "anna");
        assert_eq!(claims.iss, "clubhub");
    }

    #[test]
    fn rejects_wrong_secret() {
        let encoder = JwtEncoder::new(&config());
        let decoder = JwtDecoder::new(&AuthConfig {
            jwt_secret: "other-secret".to_string(),
            ..AuthConfig::default()
        });

        let (token, _) = encoder.encode_access_token(Uuid::new_v4(), "anna").unwrap();
        assert!(decoder.decode_access_token(&token).is_none());
    }

    #[test]
    fn rejects_tampered_token() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let (token, _) = encoder.encode_access_token(Uuid::new_v4(), "anna").unwrap();
        let mut tampered = token.clone();
        tampered.truncate(token.len() - 2);
        assert!(decoder.decode_access_token(&tampered).is_none());
        assert!(decoder.decode_access_token("not.a.jwt").is_none());
    }

    #[test]
    fn rejects_wrong_token_type() {
        let cfg = config();
        let decoder = JwtDecoder::new(&cfg);

        let now = chrono::Utc::now();
        let claims = AccessClaims {
            sub: Uuid::new_v4(),
            username: "anna".to_string(),
            iss: cfg.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::minutes(15)).timestamp(),
            token_type: "refresh".to_string(),
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(decoder.decode_access_token(&token).is_none());
    }

    #[test]
    fn rejects_expired_token() {
        let cfg = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            access_ttl_minutes: -10,
            ..AuthConfig::default()
        };
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);

        let (token, _) = encoder.encode_access_token(Uuid::new_v4(), "anna").unwrap();
        assert!(decoder.decode_access_token(&token).is_none());
    }
}
