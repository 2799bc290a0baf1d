use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

use crate::error::ApiError;

/// Claims carried by access tokens; `sub` is the user id
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Verifies HS256 bearer tokens issued by the auth service
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Return the user id of a valid token
    pub fn verify(&self, token: &str) -> Result<String, ApiError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!("Rejected token: {}", e);
            ApiError::Unauthorized("Invalid authentication credentials".to_string())
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(ApiError::Unauthorized("Invalid authentication credentials".to_string()));
        }

        Ok(data.claims.sub)
    }
}

/// The caller identified by the request's bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let verifier = req
        .app_data::<web::Data<TokenVerifier>>()
        .ok_or_else(|| ApiError::Internal("token verifier not configured".to_string()))?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let user_id = verifier.verify(token)?;

    Ok(AuthenticatedUser { user_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, sub: &str, exp_offset: i64) -> String {
        let exp = (chrono::Utc::now().timestamp() + exp_offset) as usize;
        encode(
            &Header::default(),
            &Claims { sub: sub.to_string(), exp },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token() {
        let verifier = TokenVerifier::new("secret");
        assert_eq!(verifier.verify(&token("secret", "user-1", 600)).unwrap(), "user-1");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let verifier = TokenVerifier::new("secret");
        assert!(verifier.verify(&token("other", "user-1", 600)).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let verifier = TokenVerifier::new("secret");
        assert!(verifier.verify(&token("secret", "user-1", -3600)).is_err());
    }

    #[test]
    fn test_empty_subject_rejected() {
        let verifier = TokenVerifier::new("secret");
        assert!(verifier.verify(&token("secret", " ", 600)).is_err());
    }
}
