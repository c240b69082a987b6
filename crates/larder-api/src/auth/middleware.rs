use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use larder_core::AppError;
use std::sync::Arc;

use crate::auth::models::{JwtClaims, UserContext};
use crate::error::HttpAppError;

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    decoding_key: Arc<DecodingKey>,
    validation: Validation,
}

impl AuthState {
    pub fn new(jwt_secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            decoding_key: Arc::new(DecodingKey::from_secret(jwt_secret.as_bytes())),
            validation,
        }
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<JwtClaims, AppError> {
        decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}

/// Verify the bearer token and stash a [`UserContext`] in request extensions.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return HttpAppError(AppError::Unauthorized(
            "Authorization header must use the Bearer scheme".to_string(),
        ))
        .into_response();
    };

    let claims = match auth_state.verify(token) {
        Ok(claims) => claims,
        Err(e) => return HttpAppError(e).into_response(),
    };

    request.extensions_mut().insert(UserContext {
        account_id: claims.sub,
        email: claims.email,
    });

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    const SECRET: &str = "test-secret-key-min-32-characters-long";

    fn token_with_exp(exp: i64) -> String {
        let claims = JwtClaims {
            sub: Uuid::new_v4(),
            email: Some("user@example.com".to_string()),
            exp,
            iat: exp - 3600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("encode test token")
    }

    #[test]
    fn verify_accepts_valid_token() {
        let auth = AuthState::new(SECRET);
        let exp = chrono::Utc::now().timestamp() + 3600;
        let claims = auth.verify(&token_with_exp(exp)).expect("valid token");
        assert_eq!(claims.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn verify_rejects_expired_token() {
        let auth = AuthState::new(SECRET);
        let exp = chrono::Utc::now().timestamp() - 3600;
        let err = auth.verify(&token_with_exp(exp)).expect_err("expired");
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let auth = AuthState::new("another-secret-key-that-is-32-chars!");
        let exp = chrono::Utc::now().timestamp() + 3600;
        let err = auth.verify(&token_with_exp(exp)).expect_err("wrong key");
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
