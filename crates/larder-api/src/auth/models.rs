use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure. The subject is the account id issued by the external
/// identity provider; email rides along as the notification contact address.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid, // account_id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// User context extracted from a verified JWT and stored in request extensions
#[derive(Debug, Clone)]
pub struct UserContext {
    pub account_id: Uuid,
    pub email: Option<String>,
}

// Implement FromRequestParts for UserContext so handlers can take it as a
// plain argument; the auth middleware inserts it into request extensions.
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserContext>()
            .cloned()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Missing user context".to_string(),
                        details: None,
                        error_type: None,
                        code: "MISSING_USER_CONTEXT".to_string(),
                        recoverable: false,
                        suggested_action: Some("Check authentication token".to_string()),
                    }),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_round_trip_without_email() {
        let claims = JwtClaims {
            sub: Uuid::new_v4(),
            email: None,
            exp: 1_900_000_000,
            iat: 1_800_000_000,
        };
        let json = serde_json::to_string(&claims).expect("serialize");
        // Absent email must not appear in the token payload.
        assert!(!json.contains("email"));
        let parsed: JwtClaims = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.sub, claims.sub);
        assert!(parsed.email.is_none());
    }
}
