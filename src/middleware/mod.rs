use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::sync::Arc;

/// The authenticated caller, as asserted by the identity provider's
/// token. Credentials are never re-validated here.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: i64,
    email: String,
    #[allow(dead_code)]
    exp: usize,
}

// Bearer token extractor; also accepts the legacy auth-token header
impl FromRequestParts<Arc<crate::AppState>> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .or_else(|| {
                parts
                    .headers
                    .get("auth-token")
                    .and_then(|value| value.to_str().ok())
            })
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let key = DecodingKey::from_secret(state.config.jwt.secret.as_bytes());
        let data = jsonwebtoken::decode::<Claims>(token, &key, &Validation::new(Algorithm::HS256))
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        Ok(AuthUser {
            user_id: data.claims.sub,
            email: data.claims.email,
        })
    }
}
