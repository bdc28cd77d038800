//! Session authentication.
//!
//! Sessions are HS256 bearer tokens minted by the identity provider with the
//! shared `JWT_SECRET`. The `sub` claim is the user's stable external id; the
//! first authenticated request creates the local user row.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

#[allow(dead_code)]
pub fn issue_token(
    secret: &str,
    subject: &str,
    email: &str,
    name: Option<&str>,
    ttl: Duration,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: subject.to_string(),
        email: email.to_string(),
        name: name.map(str::to_string),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to sign session token: {e}")))
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        debug!("Rejected session token: {e}");
        AppError::Unauthorized
    })?;

    if data.claims.sub.trim().is_empty() {
        debug!("Rejected session token without subject");
        return Err(AppError::Unauthorized);
    }
    Ok(data.claims)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;
    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(AppError::Unauthorized)?;
    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }
    Ok(token)
}

/// The authenticated caller. Extracting it verifies the bearer token and
/// upserts the user row.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(&parts.headers)?;
        let claims = decode_token(&state.config.jwt_secret, token)?;
        let user = state
            .store
            .upsert_user(&claims.sub, &claims.email, claims.name.as_deref())
            .await?;
        Ok(AuthUser(user))
    }
}

/// GET /api/v1/me
pub async fn handle_me(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}
