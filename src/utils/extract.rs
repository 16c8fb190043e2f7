use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::utils::error::AppError;

/// Authenticated user id, supplied by the identity layer in front of this
/// service via the `x-user-id` header. Every cart and order operation takes
/// the user id explicitly rather than reading ambient session state.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::AuthError("Missing x-user-id header".to_string()))?;

        let user_id = Uuid::parse_str(header)
            .map_err(|_| AppError::AuthError("Malformed x-user-id header".to_string()))?;

        Ok(Self(user_id))
    }
}
