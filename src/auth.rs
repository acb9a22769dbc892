use crate::errors::AppError;
use crate::models::UserId;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Header the fronting auth layer sets to the signed-in user's id.
pub const USER_HEADER: &str = "x-user-id";

/// The authenticated caller. Requests without a valid identity are rejected with 401.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(AppError::unauthorized)?;

        let user_id = Uuid::parse_str(value.trim()).map_err(|_| AppError::unauthorized())?;
        Ok(CurrentUser(user_id))
    }
}
