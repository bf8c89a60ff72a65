use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::ApiError;

/// Path id extractor whose rejection renders the standard envelope instead
/// of axum's plain-text default.
#[derive(Debug)]
pub(crate) struct UserId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(UserId(id)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}
