//! Record id path extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::errors::AppError;

/// Extracts the numeric `:id` segment of a user route.
///
/// Axum's built-in path rejection answers with its own body; routing it
/// through `AppError` keeps the `{error, message, statusCode}` shape
/// uniform across every failure, malformed ids included.
pub struct IdPath(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        Ok(IdPath(id))
    }
}
