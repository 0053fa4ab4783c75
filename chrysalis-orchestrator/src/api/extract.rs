//! Request body extraction
//!
//! axum's default `Json` rejection replies with plain text, which would leak
//! past the `{"success": false, "error"}` envelope on malformed bodies. This
//! wrapper funnels every deserialization failure through [`ApiError`] so
//! shape-level rejections look the same as handler-level validation errors.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use crate::api::error::ApiError;

/// JSON body extractor whose rejection carries the standard error envelope.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}
