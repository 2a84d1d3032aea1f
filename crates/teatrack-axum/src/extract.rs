//! Extractors whose rejections use the JSON error body.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use teatrack_core::ProfileId;

use crate::error::HttpError;

/// `Json<T>` that rejects malformed bodies with a 400 `HttpError`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// The `{id}` segment of a profile route, parsed as a numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileIdPath(pub ProfileId);

impl<S> FromRequestParts<S> for ProfileIdPath
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| HttpError::BadRequest(e.body_text()))?;
        raw.parse::<ProfileId>()
            .map(Self)
            .map_err(|_| HttpError::BadRequest(format!("Invalid profile id: {raw}")))
    }
}
