//! Custom Axum extractors

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection};
use axum::http::request::Parts;
use uuid::Uuid;

use crate::errors::Error;

/// Extract and validate a UUID from the single path parameter.
///
/// Anything that is not a UUID is rejected with 422 rather than axum's default 400.
pub struct ValidUuid(pub Uuid);

impl<S> FromRequestParts<S> for ValidUuid
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state).await.map_err(|e| Error::BadRequest {
            message: format!("Invalid path parameter: {e}"),
        })?;

        let uuid = Uuid::parse_str(&id).map_err(|_| Error::Validation {
            message: format!("Invalid id '{id}': expected a UUID"),
        })?;

        Ok(Self(uuid))
    }
}

/// `Json<T>` whose rejections render as the usual `{"detail": ...}` error body.
///
/// Missing fields and wrong types are 422; unparseable bodies and a missing
/// `application/json` content type are 400.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::JsonDataError(e)) => Err(Error::Validation { message: e.body_text() }),
            Err(e) => Err(Error::BadRequest { message: e.body_text() }),
        }
    }
}
