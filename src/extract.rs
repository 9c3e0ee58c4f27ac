use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use stockroom_core::AppError;

/// JSON body extractor whose rejections use the `{"message": ...}` error body.
///
/// A request without `Content-Type: application/json` is rejected with 415.
/// Any body that fails to parse is rejected with 400. Field-level checks are
/// left to the services.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::MissingJsonContentType(_) => AppError::unsupported_media_type(
                    anyhow!("Content-Type must be application/json"),
                ),
                JsonRejection::JsonDataError(_) => {
                    let error_msg = rejection.body_text();
                    if error_msg.contains("invalid type") {
                        AppError::bad_request(anyhow!("Invalid field type in request"))
                    } else {
                        AppError::bad_request(anyhow!("Invalid request body"))
                    }
                }
                _ => AppError::bad_request(anyhow!("Malformed JSON request body")),
            })?;

        Ok(JsonBody(value))
    }
}

/// Path extractor reporting unparsable segments as a 400 `{"message"}` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| match rejection {
                PathRejection::FailedToDeserializePathParams(_) => {
                    AppError::bad_request(anyhow!("Invalid path parameter"))
                }
                other => AppError::internal(anyhow!(other.body_text())),
            })?;

        Ok(PathParam(value))
    }
}
