use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    response::{IntoResponse, Response},
};

use crate::error::ApiErrorBody;

/// `axum::Json` with rejections rendered as `{"error": ...}` bodies,
/// keeping the rejection's own status (400, 415 or 422).
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err((
                rejection.status(),
                Json(ApiErrorBody {
                    error: rejection.body_text(),
                }),
            )
                .into_response()),
        }
    }
}
