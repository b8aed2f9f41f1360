use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{FacturesError, router::FacturesState};

/// Make sure both tables exist before the request reaches its handler.
/// Only the first request of the process issues DDL.
pub async fn ensure_schema(
    State(state): State<FacturesState>,
    req: Request,
    next: Next,
) -> Result<Response, FacturesError> {
    state.storage.ensure_schema().await?;
    Ok(next.run(req).await)
}
