use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use tracing::info;

use crate::db::{Customer, NewCustomer};
use crate::middleware::ApiJson;
use crate::{FacturesError, router::FacturesState};

/// GET /api/customers
pub async fn list_customers(
    State(state): State<FacturesState>,
) -> Result<Json<Vec<Customer>>, FacturesError> {
    Ok(Json(state.storage.list_customers().await?))
}

/// POST /api/customers -> 201 with `{id, name}`; the stored name is the trimmed one.
pub async fn create_customer(
    State(state): State<FacturesState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<(StatusCode, Json<Customer>), FacturesError> {
    let new_customer = NewCustomer::from_body(&body)?;
    let customer = state.storage.insert_customer(new_customer).await?;
    info!(customer_id = customer.id, "customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// DELETE /api/customers/{cid} -> 204, cascading to the customer's invoices.
pub async fn delete_customer(
    State(state): State<FacturesState>,
    Path(cid): Path<i64>,
) -> Result<StatusCode, FacturesError> {
    if state.storage.delete_customer(cid).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(FacturesError::NotFound("Customer not found"))
    }
}
