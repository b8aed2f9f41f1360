use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::db::models::MISSING_REQUIRED_FIELDS;
use crate::db::{Invoice, NewInvoice};
use crate::middleware::ApiJson;
use crate::{FacturesError, router::FacturesState};

#[derive(Debug, Deserialize)]
pub struct InvoiceFilter {
    pub customer_id: Option<String>,
}

/// GET /api/invoices[?customer_id=] -> rows with `items` left as serialized text.
pub async fn list_invoices(
    State(state): State<FacturesState>,
    Query(filter): Query<InvoiceFilter>,
) -> Result<Json<Vec<Invoice>>, FacturesError> {
    let customer_id = filter.customer_id.as_deref().filter(|cid| !cid.is_empty());
    Ok(Json(state.storage.list_invoices(customer_id).await?))
}

/// POST /api/invoices -> 201 with the submitted object plus the generated `id`.
pub async fn create_invoice(
    State(state): State<FacturesState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<(StatusCode, Json<Value>), FacturesError> {
    let Value::Object(mut fields) = body else {
        return Err(FacturesError::Validation(MISSING_REQUIRED_FIELDS));
    };
    let new_invoice = NewInvoice::from_body(&fields)?;
    let id = state.storage.insert_invoice(&new_invoice).await?;
    info!(
        invoice_id = id,
        customer_id = ?new_invoice.customer_id,
        "invoice created"
    );

    // The generated id replaces any `id` the client sent.
    fields.insert("id".to_string(), Value::from(id));
    Ok((StatusCode::CREATED, Json(Value::Object(fields))))
}

/// DELETE /api/invoices/{inv_id}
pub async fn delete_invoice(
    State(state): State<FacturesState>,
    Path(inv_id): Path<i64>,
) -> Result<StatusCode, FacturesError> {
    if state.storage.delete_invoice(inv_id).await? {
        info!(invoice_id = inv_id, "invoice deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(FacturesError::NotFound("Invoice not found"))
    }
}
