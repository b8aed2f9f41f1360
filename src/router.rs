use axum::{
    Router, middleware,
    routing::{delete, get},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::FacturesStorage;
use crate::handlers::{customers, health, invoices};
use crate::middleware::ensure_schema;

#[derive(Clone)]
pub struct FacturesState {
    pub storage: FacturesStorage,
}

impl FacturesState {
    pub fn new(storage: FacturesStorage) -> Self {
        Self { storage }
    }
}

pub fn factures_router(state: FacturesState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route(
            "/customers",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route("/customers/{cid}", delete(customers::delete_customer))
        .route(
            "/invoices",
            get(invoices::list_invoices).post(invoices::create_invoice),
        )
        .route("/invoices/{inv_id}", delete(invoices::delete_invoice));

    Router::new()
        .route("/", get(health::home))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state.clone(), ensure_schema))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any origin when none are configured, otherwise only the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins.iter().filter_map(|s| s.parse().ok()))
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
