pub mod api_json;
pub mod schema_guard;

pub use api_json::ApiJson;
pub use schema_guard::ensure_schema;
