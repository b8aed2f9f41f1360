//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows, plus validated request inputs
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: pool-backed storage used by the request handlers

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Customer, Invoice, NewCustomer, NewInvoice, SqlValue};
pub use schema::SQLITE_INIT;
pub use sqlite::{FacturesStorage, SqlitePool};
