//! SQL DDL for the customers and invoices tables.

/// SQLite schema with:
/// - `customers`: `id` INTEGER PRIMARY KEY AUTOINCREMENT, `name` TEXT NOT NULL
/// - `invoices`: owned by a customer through `customer_id`
/// - `items` holds the JSON-serialized item list as text
/// - no `ON DELETE CASCADE`; cascading is done by `FacturesStorage::delete_customer`
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS invoices (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id INTEGER,
    title TEXT,
    amount REAL,
    date TEXT,
    items TEXT, -- JSON, serialized as text
    photo_url TEXT,
    FOREIGN KEY(customer_id) REFERENCES customers(id)
);
"#;
