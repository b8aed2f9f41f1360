use crate::db::models::{Customer, Invoice, NewCustomer, NewInvoice, SqlValue};
use crate::db::schema::SQLITE_INIT;
use crate::error::FacturesError;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite, TypeInfo, ValueRef};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct FacturesStorage {
    pool: SqlitePool,
    schema_ready: Arc<OnceCell<()>>,
}

impl FacturesStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            schema_ready: Arc::new(OnceCell::new()),
        }
    }

    /// Open a pool on `database_url`, creating the database file when missing.
    ///
    /// Foreign-key enforcement is switched off: invoices may reference a
    /// `customer_id` that has no row, and cascading is done here, not by SQLite.
    pub async fn connect(database_url: &str) -> Result<Self, FacturesError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(false);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self::new(pool))
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), FacturesError> {
        // execute multiple statements one by one (sqlx::query runs a single statement)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Run `init_schema` once per storage handle; later calls return immediately.
    pub async fn ensure_schema(&self) -> Result<(), FacturesError> {
        self.schema_ready
            .get_or_try_init(|| async {
                self.init_schema().await?;
                info!("database schema ready");
                Ok::<(), FacturesError>(())
            })
            .await?;
        Ok(())
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, FacturesError> {
        let rows = sqlx::query_as::<_, Customer>("SELECT id, name FROM customers")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, FacturesError> {
        let result = sqlx::query("INSERT INTO customers (name) VALUES (?)")
            .bind(&customer.name)
            .execute(&self.pool)
            .await?;
        Ok(Customer {
            id: result.last_insert_rowid(),
            name: customer.name,
        })
    }

    /// Delete a customer together with every invoice referencing it.
    ///
    /// Both statements run in one transaction. When no customer row matches,
    /// the transaction is rolled back and the invoice table is left untouched.
    pub async fn delete_customer(&self, id: i64) -> Result<bool, FacturesError> {
        let mut tx = self.pool.begin().await?;

        let invoices = sqlx::query("DELETE FROM invoices WHERE customer_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let customers = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if customers == 0 {
            tx.rollback().await?;
            debug!(customer_id = id, "customer not found; delete rolled back");
            return Ok(false);
        }

        tx.commit().await?;
        info!(customer_id = id, invoices, "customer deleted");
        Ok(true)
    }

    /// List invoices, optionally only those owned by `customer_id`. No ordering is applied.
    ///
    /// The filter is bound as text; the INTEGER affinity of `customer_id` turns
    /// numeric text such as `"7"` or `"7.0"` into a number before comparing.
    pub async fn list_invoices(
        &self,
        customer_id: Option<&str>,
    ) -> Result<Vec<Invoice>, FacturesError> {
        let rows = match customer_id {
            Some(cid) => {
                sqlx::query(
                    r#"SELECT id, customer_id, title, amount, date, items, photo_url
                       FROM invoices WHERE customer_id = ?"#,
                )
                .bind(cid)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"SELECT id, customer_id, title, amount, date, items, photo_url
                       FROM invoices"#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.into_iter().map(Self::row_to_invoice).collect()
    }

    /// Insert an invoice and return its generated id.
    pub async fn insert_invoice(&self, invoice: &NewInvoice) -> Result<i64, FacturesError> {
        let query = sqlx::query(
            r#"
            INSERT INTO invoices (customer_id, title, amount, date, items, photo_url)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        );
        let query = bind_value(query, &invoice.customer_id);
        let query = bind_value(query, &invoice.title);
        let query = bind_value(query, &invoice.amount);
        let query = bind_value(query, &invoice.date);
        let query = query.bind(&invoice.items);
        let query = bind_value(query, &invoice.photo_url);
        let result = query.execute(&self.pool).await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn delete_invoice(&self, id: i64) -> Result<bool, FacturesError> {
        let deleted = sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }

    fn row_to_invoice(row: SqliteRow) -> Result<Invoice, FacturesError> {
        Ok(Invoice {
            id: row.try_get("id")?,
            customer_id: column_value(&row, "customer_id")?,
            title: row.try_get("title")?,
            amount: column_value(&row, "amount")?,
            date: row.try_get("date")?,
            items: row.try_get("items")?,
            photo_url: row.try_get("photo_url")?,
        })
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &'q SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Integer(i) => query.bind(*i),
        SqlValue::Real(f) => query.bind(*f),
        SqlValue::Text(s) => query.bind(s.as_str()),
        SqlValue::Null => query.bind(None::<i64>),
    }
}

/// Read a column by the storage class of the stored value, since affinity
/// leaves non-numeric text in INTEGER/REAL columns as TEXT.
fn column_value(row: &SqliteRow, column: &str) -> Result<SqlValue, sqlx::Error> {
    let raw = row.try_get_raw(column)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }
    let storage_class = raw.type_info().name().to_string();
    match storage_class.as_str() {
        "INTEGER" => Ok(SqlValue::Integer(row.try_get(column)?)),
        "REAL" => Ok(SqlValue::Real(row.try_get(column)?)),
        _ => Ok(SqlValue::Text(row.try_get(column)?)),
    }
}
