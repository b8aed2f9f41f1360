use crate::error::FacturesError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

pub const NAME_REQUIRED: &str = "Name is required";
pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
}

/// A JSON scalar on its way into (or out of) a SQLite column.
///
/// Values are bound with their own storage class; the column affinity of the
/// `invoices` table then coerces them (`"1"` into INTEGER 1, `123` into TEXT `"123"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SqlValue {
    Integer(i64),
    Real(f64),
    Text(String),
    Null,
}

impl From<&Value> for SqlValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => SqlValue::Null,
            Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => SqlValue::Integer(i),
                None => n
                    .as_f64()
                    .map_or_else(|| SqlValue::Text(n.to_string()), SqlValue::Real),
            },
            Value::String(s) => SqlValue::Text(s.clone()),
            other => SqlValue::Text(other.to_string()),
        }
    }
}

/// Invoice row as stored. `items` stays in its serialized text form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: i64,
    pub customer_id: SqlValue,
    pub title: Option<String>,
    pub amount: SqlValue,
    pub date: Option<String>,
    pub items: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
}

impl NewCustomer {
    /// Reads `name` from a create-customer body. The name is trimmed and must not be empty.
    pub fn from_body(body: &Value) -> Result<Self, FacturesError> {
        body.get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| Self {
                name: name.to_string(),
            })
            .ok_or(FacturesError::Validation(NAME_REQUIRED))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub customer_id: SqlValue,
    pub title: SqlValue,
    pub amount: SqlValue,
    pub date: SqlValue,
    /// Serialized JSON text of the submitted `items`.
    pub items: String,
    pub photo_url: SqlValue,
}

impl NewInvoice {
    /// Validates a create-invoice body.
    ///
    /// `customer_id`, `title` and `date` must be present and non-null; any other value
    /// passes, empty strings included. An absent `amount` becomes 0 while an explicit
    /// null is kept, and an absent `items` becomes `[]`.
    pub fn from_body(fields: &Map<String, Value>) -> Result<Self, FacturesError> {
        let required = |name: &str| {
            fields
                .get(name)
                .filter(|v| !v.is_null())
                .map(SqlValue::from)
                .ok_or(FacturesError::Validation(MISSING_REQUIRED_FIELDS))
        };

        let customer_id = required("customer_id")?;
        let title = required("title")?;
        let date = required("date")?;

        let amount = fields
            .get("amount")
            .map_or(SqlValue::Integer(0), SqlValue::from);
        let items = match fields.get("items") {
            None => "[]".to_string(),
            Some(v) => serde_json::to_string(v)?,
        };
        let photo_url = fields.get("photo_url").map_or(SqlValue::Null, SqlValue::from);

        Ok(Self {
            customer_id,
            title,
            amount,
            date,
            items,
            photo_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(v: Value) -> Map<String, Value> {
        v.as_object().cloned().expect("test body must be an object")
    }

    fn is_validation(err: FacturesError, expected: &str) -> bool {
        matches!(err, FacturesError::Validation(msg) if msg == expected)
    }

    #[test]
    fn customer_name_is_trimmed() {
        let c = NewCustomer::from_body(&json!({"name": "  Acme  "})).unwrap();
        assert_eq!(c.name, "Acme");
    }

    #[test]
    fn customer_name_rejects_blank_absent_and_non_string() {
        for body in [
            json!({"name": ""}),
            json!({"name": "   "}),
            json!({}),
            json!({"name": null}),
            json!({"name": 42}),
            json!(["name"]),
        ] {
            let err = NewCustomer::from_body(&body).unwrap_err();
            assert!(is_validation(err, NAME_REQUIRED), "body {body} should be rejected");
        }
    }

    #[test]
    fn invoice_defaults_amount_and_items() {
        let inv = NewInvoice::from_body(&fields(json!({
            "customer_id": 3,
            "title": "Test",
            "date": "2024-01-01"
        })))
        .unwrap();
        assert_eq!(inv.customer_id, SqlValue::Integer(3));
        assert_eq!(inv.amount, SqlValue::Integer(0));
        assert_eq!(inv.items, "[]");
        assert_eq!(inv.photo_url, SqlValue::Null);
    }

    #[test]
    fn invoice_accepts_empty_title_and_date() {
        let inv = NewInvoice::from_body(&fields(json!({
            "customer_id": 1,
            "title": "",
            "date": ""
        })))
        .unwrap();
        assert_eq!(inv.title, SqlValue::Text(String::new()));
        assert_eq!(inv.date, SqlValue::Text(String::new()));
    }

    #[test]
    fn invoice_keeps_explicit_null_amount_and_serializes_items() {
        let inv = NewInvoice::from_body(&fields(json!({
            "customer_id": 1,
            "title": "t",
            "date": "d",
            "amount": null,
            "items": [{"label": "Paint", "qty": 2}, "nails"],
            "photo_url": "http://img/1.png"
        })))
        .unwrap();
        assert_eq!(inv.amount, SqlValue::Null);
        let decoded: Value = serde_json::from_str(&inv.items).unwrap();
        assert_eq!(decoded, json!([{"label": "Paint", "qty": 2}, "nails"]));
        assert_eq!(inv.photo_url, SqlValue::Text("http://img/1.png".to_string()));
    }

    #[test]
    fn invoice_rejects_missing_or_null_required_fields() {
        for body in [
            json!({"title": "t", "date": "d"}),
            json!({"customer_id": null, "title": "t", "date": "d"}),
            json!({"customer_id": 1, "date": "d"}),
            json!({"customer_id": 1, "title": "t"}),
            json!({"customer_id": 1, "title": "t", "date": null}),
        ] {
            let err = NewInvoice::from_body(&fields(body.clone())).unwrap_err();
            assert!(is_validation(err, MISSING_REQUIRED_FIELDS), "body {body} should be rejected");
        }
    }

    #[test]
    fn invoice_accepts_any_non_null_scalar() {
        let inv = NewInvoice::from_body(&fields(json!({
            "customer_id": "1",
            "title": 123,
            "date": 20240101,
            "amount": "12.5",
            "photo_url": 5
        })))
        .unwrap();
        assert_eq!(inv.customer_id, SqlValue::Text("1".to_string()));
        assert_eq!(inv.title, SqlValue::Integer(123));
        assert_eq!(inv.date, SqlValue::Integer(20240101));
        assert_eq!(inv.amount, SqlValue::Text("12.5".to_string()));
        assert_eq!(inv.photo_url, SqlValue::Integer(5));

        let inv = NewInvoice::from_body(&fields(json!({
            "customer_id": 1.0,
            "title": true,
            "date": {"day": 1}
        })))
        .unwrap();
        assert_eq!(inv.customer_id, SqlValue::Real(1.0));
        assert_eq!(inv.title, SqlValue::Integer(1));
        assert_eq!(inv.date, SqlValue::Text(r#"{"day":1}"#.to_string()));
    }

    #[test]
    fn sql_value_serializes_as_plain_json() {
        let values = vec![
            SqlValue::Integer(7),
            SqlValue::Real(2.5),
            SqlValue::Text("x".to_string()),
            SqlValue::Null,
        ];
        assert_eq!(serde_json::to_value(values).unwrap(), json!([7, 2.5, "x", null]));
    }
}
