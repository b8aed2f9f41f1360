pub mod customers;
pub mod health;
pub mod invoices;
