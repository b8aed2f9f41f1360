/// GET / -> plain-text liveness string.
pub async fn home() -> &'static str {
    "Factures API is running!"
}
