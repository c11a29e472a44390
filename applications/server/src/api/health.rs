/// Health check API routes

/// GET /health - Health check endpoint
pub async fn health() -> &'static str {
    "ok"
}
