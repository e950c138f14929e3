/// Axum handler: GET /health
#[utoipa::path(get, path = "/health", tag = "System", operation_id = "health",
    responses((status = 200, description = "Service is up", body = String, content_type = "text/plain")))]
pub async fn handler() -> &'static str {
    "Healthy"
}
