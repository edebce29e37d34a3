use axum::routing::get;
use axum::{Json, Router};

pub fn setup_well_known(router: Router) -> Router {
    router.route("/api/well-known/health", get(health))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": ampa_core::package_name(),
        "version": ampa_core::package_version(),
        "status": "ok",
    }))
}
