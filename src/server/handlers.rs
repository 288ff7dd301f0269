use crate::core::ResumeField;
use crate::server::AppState;
use crate::utils::error::Result;
use axum::extract::State;
use axum::Json;

pub const SERVICE_TITLE: &str = "Jose's Resume API";

/// Shared handler behind every `/Resume*/` route.
pub async fn field_handler(
    State(state): State<AppState>,
    field: ResumeField,
) -> Result<Json<Vec<serde_json::Value>>> {
    let values = state.projection().run(field).await?;
    tracing::info!("Serving {} {} values", values.len(), field);
    Ok(Json(values))
}

pub async fn root_handler() -> Json<serde_json::Value> {
    let routes: Vec<&str> = ResumeField::ALL.iter().map(|f| f.route_path()).collect();
    Json(serde_json::json!({
        "title": SERVICE_TITLE,
        "version": env!("CARGO_PKG_VERSION"),
        "routes": routes,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn ping_handler() -> &'static str {
    "pong"
}
