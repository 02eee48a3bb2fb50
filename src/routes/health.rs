use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

/// GET /health — also proves the schema is in place by counting meals.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM meals")
        .fetch_one(&state.db)
        .await
    {
        Ok(meals) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "db": "connected", "meals": meals })),
        ),
        Err(e) => {
            tracing::warn!("health check failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "error", "db": e.to_string() })),
            )
        }
    }
}
