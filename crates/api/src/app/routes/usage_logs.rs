use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};

use crate::app::services::AppServices;

/// Full usage log, oldest first.
pub async fn list_usage_logs(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.read(|store, _| store.usage_log().entries().to_vec()))
}
