use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};

use crate::app::services::AppServices;

pub async fn get_dashboard(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.read(|store, today| store.dashboard(today)))
}
