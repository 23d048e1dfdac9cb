use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};

use crate::app::services::AppServices;

/// All chemicals in registration order.
pub async fn list_chemicals(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.read(|store, _| store.chemicals().to_vec()))
}
