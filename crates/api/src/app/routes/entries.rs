use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use labstock_inventory::{RecordIntake, RecordUsage};

use crate::app::errors;
use crate::app::services::AppServices;

/// IN entry: registers the chemical and returns the created batch.
pub async fn create_in_entry(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<RecordIntake>, JsonRejection>,
) -> axum::response::Response {
    let Json(cmd) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.record_intake(cmd) {
        Ok(batch) => {
            tracing::info!(
                batch_id = %batch.batch_id(),
                chemical_id = %batch.chemical_id(),
                batch_number = batch.batch_number(),
                quantity = %batch.initial_quantity(),
                unit = %batch.quantity_unit(),
                "intake recorded"
            );
            (StatusCode::CREATED, Json(batch)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// OUT entry: draws from a batch and returns the usage log entry.
pub async fn create_out_entry(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<RecordUsage>, JsonRejection>,
) -> axum::response::Response {
    let Json(cmd) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.record_usage(cmd) {
        Ok(entry) => {
            tracing::info!(
                usage_id = %entry.usage_id,
                batch_id = %entry.batch_id,
                quantity = %entry.quantity_used,
                unit = %entry.quantity_unit,
                "usage recorded"
            );
            (StatusCode::CREATED, Json(entry)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
