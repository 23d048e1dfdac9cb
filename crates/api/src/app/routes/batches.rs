use std::sync::Arc;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use labstock_core::BatchId;
use labstock_inventory::{expired, expiring_soon, BatchFilter};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

fn parse_filter(
    query: Result<Query<dto::BatchQuery>, QueryRejection>,
) -> Result<BatchFilter, axum::response::Response> {
    let Query(query) = query.map_err(errors::query_rejection_to_response)?;
    query.to_filter().map_err(errors::domain_error_to_response)
}

/// Filtered batches, soonest expiry first.
pub async fn list_batches(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::BatchQuery>, QueryRejection>,
) -> axum::response::Response {
    let filter = match parse_filter(query) {
        Ok(f) => f,
        Err(resp) => return resp,
    };

    let rows = services.read(|store, today| dto::batch_views(store.search(&filter, today), today));
    (StatusCode::OK, Json(rows)).into_response()
}

/// Candidates for an OUT entry: batches with stock, first-expiring first.
pub async fn list_available(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let rows = services.read(|store, today| dto::batch_views(store.available_batches(), today));
    (StatusCode::OK, Json(rows)).into_response()
}

pub async fn list_expiring_soon(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::BatchQuery>, QueryRejection>,
) -> axum::response::Response {
    let filter = match parse_filter(query) {
        Ok(f) => f,
        Err(resp) => return resp,
    };

    let rows = services.read(|store, today| {
        dto::batch_views(expiring_soon(store.batches(), &filter, today), today)
    });
    (StatusCode::OK, Json(rows)).into_response()
}

pub async fn list_expired(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::BatchQuery>, QueryRejection>,
) -> axum::response::Response {
    let filter = match parse_filter(query) {
        Ok(f) => f,
        Err(resp) => return resp,
    };

    let rows = services.read(|store, today| dto::batch_views(expired(store.batches(), &filter, today), today));
    (StatusCode::OK, Json(rows)).into_response()
}

pub async fn get_batch_detail(
    Extension(services): Extension<Arc<AppServices>>,
    id: Result<Path<String>, PathRejection>,
) -> axum::response::Response {
    let Path(id) = match id {
        Ok(p) => p,
        Err(rejection) => return errors::path_rejection_to_response(rejection),
    };
    let batch_id: BatchId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.read(|store, today| store.batch_detail(batch_id, today)) {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
