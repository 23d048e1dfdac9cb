use axum::{
    routing::{get, post},
    Router,
};

pub mod batches;
pub mod chemicals;
pub mod dashboard;
pub mod entries;
pub mod system;
pub mod usage_logs;

/// Router for the inventory REST surface (mounted under `/api`).
pub fn router() -> Router {
    Router::new()
        .route("/dashboard/", get(dashboard::get_dashboard))
        .route("/chemicals/", get(chemicals::list_chemicals))
        .route("/usage-logs/", get(usage_logs::list_usage_logs))
        .route("/in-entry/", post(entries::create_in_entry))
        .route("/out-entry/", post(entries::create_out_entry))
        .route("/batches/", get(batches::list_batches))
        .route("/batches/available/", get(batches::list_available))
        .route("/batches/expiring-soon/", get(batches::list_expiring_soon))
        .route("/batches/expired/", get(batches::list_expired))
        .route("/batches/:id/", get(batches::get_batch_detail))
}
