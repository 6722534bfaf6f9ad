pub mod admin;
pub mod companies;
pub mod education;
pub mod frontpage;
pub mod jobs;

use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::form;
use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Companies
        .route("/api/v1/companies", get(companies::list))
        .route("/api/v1/companies/{slug_company_name}", get(companies::show))
        .route(
            "/api/v1/companies/{slug_company_name}/jobs",
            get(companies::jobs),
        )
        .route(
            "/api/v1/companies/{slug_company_name}/jobs/{slug_job_name}",
            get(companies::job),
        )
        // Jobs
        .route("/api/v1/jobs", get(jobs::list))
        .route("/api/v1/jobs/active", get(jobs::active))
        // Front page
        .route("/api/v1/frontpage", get(frontpage::home))
        .route("/api/v1/frontpage/news", get(frontpage::news))
        // Education
        .route("/api/v1/education/exams", get(education::list_exams))
        .route("/api/v1/admin/education/upload", post(education::upload))
        .route("/api/v1/admin/education/bulk", post(education::bulk))
        // Admin: companies
        .route("/api/v1/admin/companies", post(admin::create_company))
        .route(
            "/api/v1/admin/companies/{slug}",
            axum::routing::put(admin::update_company).delete(admin::delete_company),
        )
        .route("/api/v1/admin/companies/{slug}/form", get(admin::company_form))
        // Admin: packets
        .route(
            "/api/v1/admin/companies/{slug}/packets",
            post(admin::create_packet),
        )
        .route("/api/v1/admin/packets/expire", post(admin::expire_packets))
        .route(
            "/api/v1/admin/packets/{id}",
            axum::routing::put(admin::update_packet).delete(admin::delete_packet),
        )
        // Admin: jobs
        .route("/api/v1/admin/packets/{id}/jobs", post(admin::create_job))
        .route(
            "/api/v1/admin/jobs/{id}",
            axum::routing::put(admin::update_job).delete(admin::delete_job),
        )
        // Admin: audit log
        .route("/api/v1/admin/audit", get(admin::audit_log))
}

/// Flat key-value body from JSON or urlencoded requests.
pub(crate) fn flat_body(headers: &HeaderMap, body: &[u8]) -> Result<Map<String, Value>, AppError> {
    let content_type = headers.get("content-type").and_then(|v| v.to_str().ok());
    form::parse_body(content_type, body).map_err(AppError::BadRequest)
}

pub(crate) fn typed_body<T: DeserializeOwned>(
    headers: &HeaderMap,
    body: &[u8],
) -> Result<T, AppError> {
    let map = flat_body(headers, body)?;
    serde_json::from_value(Value::Object(map))
        .map_err(|e| AppError::BadRequest(format!("Invalid form: {e}")))
}
