pub mod companies;
pub mod education;
pub mod frontpage;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(frontpage::index))
        // Companies
        .route("/company", get(companies::list))
        .route("/company/{slug_company_name}", get(companies::show))
        .route("/company/{slug_company_name}/jobs", get(companies::jobs))
        .route(
            "/company/{slug_company_name}/jobs/{slug_job_name}",
            get(companies::job),
        )
        .route("/jobs", get(companies::active_jobs))
}

/// Pages behind the admin token.
pub fn admin_view_routes() -> Router<SharedState> {
    Router::new()
        .route("/admin/education/upload", get(education::upload_page))
        .route("/admin/education/bulk", get(education::bulk_page))
}
