use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::company::Job;
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Serialize)]
pub struct JobListing {
    pub company_name: String,
    pub company_slug: String,
    #[serde(flatten)]
    pub job: Job,
}

/// Every job of every visible company.
pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<JobListing>>, AppError> {
    let companies = db::companies::load_visible(&state.pool).await?;
    let listings = companies
        .iter()
        .flat_map(|company| {
            company.jobs().map(move |job| JobListing {
                company_name: company.name.clone(),
                company_slug: company.slug_name.clone(),
                job: job.clone(),
            })
        })
        .collect();
    Ok(Json(listings))
}

/// Active jobs in currently active packets.
pub async fn active(State(state): State<SharedState>) -> Result<Json<Vec<JobListing>>, AppError> {
    let now = Utc::now();
    let companies = db::companies::load_visible(&state.pool).await?;
    let listings = companies
        .iter()
        .flat_map(|company| {
            company.active_jobs(now).map(move |job| JobListing {
                company_name: company.name.clone(),
                company_slug: company.slug_name.clone(),
                job: job.clone(),
            })
        })
        .collect();
    Ok(Json(listings))
}
