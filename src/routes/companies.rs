use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;

use crate::company::{Company, Job};
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Serialize)]
pub struct CompanyResponse {
    #[serde(flatten)]
    pub company: Company,
    pub number_of_jobs: usize,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        let number_of_jobs = company.number_of_jobs();
        CompanyResponse {
            company,
            number_of_jobs,
        }
    }
}

#[derive(Serialize)]
pub struct CompanyJobs {
    pub company: CompanyResponse,
    pub jobs: Vec<Job>,
}

/// Load the full aggregate for a slug. Anything but exactly one match is not found.
pub(crate) async fn find_unique(pool: &PgPool, slug: &str) -> Result<Company, AppError> {
    let mut companies = db::companies::find_by_slug(pool, slug).await?;
    if companies.len() != 1 {
        return Err(AppError::NotFound("Company not found".to_string()));
    }
    let company = companies.remove(0);
    Ok(db::companies::load(pool, company).await?)
}

pub async fn list(
    State(state): State<SharedState>,
) -> Result<Json<Vec<CompanyResponse>>, AppError> {
    let companies = db::companies::load_visible(&state.pool).await?;
    Ok(Json(companies.into_iter().map(CompanyResponse::from).collect()))
}

pub async fn show(
    State(state): State<SharedState>,
    Path(slug_company_name): Path<String>,
) -> Result<Json<CompanyResponse>, AppError> {
    let company = find_unique(&state.pool, &slug_company_name).await?;
    Ok(Json(company.into()))
}

pub async fn jobs(
    State(state): State<SharedState>,
    Path(slug_company_name): Path<String>,
) -> Result<Json<CompanyJobs>, AppError> {
    let company = find_unique(&state.pool, &slug_company_name).await?;
    let jobs: Vec<Job> = company.jobs().cloned().collect();
    Ok(Json(CompanyJobs {
        company: company.into(),
        jobs,
    }))
}

/// A single job by company and job slug; `{"job": null}` when either is unknown.
pub async fn job(
    State(state): State<SharedState>,
    Path((slug_company_name, slug_job_name)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let job = match find_unique(&state.pool, &slug_company_name).await {
        Ok(company) => company.find_job(&slug_job_name).cloned(),
        Err(AppError::NotFound(_)) => None,
        Err(e) => return Err(e),
    };
    Ok(Json(json!({ "job": job })))
}
