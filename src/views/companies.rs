use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;

use crate::company::{Company, Job, Language};
use crate::db;
use crate::error::AppError;
use crate::routes::companies::find_unique;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl LangQuery {
    fn language(&self) -> Option<Language> {
        self.lang.as_deref().and_then(|code| Language::parse(code).ok())
    }
}

/// A company rendered in one language, falling back to its untranslated fields.
struct CompanyView {
    name: String,
    slug_name: String,
    slogan: String,
    description: String,
    website: String,
    logo: String,
    address: String,
    email: String,
    phone: String,
    number_of_jobs: usize,
}

impl CompanyView {
    fn new(company: &Company, language: Option<&Language>) -> Self {
        let translated = language.and_then(|l| company.translation(l)).map(|t| &t.fields);
        let pick = |value: Option<&String>, fallback: &str| match value {
            Some(v) if !v.is_empty() => v.clone(),
            _ => fallback.to_string(),
        };

        CompanyView {
            name: pick(translated.map(|f| &f.name), &company.name),
            slug_name: company.slug_name.clone(),
            slogan: pick(translated.map(|f| &f.slogan), ""),
            description: pick(translated.map(|f| &f.description), ""),
            website: pick(translated.map(|f| &f.website), ""),
            logo: pick(translated.map(|f| &f.logo), ""),
            address: pick(translated.map(|f| &f.address), &company.address),
            email: pick(translated.map(|f| &f.email), &company.email),
            phone: pick(translated.map(|f| &f.phone), &company.phone),
            number_of_jobs: company.number_of_jobs(),
        }
    }
}

struct JobRow {
    name: String,
    ascii_name: String,
    company_name: String,
    company_slug: String,
}

impl JobRow {
    fn new(company: &Company, job: &Job) -> Self {
        JobRow {
            name: job.name.clone(),
            ascii_name: job.ascii_name.clone(),
            company_name: company.name.clone(),
            company_slug: company.slug_name.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "company/list.html")]
struct ListTemplate {
    companies: Vec<CompanyView>,
}

#[derive(Template)]
#[template(path = "company/show.html")]
struct ShowTemplate {
    company: CompanyView,
    languages: Vec<String>,
}

#[derive(Template)]
#[template(path = "company/jobs.html")]
struct JobsTemplate {
    title: String,
    jobs: Vec<JobRow>,
}

#[derive(Template)]
#[template(path = "company/job.html")]
struct JobTemplate {
    company: CompanyView,
    job: Option<Job>,
}

#[derive(Template)]
#[template(path = "company/not_found.html")]
struct NotFoundTemplate {
    slug: String,
}

/// Render a missing company as a 404 page; other errors pass through.
async fn load_or_404(
    state: &SharedState,
    slug: &str,
) -> Result<Result<Company, Response>, AppError> {
    match find_unique(&state.pool, slug).await {
        Ok(company) => Ok(Ok(company)),
        Err(AppError::NotFound(_)) => {
            let template = NotFoundTemplate {
                slug: slug.to_string(),
            };
            Ok(Err((
                StatusCode::NOT_FOUND,
                Html(template.render().unwrap_or_default()),
            )
                .into_response()))
        }
        Err(e) => Err(e),
    }
}

pub async fn list(
    State(state): State<SharedState>,
    Query(q): Query<LangQuery>,
) -> Result<impl IntoResponse, AppError> {
    let language = q.language();
    let companies = db::companies::load_visible(&state.pool).await?;

    let template = ListTemplate {
        companies: companies
            .iter()
            .map(|c| CompanyView::new(c, language.as_ref()))
            .collect(),
    };
    Ok(Html(template.render().unwrap_or_default()))
}

pub async fn show(
    State(state): State<SharedState>,
    Path(slug_company_name): Path<String>,
    Query(q): Query<LangQuery>,
) -> Result<Response, AppError> {
    let company = match load_or_404(&state, &slug_company_name).await? {
        Ok(company) => company,
        Err(not_found) => return Ok(not_found),
    };

    let template = ShowTemplate {
        company: CompanyView::new(&company, q.language().as_ref()),
        languages: company.languages().iter().map(|l| l.to_string()).collect(),
    };
    Ok(Html(template.render().unwrap_or_default()).into_response())
}

pub async fn jobs(
    State(state): State<SharedState>,
    Path(slug_company_name): Path<String>,
) -> Result<Response, AppError> {
    let company = match load_or_404(&state, &slug_company_name).await? {
        Ok(company) => company,
        Err(not_found) => return Ok(not_found),
    };

    let template = JobsTemplate {
        title: format!("Jobs at {}", company.name),
        jobs: company.jobs().map(|job| JobRow::new(&company, job)).collect(),
    };
    Ok(Html(template.render().unwrap_or_default()).into_response())
}

pub async fn job(
    State(state): State<SharedState>,
    Path((slug_company_name, slug_job_name)): Path<(String, String)>,
    Query(q): Query<LangQuery>,
) -> Result<Response, AppError> {
    let company = match load_or_404(&state, &slug_company_name).await? {
        Ok(company) => company,
        Err(not_found) => return Ok(not_found),
    };

    let template = JobTemplate {
        company: CompanyView::new(&company, q.language().as_ref()),
        job: company.find_job(&slug_job_name).cloned(),
    };
    Ok(Html(template.render().unwrap_or_default()).into_response())
}

/// Active jobs of every visible company.
pub async fn active_jobs(State(state): State<SharedState>) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let companies = db::companies::load_visible(&state.pool).await?;

    let template = JobsTemplate {
        title: "Vacancies".to_string(),
        jobs: companies
            .iter()
            .flat_map(|company| {
                company
                    .active_jobs(now)
                    .map(move |job| JobRow::new(company, job))
            })
            .collect(),
    };
    Ok(Html(template.render().unwrap_or_default()))
}
