use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::companies::{find_unique, CompanyResponse};
use super::{flat_body, typed_body};
use crate::auth::extractor::Admin;
use crate::company::slug::{slugify, validate_slug};
use crate::company::{
    Company, CompanyForm, CompanyPacket, Job, JobForm, Language, PacketForm,
};
use crate::db;
use crate::error::AppError;
use crate::middleware::audit::{self, Actor};
use crate::models::AuditEvent;
use crate::state::SharedState;
use crate::worker;

fn slug_conflict(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A company with this slug already exists".to_string())
        }
        _ => AppError::Database(e),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn create_company(
    _admin: Admin,
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CompanyResponse>, AppError> {
    let data = flat_body(&headers, &body)?;
    let form = CompanyForm::from_flat(&data)?;

    let name = non_empty(form.name.clone())
        .ok_or_else(|| AppError::BadRequest("Name is required".to_string()))?;
    let slug = non_empty(form.slug_name.clone()).unwrap_or_else(|| slugify(&name));
    validate_slug(&slug)?;

    let mut company = Company::new(&name, &slug);
    let dropped = company.exchange(CompanyForm {
        slug_name: Some(slug),
        ..form
    });

    db::companies::save(&state.pool, &company, &dropped)
        .await
        .map_err(slug_conflict)?;

    audit::log_event(
        &state.pool,
        Actor::Admin,
        "company.created",
        "company",
        Some(company.id),
        Some(json!({ "slug_name": company.slug_name })),
    )
    .await;

    match state.company_email.clone() {
        Some(mailer) if !company.email.is_empty() => {
            let company = company.clone();
            tokio::spawn(async move {
                if let Err(e) = mailer.send_register_email(&company).await {
                    tracing::warn!("Failed to send registration email: {e}");
                }
            });
        }
        Some(_) => tracing::debug!("Company {} has no email, skipping mail", company.slug_name),
        None => tracing::debug!("SMTP not configured, skipping registration email"),
    }

    Ok(Json(company.into()))
}

/// Flat snapshot of a company for form binding.
pub async fn company_form(
    _admin: Admin,
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Result<Json<Map<String, Value>>, AppError> {
    let company = find_unique(&state.pool, &slug).await?;
    Ok(Json(company.to_flat()))
}

pub async fn update_company(
    _admin: Admin,
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CompanyResponse>, AppError> {
    let mut company = find_unique(&state.pool, &slug).await?;
    let data = flat_body(&headers, &body)?;
    let form = CompanyForm::from_flat(&data)?;

    if let Some(new_slug) = &form.slug_name {
        validate_slug(new_slug)?;
    }
    if form.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::BadRequest("Name cannot be empty".to_string()));
    }

    let dropped = company.exchange(form);
    db::companies::save(&state.pool, &company, &dropped)
        .await
        .map_err(slug_conflict)?;

    let removed: Vec<&str> = dropped.iter().map(|t| t.language.as_str()).collect();
    audit::log_event(
        &state.pool,
        Actor::Admin,
        "company.updated",
        "company",
        Some(company.id),
        Some(json!({ "removed_languages": removed })),
    )
    .await;

    Ok(Json(company.into()))
}

pub async fn delete_company(
    _admin: Admin,
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    let company = find_unique(&state.pool, &slug).await?;
    db::companies::delete(&state.pool, company.id).await?;

    audit::log_event(
        &state.pool,
        Actor::Admin,
        "company.deleted",
        "company",
        Some(company.id),
        Some(json!({ "slug_name": company.slug_name })),
    )
    .await;

    Ok(Json(json!({ "message": "Deleted" })))
}

pub async fn create_packet(
    _admin: Admin,
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CompanyPacket>, AppError> {
    let company = find_unique(&state.pool, &slug).await?;
    let form: PacketForm = typed_body(&headers, &body)?;

    let (Some(starts), Some(expires)) = (form.starts, form.expires) else {
        return Err(AppError::BadRequest(
            "starts and expires are required".to_string(),
        ));
    };
    let mut packet = CompanyPacket::new(company.id, starts, expires)?;
    packet.published = form.published.unwrap_or(false);

    let packet = db::packets::create(&state.pool, &packet).await?;

    audit::log_event(
        &state.pool,
        Actor::Admin,
        "packet.created",
        "packet",
        Some(packet.id),
        Some(json!({ "company_id": company.id })),
    )
    .await;

    Ok(Json(packet))
}

pub async fn update_packet(
    _admin: Admin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CompanyPacket>, AppError> {
    let mut packet = db::packets::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Packet not found".to_string()))?;
    let form: PacketForm = typed_body(&headers, &body)?;

    packet.exchange(form)?;
    let packet = db::packets::update(&state.pool, &packet).await?;

    audit::log_event(
        &state.pool,
        Actor::Admin,
        "packet.updated",
        "packet",
        Some(packet.id),
        None,
    )
    .await;

    Ok(Json(packet))
}

pub async fn delete_packet(
    _admin: Admin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    db::packets::delete(&state.pool, id).await?;
    audit::log_event(&state.pool, Actor::Admin, "packet.deleted", "packet", Some(id), None).await;
    Ok(Json(json!({ "message": "Deleted" })))
}

/// Run one expiry sweep immediately.
pub async fn expire_packets(
    _admin: Admin,
    State(state): State<SharedState>,
) -> Result<Json<Value>, AppError> {
    let expired = worker::sweep_expired(&state.pool, Utc::now()).await?;
    Ok(Json(json!({ "expired": expired })))
}

pub async fn create_job(
    _admin: Admin,
    State(state): State<SharedState>,
    Path(packet_id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Job>, AppError> {
    let packet = db::packets::find_by_id(&state.pool, packet_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Packet not found".to_string()))?;
    let form: JobForm = typed_body(&headers, &body)?;

    let language = match form.language.clone() {
        Some(language) => language,
        None => Language::parse("en")?,
    };
    let mut job = Job::new(packet.id, language);
    job.exchange(form);
    validate_job(&job)?;

    let job = db::jobs::create(&state.pool, &job).await?;

    audit::log_event(
        &state.pool,
        Actor::Admin,
        "job.created",
        "job",
        Some(job.id),
        Some(json!({ "packet_id": packet.id })),
    )
    .await;

    Ok(Json(job))
}

pub async fn update_job(
    _admin: Admin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Job>, AppError> {
    let mut job = db::jobs::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    let form: JobForm = typed_body(&headers, &body)?;

    job.exchange(form);
    validate_job(&job)?;
    let job = db::jobs::update(&state.pool, &job).await?;

    audit::log_event(&state.pool, Actor::Admin, "job.updated", "job", Some(job.id), None).await;

    Ok(Json(job))
}

pub async fn delete_job(
    _admin: Admin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    db::jobs::delete(&state.pool, id).await?;
    audit::log_event(&state.pool, Actor::Admin, "job.deleted", "job", Some(id), None).await;
    Ok(Json(json!({ "message": "Deleted" })))
}

fn validate_job(job: &Job) -> Result<(), AppError> {
    if job.name.trim().is_empty() {
        return Err(AppError::BadRequest("Job name is required".to_string()));
    }
    validate_slug(&job.ascii_name)?;
    Ok(())
}

#[derive(Deserialize)]
pub struct AuditQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn audit_log(
    _admin: Admin,
    State(state): State<SharedState>,
    Query(q): Query<AuditQuery>,
) -> Result<Json<Vec<AuditEvent>>, AppError> {
    let limit = q.limit.unwrap_or(50).clamp(1, 500);
    let offset = q.offset.unwrap_or(0).max(0);
    let events = db::audit::list(&state.pool, limit, offset).await?;
    Ok(Json(events))
}
