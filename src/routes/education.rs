use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::extractor::Admin;
use crate::db;
use crate::education;
use crate::error::AppError;
use crate::models::Exam;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ExamQuery {
    pub course: String,
}

pub async fn list_exams(
    State(state): State<SharedState>,
    Query(q): Query<ExamQuery>,
) -> Result<Json<Vec<Exam>>, AppError> {
    let exams = db::exams::list_by_course(&state.pool, q.course.trim()).await?;
    Ok(Json(exams))
}

fn upload_failed(message: String) -> Response {
    tracing::warn!("Exam upload failed: {message}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false })),
    )
        .into_response()
}

/// Single exam upload with course, date, type and language metadata.
pub async fn upload(
    _admin: Admin,
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let result = match education::parse_exam_upload(&headers, body).await {
        Ok(upload) => education::upload(&state, upload).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(exam) => Json(json!({ "success": true, "exam": exam })).into_response(),
        Err(e) => upload_failed(e),
    }
}

/// Multi-file upload into the temporary area.
pub async fn bulk(
    _admin: Admin,
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let result = match education::parse_bulk_upload(&headers, body).await {
        Ok(files) => education::temp_upload(&state, files).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(files) => Json(json!({ "success": true, "files": files })).into_response(),
        Err(e) => upload_failed(e),
    }
}
