//! Exam uploads: single uploads with metadata and bulk uploads into a
//! temporary area for later processing.

use std::path::{Path, PathBuf};

use axum::http::HeaderMap;
use bytes::Bytes;
use chrono::NaiveDate;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::company::Language;
use crate::db;
use crate::models::Exam;
use crate::state::SharedState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamType {
    Exam,
    Summary,
    Answers,
}

impl ExamType {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim() {
            "" | "exam" => Ok(ExamType::Exam),
            "summary" => Ok(ExamType::Summary),
            "answers" => Ok(ExamType::Answers),
            other => Err(format!("Unknown exam type: {other}")),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExamType::Exam => "exam",
            ExamType::Summary => "summary",
            ExamType::Answers => "answers",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct ExamUpload {
    pub course: String,
    pub date: NaiveDate,
    pub exam_type: ExamType,
    pub language: Language,
    pub file: UploadedFile,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    pub original: Option<String>,
    pub stored: String,
}

async fn read_multipart(
    headers: &HeaderMap,
    body: Bytes,
) -> Result<(Vec<(String, String)>, Vec<UploadedFile>), String> {
    let boundary = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| "Missing multipart boundary".to_string())?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut fields = Vec::new();
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        let name = field.name().unwrap_or("unknown").to_string();
        if name == "file" || name == "file[]" {
            let filename = field.file_name().map(|s| s.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| format!("File read error: {e}"))?;
            files.push(UploadedFile { filename, data });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| format!("Field read error: {e}"))?;
            fields.push((name, value));
        }
    }

    Ok((fields, files))
}

pub async fn parse_exam_upload(headers: &HeaderMap, body: Bytes) -> Result<ExamUpload, String> {
    let (fields, mut files) = read_multipart(headers, body).await?;
    let field = |key: &str| {
        fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
            .unwrap_or_default()
    };

    let course = field("course");
    if course.is_empty() {
        return Err("Missing course".to_string());
    }
    let date = NaiveDate::parse_from_str(&field("date"), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date: {e}"))?;
    let exam_type = ExamType::parse(&field("examType"))?;
    let language = match field("language").as_str() {
        "" => Language::parse("en"),
        code => Language::parse(code),
    }
    .map_err(|e| e.to_string())?;

    if files.len() != 1 {
        return Err(format!("Expected exactly one file, got {}", files.len()));
    }

    Ok(ExamUpload {
        course,
        date,
        exam_type,
        language,
        file: files.remove(0),
    })
}

pub async fn parse_bulk_upload(
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Vec<UploadedFile>, String> {
    let (_, files) = read_multipart(headers, body).await?;
    if files.is_empty() {
        return Err("No files uploaded".to_string());
    }
    Ok(files)
}

pub fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF-")
}

/// Content-addressed file name: hex SHA-256 of the bytes plus `.pdf`.
pub fn content_name(data: &[u8]) -> String {
    format!("{}.pdf", hex::encode(Sha256::digest(data)))
}

async fn store(dir: &Path, file: &UploadedFile) -> Result<String, String> {
    if !is_pdf(&file.data) {
        return Err(format!(
            "{} is not a PDF",
            file.filename.as_deref().unwrap_or("upload")
        ));
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;

    let name = content_name(&file.data);
    let path: PathBuf = dir.join(&name);
    tokio::fs::write(&path, &file.data)
        .await
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;

    Ok(name)
}

pub async fn upload(state: &SharedState, upload: ExamUpload) -> Result<Exam, String> {
    let dir = state.config.upload_dir.join("exams");
    let filename = store(&dir, &upload.file).await?;

    let exam = db::exams::create(
        &state.pool,
        &upload.course,
        upload.date,
        upload.exam_type.as_str(),
        upload.language.as_str(),
        &filename,
    )
    .await
    .map_err(|e| format!("Failed to record exam: {e}"))?;

    tracing::info!("Stored exam {} for {}", exam.filename, exam.course);
    Ok(exam)
}

pub async fn temp_upload(
    state: &SharedState,
    files: Vec<UploadedFile>,
) -> Result<Vec<StoredFile>, String> {
    let dir = state.config.upload_dir.join("temp");
    let mut stored = Vec::with_capacity(files.len());
    for file in files {
        let name = store(&dir, &file).await?;
        stored.push(StoredFile {
            original: file.filename,
            stored: name,
        });
    }
    tracing::info!("Stored {} files for bulk processing", stored.len());
    Ok(stored)
}
