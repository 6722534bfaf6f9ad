use askama::Template;
use axum::response::{Html, IntoResponse};

use crate::auth::extractor::Admin;

#[derive(Template)]
#[template(path = "education/upload.html")]
struct UploadTemplate {
    exam_types: Vec<&'static str>,
}

#[derive(Template)]
#[template(path = "education/bulk.html")]
struct BulkTemplate;

pub async fn upload_page(_admin: Admin) -> impl IntoResponse {
    let template = UploadTemplate {
        exam_types: vec!["exam", "summary", "answers"],
    };
    Html(template.render().unwrap_or_default())
}

pub async fn bulk_page(_admin: Admin) -> impl IntoResponse {
    Html(BulkTemplate.render().unwrap_or_default())
}
