use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Exam {
    pub id: Uuid,
    pub course: String,
    pub exam_date: NaiveDate,
    pub exam_type: String,
    pub language: String,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}
