use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Exam;

pub async fn create(
    pool: &PgPool,
    course: &str,
    exam_date: NaiveDate,
    exam_type: &str,
    language: &str,
    filename: &str,
) -> Result<Exam, sqlx::Error> {
    sqlx::query_as::<_, Exam>(
        "INSERT INTO exams (id, course, exam_date, exam_type, language, filename)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(course)
    .bind(exam_date)
    .bind(exam_type)
    .bind(language)
    .bind(filename)
    .fetch_one(pool)
    .await
}

pub async fn list_by_course(pool: &PgPool, course: &str) -> Result<Vec<Exam>, sqlx::Error> {
    sqlx::query_as::<_, Exam>(
        "SELECT * FROM exams WHERE course = $1 ORDER BY exam_date DESC",
    )
    .bind(course)
    .fetch_all(pool)
    .await
}
