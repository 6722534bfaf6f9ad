use sqlx::PgPool;
use uuid::Uuid;

use crate::company::Job;

pub async fn list_by_packet(pool: &PgPool, packet_id: Uuid) -> Result<Vec<Job>, sqlx::Error> {
    sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE packet_id = $1 ORDER BY name ASC")
        .bind(packet_id)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Job>, sqlx::Error> {
    sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, job: &Job) -> Result<Job, sqlx::Error> {
    sqlx::query_as::<_, Job>(
        "INSERT INTO jobs
            (id, packet_id, name, ascii_name, active, website, phone, email, description, language)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
    )
    .bind(job.id)
    .bind(job.packet_id)
    .bind(&job.name)
    .bind(&job.ascii_name)
    .bind(job.active)
    .bind(&job.website)
    .bind(&job.phone)
    .bind(&job.email)
    .bind(&job.description)
    .bind(&job.language)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, job: &Job) -> Result<Job, sqlx::Error> {
    sqlx::query_as::<_, Job>(
        "UPDATE jobs SET name = $2, ascii_name = $3, active = $4, website = $5,
            phone = $6, email = $7, description = $8, language = $9
         WHERE id = $1 RETURNING *",
    )
    .bind(job.id)
    .bind(&job.name)
    .bind(&job.ascii_name)
    .bind(job.active)
    .bind(&job.website)
    .bind(&job.phone)
    .bind(&job.email)
    .bind(&job.description)
    .bind(&job.language)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
