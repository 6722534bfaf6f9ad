use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::company::CompanyPacket;

pub async fn list_by_company(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<CompanyPacket>, sqlx::Error> {
    sqlx::query_as::<_, CompanyPacket>(
        "SELECT * FROM company_packets WHERE company_id = $1 ORDER BY starts ASC",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}

/// Unpublish packets whose expiration instant (00:00 UTC) lies before `now`.
/// Only the flag is written, so concurrent edits to the window are kept.
pub async fn unpublish_expired(
    pool: &PgPool,
    now: DateTime<Utc>,
) -> Result<Vec<CompanyPacket>, sqlx::Error> {
    sqlx::query_as::<_, CompanyPacket>(
        "UPDATE company_packets SET published = FALSE
         WHERE published AND (expires::timestamp AT TIME ZONE 'UTC') < $1
         RETURNING *",
    )
    .bind(now)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<CompanyPacket>, sqlx::Error> {
    sqlx::query_as::<_, CompanyPacket>("SELECT * FROM company_packets WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, packet: &CompanyPacket) -> Result<CompanyPacket, sqlx::Error> {
    sqlx::query_as::<_, CompanyPacket>(
        "INSERT INTO company_packets (id, company_id, starts, expires, published)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(packet.id)
    .bind(packet.company_id)
    .bind(packet.starts)
    .bind(packet.expires)
    .bind(packet.published)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, packet: &CompanyPacket) -> Result<CompanyPacket, sqlx::Error> {
    sqlx::query_as::<_, CompanyPacket>(
        "UPDATE company_packets SET starts = $2, expires = $3, published = $4
         WHERE id = $1 RETURNING *",
    )
    .bind(packet.id)
    .bind(packet.starts)
    .bind(packet.expires)
    .bind(packet.published)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM company_packets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
