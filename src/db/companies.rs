use sqlx::PgPool;
use uuid::Uuid;

use crate::company::{Company, CompanyI18n};
use crate::db;

pub async fn list_visible(pool: &PgPool) -> Result<Vec<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        "SELECT * FROM companies WHERE hidden = FALSE ORDER BY name ASC",
    )
    .fetch_all(pool)
    .await
}

/// All companies with this slug. The unique index makes this zero or one row,
/// callers still treat anything but one as not found.
pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Vec<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE slug_name = $1")
        .bind(slug)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_translations(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<CompanyI18n>, sqlx::Error> {
    sqlx::query_as::<_, CompanyI18n>(
        "SELECT * FROM company_i18n WHERE company_id = $1 ORDER BY language ASC",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}

/// Attach translations, packets and their jobs to a bare company row.
pub async fn load(pool: &PgPool, mut company: Company) -> Result<Company, sqlx::Error> {
    for translation in list_translations(pool, company.id).await? {
        company.add_translation(translation);
    }

    for mut packet in db::packets::list_by_company(pool, company.id).await? {
        packet.jobs = db::jobs::list_by_packet(pool, packet.id).await?;
        company.add_packet(packet);
    }

    Ok(company)
}

pub async fn load_visible(pool: &PgPool) -> Result<Vec<Company>, sqlx::Error> {
    let mut companies = Vec::new();
    for company in list_visible(pool).await? {
        companies.push(load(pool, company).await?);
    }
    Ok(companies)
}

/// Persist the company row and its translation set in one transaction.
/// `dropped` are translations removed by the last exchange.
pub async fn save(
    pool: &PgPool,
    company: &Company,
    dropped: &[CompanyI18n],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO companies (id, name, slug_name, address, email, phone, hidden)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         ON CONFLICT (id) DO UPDATE SET
            name = EXCLUDED.name,
            slug_name = EXCLUDED.slug_name,
            address = EXCLUDED.address,
            email = EXCLUDED.email,
            phone = EXCLUDED.phone,
            hidden = EXCLUDED.hidden,
            updated_at = now()",
    )
    .bind(company.id)
    .bind(&company.name)
    .bind(&company.slug_name)
    .bind(&company.address)
    .bind(&company.email)
    .bind(&company.phone)
    .bind(company.hidden)
    .execute(&mut *tx)
    .await?;

    for translation in dropped {
        sqlx::query("DELETE FROM company_i18n WHERE company_id = $1 AND language = $2")
            .bind(company.id)
            .bind(&translation.language)
            .execute(&mut *tx)
            .await?;
    }

    for translation in company.translations.values() {
        let f = &translation.fields;
        sqlx::query(
            "INSERT INTO company_i18n
                (company_id, language, slogan, website, description, logo,
                 name, slug_name, address, email, phone)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             ON CONFLICT (company_id, language) DO UPDATE SET
                slogan = EXCLUDED.slogan,
                website = EXCLUDED.website,
                description = EXCLUDED.description,
                logo = EXCLUDED.logo,
                name = EXCLUDED.name,
                slug_name = EXCLUDED.slug_name,
                address = EXCLUDED.address,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone",
        )
        .bind(company.id)
        .bind(&translation.language)
        .bind(&f.slogan)
        .bind(&f.website)
        .bind(&f.description)
        .bind(&f.logo)
        .bind(&f.name)
        .bind(&f.slug_name)
        .bind(&f.address)
        .bind(&f.email)
        .bind(&f.phone)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM companies WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
