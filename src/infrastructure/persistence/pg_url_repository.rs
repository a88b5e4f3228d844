//! PostgreSQL implementation of the url repository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{NewUrl, UrlMapping};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

const URL_COLUMNS: &str = "id, original_url, custom_alias, created_at, is_active, click_count";

/// PostgreSQL repository for the `urls` table.
///
/// Queries are bound at runtime so builds do not need a live database.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn map_url_row(row: &PgRow) -> Result<UrlMapping, sqlx::Error> {
    Ok(UrlMapping {
        id: row.try_get("id")?,
        original_url: row.try_get("original_url")?,
        custom_alias: row.try_get("custom_alias")?,
        created_at: row.try_get("created_at")?,
        is_active: row.try_get("is_active")?,
        click_count: row.try_get("click_count")?,
    })
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_url: NewUrl) -> Result<UrlMapping, AppError> {
        let sql = format!(
            "INSERT INTO urls (original_url, custom_alias) VALUES ($1, $2) RETURNING {URL_COLUMNS}"
        );

        let row = sqlx::query(&sql)
            .bind(&new_url.original_url)
            .bind(&new_url.custom_alias)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(map_url_row(&row)?)
    }

    async fn find_active_by_alias(&self, alias: &str) -> Result<Option<UrlMapping>, AppError> {
        let sql = format!("SELECT {URL_COLUMNS} FROM urls WHERE custom_alias = $1 AND is_active");

        let row = sqlx::query(&sql)
            .bind(alias)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.as_ref().map(map_url_row).transpose()?)
    }

    async fn find_active_by_id(&self, id: i64) -> Result<Option<UrlMapping>, AppError> {
        let sql = format!("SELECT {URL_COLUMNS} FROM urls WHERE id = $1 AND is_active");

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.as_ref().map(map_url_row).transpose()?)
    }

    async fn alias_exists(&self, alias: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM urls WHERE custom_alias = $1)")
                .bind(alias)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn id_exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM urls WHERE id = $1)")
            .bind(id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }

    async fn increment_click_count(&self, id: i64) -> Result<Option<i64>, AppError> {
        // Single atomic statement; concurrent redirects never lose updates.
        let count: Option<i64> = sqlx::query_scalar(
            "UPDATE urls SET click_count = click_count + 1 \
             WHERE id = $1 AND is_active RETURNING click_count",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn deactivate(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE urls SET is_active = FALSE WHERE id = $1 AND is_active")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
