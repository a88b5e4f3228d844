//! PostgreSQL implementation of the click log.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for the append-only `clicks` table.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record(&self, click: NewClick) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO clicks (url_id, ip_address, user_agent, referer) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(click.url_id)
        .bind(&click.ip_address)
        .bind(&click.user_agent)
        .bind(&click.referer)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
