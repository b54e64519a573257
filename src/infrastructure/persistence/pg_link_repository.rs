//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{LinkRecord, NewLink};
use crate::domain::repositories::{CreateOutcome, LinkRepository, StoreError};

/// Row shape shared by every `links` query.
#[derive(Debug, FromRow)]
struct LinkRow {
    code: String,
    original_url: String,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for LinkRecord {
    fn from(row: LinkRow) -> Self {
        LinkRecord::new(row.code, row.original_url, row.created_at)
    }
}

/// PostgreSQL repository for link records.
///
/// The `code` primary key backs the insert-if-absent guarantee:
/// `ON CONFLICT DO NOTHING` makes a lost race visible as an empty `RETURNING`.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn exists(&self, code: &str) -> Result<bool, StoreError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM links WHERE code = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await
                .map_err(map_sqlx_error)?;

        Ok(exists)
    }

    async fn get(&self, code: &str) -> Result<Option<LinkRecord>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, original_url, created_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(LinkRecord::from))
    }

    async fn create(&self, new_link: NewLink) -> Result<CreateOutcome, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, original_url, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (code) DO NOTHING
            RETURNING code, original_url, created_at
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.original_url)
        .bind(new_link.created_at)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(match row {
            Some(row) => CreateOutcome::Created(row.into()),
            None => CreateOutcome::AlreadyExists,
        })
    }
}

/// Splits sqlx errors into connectivity failures and everything else.
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(e.to_string()),
        other => StoreError::Backend(other.to_string()),
    }
}
