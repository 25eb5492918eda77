use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::models::profile::{ProfileChanges, ResumeProfile};
use crate::profile::service::ProfileError;

/// Storage for the owner profile row.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<Option<ResumeProfile>, ProfileError>;

    /// Inserts the row or updates only the fields present in `changes`.
    async fn upsert(
        &self,
        id: &str,
        changes: &ProfileChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<(), ProfileError>;
}

pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn fetch(&self, id: &str) -> Result<Option<ResumeProfile>, ProfileError> {
        Ok(sqlx::query_as::<_, ResumeProfile>(
            r#"
            SELECT id,
                   COALESCE(linkedin, '')    AS linkedin,
                   COALESCE(github, '')      AS github,
                   image_url,
                   COALESCE(resume_url, '')  AS resume_url,
                   COALESCE(resume_text, '') AS resume_text,
                   updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn upsert(
        &self,
        id: &str,
        changes: &ProfileChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<(), ProfileError> {
        sqlx::query(
            r#"
            INSERT INTO profiles
                (id, linkedin, github, image_url, resume_url, resume_text, updated_at)
            VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), $4,
                    COALESCE($5, ''), COALESCE($6, ''), $7)
            ON CONFLICT (id) DO UPDATE SET
                linkedin    = COALESCE($2, profiles.linkedin),
                github      = COALESCE($3, profiles.github),
                image_url   = COALESCE($4, profiles.image_url),
                resume_url  = COALESCE($5, profiles.resume_url),
                resume_text = COALESCE($6, profiles.resume_text),
                updated_at  = $7
            "#,
        )
        .bind(id)
        .bind(changes.linkedin.as_deref())
        .bind(changes.github.as_deref())
        .bind(changes.image_url.as_deref())
        .bind(changes.resume_url.as_deref())
        .bind(changes.resume_text.as_deref())
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        info!("Upserted profile {id}");
        Ok(())
    }
}
