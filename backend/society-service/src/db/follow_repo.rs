use sqlx::PgPool;
use uuid::Uuid;

/// Repository for society follow edges.
#[derive(Clone)]
pub struct FollowRepository {
    pool: PgPool,
}

impl FollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Number of societies the viewer currently follows. Read fresh on
    /// every feed request; the nudge advisor must never see a stale count.
    pub async fn count_follows(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM society_follows WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Follow a society (idempotent). Returns true when the edge was created.
    pub async fn create_follow(
        &self,
        user_id: Uuid,
        society_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO society_follows (user_id, society_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, society_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(society_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Unfollow a society (idempotent). Returns true when an edge existed.
    pub async fn delete_follow(
        &self,
        user_id: Uuid,
        society_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM society_follows
            WHERE user_id = $1 AND society_id = $2
            "#,
        )
        .bind(user_id)
        .bind(society_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check that a society exists before writing a follow edge to it.
    pub async fn society_exists(&self, society_id: Uuid) -> Result<bool, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM societies WHERE id = $1)")
                .bind(society_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
