use sqlx::PgPool;
use uuid::Uuid;

/// Repository for Like operations
///
/// The unique (user_id, post_id) constraint is the only synchronization
/// primitive: concurrent like/unlike from the same user converge because
/// both writes are set-membership operations on that key.
#[derive(Clone)]
pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a like (idempotent - success if already present).
    /// Increments the post's denormalized like_count only when a row was
    /// actually inserted. Returns true when this call created the like.
    pub async fn create_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO likes (user_id, post_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, post_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

        let created = result.rows_affected() > 0;

        if created {
            sqlx::query("UPDATE posts SET like_count = like_count + 1 WHERE id = $1")
                .bind(post_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(created)
    }

    /// Delete a like (idempotent - success if absent).
    /// Decrements like_count clamped at zero when a row was removed.
    pub async fn delete_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            DELETE FROM likes
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

        let deleted = result.rows_affected() > 0;

        if deleted {
            sqlx::query("UPDATE posts SET like_count = GREATEST(like_count - 1, 0) WHERE id = $1")
                .bind(post_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(deleted)
    }

    /// Check if user has liked a post. Row presence is the sole source
    /// of truth for the viewer's like state.
    pub async fn check_user_liked(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM likes
                WHERE user_id = $1 AND post_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
