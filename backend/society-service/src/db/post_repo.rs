use crate::models::Post;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for post rows and the two feed streams.
///
/// Feed reads use keyset pagination on `(created_at, id)` descending; a
/// position taken from a since-deleted post still decodes into a valid
/// filter and simply matches nothing.
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new post for a society.
    pub async fn create_post(
        &self,
        society_id: Uuid,
        author_id: Uuid,
        content: &str,
        media_url: Option<&str>,
        link_url: Option<&str>,
    ) -> Result<Post, sqlx::Error> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (society_id, author_id, content, media_url, link_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, society_id, author_id, content, media_url, link_url,
                      like_count, comment_count, edit_count, edited_at, created_at
            "#,
        )
        .bind(society_id)
        .bind(author_id)
        .bind(content)
        .bind(media_url)
        .bind(link_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// Find a post by ID
    pub async fn find_post_by_id(&self, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, society_id, author_id, content, media_url, link_url,
                   like_count, comment_count, edit_count, edited_at, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// Replace a post's text, stamping the edit timestamp and counter.
    /// Authorization and edit-window checks happen in the service layer.
    pub async fn update_content(&self, post_id: Uuid, content: &str) -> Result<Post, sqlx::Error> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET content = $1, edited_at = NOW(), edit_count = edit_count + 1
            WHERE id = $2
            RETURNING id, society_id, author_id, content, media_url, link_url,
                      like_count, comment_count, edit_count, edited_at, created_at
            "#,
        )
        .bind(content)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// Hard delete a post. Likes and comments go with it via FK cascade.
    pub async fn delete_post(&self, post_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Followed stream: posts from societies the viewer follows,
    /// newest-first, strictly after `after` in feed order.
    pub async fn list_followed(
        &self,
        viewer_id: Uuid,
        after: Option<(DateTime<Utc>, Uuid)>,
        limit: i64,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let (after_ts, after_id) = split_position(after);
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT p.id, p.society_id, p.author_id, p.content, p.media_url, p.link_url,
                   p.like_count, p.comment_count, p.edit_count, p.edited_at, p.created_at
            FROM posts p
            INNER JOIN society_follows f
                ON f.society_id = p.society_id AND f.user_id = $1
            WHERE ($2::timestamptz IS NULL
                   OR p.created_at < $2
                   OR (p.created_at = $2 AND p.id < $3))
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $4
            "#,
        )
        .bind(viewer_id)
        .bind(after_ts)
        .bind(after_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// Discovery stream: posts from societies the viewer does not follow,
    /// newest-first, strictly after `after` in feed order.
    pub async fn list_discovery(
        &self,
        viewer_id: Uuid,
        after: Option<(DateTime<Utc>, Uuid)>,
        limit: i64,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let (after_ts, after_id) = split_position(after);
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT p.id, p.society_id, p.author_id, p.content, p.media_url, p.link_url,
                   p.like_count, p.comment_count, p.edit_count, p.edited_at, p.created_at
            FROM posts p
            WHERE NOT EXISTS (
                    SELECT 1 FROM society_follows f
                    WHERE f.user_id = $1 AND f.society_id = p.society_id
                  )
              AND ($2::timestamptz IS NULL
                   OR p.created_at < $2
                   OR (p.created_at = $2 AND p.id < $3))
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $4
            "#,
        )
        .bind(viewer_id)
        .bind(after_ts)
        .bind(after_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }
}

fn split_position(after: Option<(DateTime<Utc>, Uuid)>) -> (Option<DateTime<Utc>>, Option<Uuid>) {
    match after {
        Some((ts, id)) => (Some(ts), Some(id)),
        None => (None, None),
    }
}
