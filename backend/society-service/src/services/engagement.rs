/// Engagement operations: like/unlike, comments, post edit and delete.
///
/// Every operation is a stateless request handler over the store. Likes
/// and unlikes are idempotent set-membership writes, so retries and
/// same-user races converge without extra locking. Failures use the
/// shared taxonomy so the client can render distinct copy for not-found,
/// forbidden, validation, and expired-edit-window outcomes.
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::db::{CommentRepository, FollowRepository, LikeRepository, PostRepository};
use crate::error::{AppError, Result};
use crate::models::{Comment, Post};

/// Authors may edit their post for this long after creation.
pub const EDIT_WINDOW_SECONDS: i64 = 15 * 60;

/// Outcome of the pure edit check, before any store write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditDecision {
    /// Text differs and the window is open: apply the update.
    Apply,
    /// Resubmitted text is identical: succeed without a state change,
    /// so repeated submits do not inflate the edit counter.
    Noop,
}

/// Decide whether `actor` may edit `post` to `new_text` at `now`.
///
/// Order matters for messaging: a non-author is `FORBIDDEN` regardless of
/// elapsed time, and only the author can see `EDIT_WINDOW_EXPIRED`.
pub fn check_edit(
    post: &Post,
    actor_id: Uuid,
    new_text: &str,
    now: DateTime<Utc>,
) -> Result<EditDecision> {
    if post.author_id != actor_id {
        return Err(AppError::Forbidden(
            "only the author may edit a post".to_string(),
        ));
    }
    if new_text.trim().is_empty() {
        return Err(AppError::Validation(
            "post text must not be empty".to_string(),
        ));
    }
    if now - post.created_at > Duration::seconds(EDIT_WINDOW_SECONDS) {
        return Err(AppError::EditWindowExpired(
            "posts can only be edited within 15 minutes of publishing".to_string(),
        ));
    }
    if new_text == post.content {
        return Ok(EditDecision::Noop);
    }
    Ok(EditDecision::Apply)
}

/// Outcome of the pure comment-delete check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentDeleteDecision {
    /// The row exists and the actor may remove it.
    Delete,
    /// The row is already gone: success without a state change, so
    /// retries and duplicate deletes converge instead of erroring.
    AlreadyGone,
}

/// Decide the outcome of deleting `comment` (`None` when the row is
/// already absent). Authorization only applies to a row that still
/// exists; deleting into the target state is never an error.
pub fn check_comment_delete(
    comment: Option<&Comment>,
    actor_id: Uuid,
    moderator: bool,
) -> Result<CommentDeleteDecision> {
    let Some(comment) = comment else {
        return Ok(CommentDeleteDecision::AlreadyGone);
    };
    if comment.author_id != actor_id && !moderator {
        return Err(AppError::Forbidden(
            "only the comment author may delete it".to_string(),
        ));
    }
    Ok(CommentDeleteDecision::Delete)
}

/// Result of an idempotent like/unlike call.
#[derive(Debug, Clone, Copy)]
pub struct LikeState {
    pub post_id: Uuid,
    pub liked: bool,
    /// Whether this call changed anything. Repeated calls converge to the
    /// same state and still report success.
    pub changed: bool,
}

pub struct EngagementService {
    posts: PostRepository,
    likes: LikeRepository,
    comments: CommentRepository,
    follows: FollowRepository,
}

impl EngagementService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            posts: PostRepository::new(pool.clone()),
            likes: LikeRepository::new(pool.clone()),
            comments: CommentRepository::new(pool.clone()),
            follows: FollowRepository::new(pool),
        }
    }

    /// Publish a new post to a society.
    pub async fn create_post(
        &self,
        society_id: Uuid,
        author_id: Uuid,
        content: &str,
        media_url: Option<&str>,
        link_url: Option<&str>,
    ) -> Result<Post> {
        if content.trim().is_empty() {
            return Err(AppError::Validation(
                "post text must not be empty".to_string(),
            ));
        }
        if !self.follows.society_exists(society_id).await? {
            return Err(AppError::NotFound("society does not exist".to_string()));
        }

        let post = self
            .posts
            .create_post(society_id, author_id, content, media_url, link_url)
            .await?;
        info!(post_id = %post.id, %society_id, "post created");
        Ok(post)
    }

    /// Fetch a single post.
    pub async fn get_post(&self, post_id: Uuid) -> Result<Post> {
        self.posts
            .find_post_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post does not exist".to_string()))
    }

    /// Whether `actor` has liked the post. Presence of the like row is
    /// the sole source of truth for the viewer's like state.
    pub async fn has_liked(&self, post_id: Uuid, actor_id: Uuid) -> Result<bool> {
        Ok(self.likes.check_user_liked(actor_id, post_id).await?)
    }

    /// Like a post. Already-liked is a success, never an error.
    pub async fn like(&self, post_id: Uuid, actor_id: Uuid) -> Result<LikeState> {
        self.get_post(post_id).await?;
        let created = self.likes.create_like(actor_id, post_id).await?;
        Ok(LikeState {
            post_id,
            liked: true,
            changed: created,
        })
    }

    /// Remove a like. A like that was never there is a success too.
    pub async fn unlike(&self, post_id: Uuid, actor_id: Uuid) -> Result<LikeState> {
        self.get_post(post_id).await?;
        let deleted = self.likes.delete_like(actor_id, post_id).await?;
        Ok(LikeState {
            post_id,
            liked: false,
            changed: deleted,
        })
    }

    /// Add a comment and bump the post's comment count.
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        actor_id: Uuid,
        text: &str,
    ) -> Result<Comment> {
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "comment text must not be empty".to_string(),
            ));
        }
        self.get_post(post_id).await?;
        let comment = self.comments.create_comment(post_id, actor_id, text).await?;
        Ok(comment)
    }

    /// List comments on a post, newest-first.
    pub async fn list_comments(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>> {
        self.get_post(post_id).await?;
        Ok(self
            .comments
            .list_post_comments(post_id, limit, offset)
            .await?)
    }

    /// Delete a comment. Allowed for its author or a moderator. An
    /// already-gone comment is a success, not an error, so duplicate
    /// deletes converge; the parent's comment count decrements exactly
    /// once because the losing delete matches zero rows.
    pub async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        actor_id: Uuid,
        moderator: bool,
    ) -> Result<()> {
        let comment = self
            .comments
            .find_comment_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id);

        match check_comment_delete(comment.as_ref(), actor_id, moderator)? {
            CommentDeleteDecision::AlreadyGone => Ok(()),
            CommentDeleteDecision::Delete => {
                self.comments.delete_comment(comment_id, post_id).await?;
                Ok(())
            }
        }
    }

    /// Edit a post within the 15-minute window. Identical text is a no-op
    /// success; the edit counter only advances on real changes.
    pub async fn edit_post(&self, post_id: Uuid, actor_id: Uuid, new_text: &str) -> Result<Post> {
        let post = self.get_post(post_id).await?;

        match check_edit(&post, actor_id, new_text, Utc::now())? {
            EditDecision::Noop => Ok(post),
            EditDecision::Apply => {
                let updated = self.posts.update_content(post_id, new_text).await?;
                info!(%post_id, edit_count = updated.edit_count, "post edited");
                Ok(updated)
            }
        }
    }

    /// Delete a post. Allowed for its author or a moderator; dependent
    /// likes and comments are removed by the store cascade.
    pub async fn delete_post(&self, post_id: Uuid, actor_id: Uuid, moderator: bool) -> Result<()> {
        let post = self.get_post(post_id).await?;

        if post.author_id != actor_id && !moderator {
            return Err(AppError::Forbidden(
                "only the author may delete a post".to_string(),
            ));
        }

        self.posts.delete_post(post_id).await?;
        info!(%post_id, "post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(author_id: Uuid, created_at: DateTime<Utc>) -> Post {
        Post {
            id: Uuid::new_v4(),
            society_id: Uuid::new_v4(),
            author_id,
            content: "original text".to_string(),
            media_url: None,
            link_url: None,
            like_count: 0,
            comment_count: 0,
            edit_count: 0,
            edited_at: None,
            created_at,
        }
    }

    #[test]
    fn author_can_edit_just_inside_the_window() {
        let author = Uuid::new_v4();
        let created = Utc::now();
        let p = post(author, created);
        let at = created + Duration::seconds(14 * 60 + 59);
        assert_eq!(
            check_edit(&p, author, "new text", at).unwrap(),
            EditDecision::Apply
        );
    }

    #[test]
    fn edit_fails_just_outside_the_window() {
        let author = Uuid::new_v4();
        let created = Utc::now();
        let p = post(author, created);
        let at = created + Duration::seconds(15 * 60 + 1);
        let err = check_edit(&p, author, "new text", at).unwrap_err();
        assert_eq!(err.code(), "EDIT_WINDOW_EXPIRED");
    }

    #[test]
    fn exactly_at_the_window_is_still_allowed() {
        let author = Uuid::new_v4();
        let created = Utc::now();
        let p = post(author, created);
        let at = created + Duration::seconds(15 * 60);
        assert_eq!(
            check_edit(&p, author, "new text", at).unwrap(),
            EditDecision::Apply
        );
    }

    #[test]
    fn non_author_is_forbidden_even_inside_the_window() {
        let p = post(Uuid::new_v4(), Utc::now());
        let stranger = Uuid::new_v4();
        let err = check_edit(&p, stranger, "new text", p.created_at).unwrap_err();
        assert_eq!(err.code(), "FORBIDDEN");

        // And still forbidden, not window-expired, long after.
        let late = p.created_at + Duration::hours(2);
        let err = check_edit(&p, stranger, "new text", late).unwrap_err();
        assert_eq!(err.code(), "FORBIDDEN");
    }

    #[test]
    fn identical_text_is_a_noop_not_an_error() {
        let author = Uuid::new_v4();
        let p = post(author, Utc::now());
        let decision = check_edit(&p, author, "original text", p.created_at).unwrap();
        assert_eq!(decision, EditDecision::Noop);
    }

    fn comment(author_id: Uuid) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            post_id: Uuid::new_v4(),
            author_id,
            content: "nice one".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn deleting_an_already_gone_comment_is_a_success() {
        // Sequential duplicate deletes converge on the same state; the
        // second call must not surface an error to the user.
        let decision = check_comment_delete(None, Uuid::new_v4(), false).unwrap();
        assert_eq!(decision, CommentDeleteDecision::AlreadyGone);
    }

    #[test]
    fn author_and_moderator_may_delete_an_existing_comment() {
        let author = Uuid::new_v4();
        let c = comment(author);
        assert_eq!(
            check_comment_delete(Some(&c), author, false).unwrap(),
            CommentDeleteDecision::Delete
        );
        assert_eq!(
            check_comment_delete(Some(&c), Uuid::new_v4(), true).unwrap(),
            CommentDeleteDecision::Delete
        );
    }

    #[test]
    fn stranger_deleting_an_existing_comment_is_forbidden() {
        // Authorization only applies while the row exists: an existing
        // comment defends itself, a gone one does not need to.
        let c = comment(Uuid::new_v4());
        let err = check_comment_delete(Some(&c), Uuid::new_v4(), false).unwrap_err();
        assert_eq!(err.code(), "FORBIDDEN");
    }

    #[test]
    fn empty_replacement_text_is_rejected() {
        let author = Uuid::new_v4();
        let p = post(author, Utc::now());
        let err = check_edit(&p, author, "   \n", p.created_at).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }
}
