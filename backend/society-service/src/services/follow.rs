/// Follow operations for societies.
///
/// Same idempotent set-membership shape as likes: following twice or
/// unfollowing something never followed both succeed.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::FollowRepository;
use crate::error::{AppError, Result};

/// Result of an idempotent follow/unfollow call.
#[derive(Debug, Clone, Copy)]
pub struct FollowState {
    pub society_id: Uuid,
    pub following: bool,
    pub changed: bool,
}

pub struct FollowService {
    follows: FollowRepository,
}

impl FollowService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            follows: FollowRepository::new(pool),
        }
    }

    pub async fn follow(&self, viewer_id: Uuid, society_id: Uuid) -> Result<FollowState> {
        if !self.follows.society_exists(society_id).await? {
            return Err(AppError::NotFound("society does not exist".to_string()));
        }
        let created = self.follows.create_follow(viewer_id, society_id).await?;
        Ok(FollowState {
            society_id,
            following: true,
            changed: created,
        })
    }

    pub async fn unfollow(&self, viewer_id: Uuid, society_id: Uuid) -> Result<FollowState> {
        if !self.follows.society_exists(society_id).await? {
            return Err(AppError::NotFound("society does not exist".to_string()));
        }
        let deleted = self.follows.delete_follow(viewer_id, society_id).await?;
        Ok(FollowState {
            society_id,
            following: false,
            changed: deleted,
        })
    }
}
