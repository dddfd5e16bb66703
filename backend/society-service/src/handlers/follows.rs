/// Follow handlers - idempotent society follow/unfollow endpoints
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::follow::FollowState;
use crate::services::FollowService;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowResponse {
    pub society_id: Uuid,
    pub following: bool,
    pub changed: bool,
}

impl From<FollowState> for FollowResponse {
    fn from(state: FollowState) -> Self {
        Self {
            society_id: state.society_id,
            following: state.following,
            changed: state.changed,
        }
    }
}

/// Follow a society
pub async fn follow_society(
    pool: web::Data<PgPool>,
    society_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = FollowService::new((**pool).clone());
    let state = service.follow(user_id.0, *society_id).await?;

    Ok(HttpResponse::Ok().json(FollowResponse::from(state)))
}

/// Unfollow a society
pub async fn unfollow_society(
    pool: web::Data<PgPool>,
    society_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = FollowService::new((**pool).clone());
    let state = service.unfollow(user_id.0, *society_id).await?;

    Ok(HttpResponse::Ok().json(FollowResponse::from(state)))
}
