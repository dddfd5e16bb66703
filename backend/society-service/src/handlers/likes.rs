/// Like handlers - idempotent like/unlike endpoints
///
/// Repeated calls converge: liking twice or unliking something never
/// liked both return 200 with the resulting state, never an error.
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::engagement::LikeState;
use crate::services::EngagementService;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub post_id: Uuid,
    pub liked: bool,
    pub changed: bool,
}

impl From<LikeState> for LikeResponse {
    fn from(state: LikeState) -> Self {
        Self {
            post_id: state.post_id,
            liked: state.liked,
            changed: state.changed,
        }
    }
}

/// Like a post
pub async fn like_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = EngagementService::new((**pool).clone());
    let state = service.like(*post_id, user_id.0).await?;

    Ok(HttpResponse::Ok().json(LikeResponse::from(state)))
}

/// Remove a like from a post
pub async fn unlike_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = EngagementService::new((**pool).clone());
    let state = service.unlike(*post_id, user_id.0).await?;

    Ok(HttpResponse::Ok().json(LikeResponse::from(state)))
}
