/// Comment handlers - HTTP endpoints for comment operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::{Capabilities, UserId};
use crate::services::EngagementService;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Create a new comment on a post
pub async fn create_comment(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let service = EngagementService::new((**pool).clone());
    let comment = service.add_comment(*post_id, user_id.0, &req.content).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Get comments for a post
pub async fn get_post_comments(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let service = EngagementService::new((**pool).clone());
    let comments = service
        .list_comments(*post_id, query.limit.clamp(1, 100), query.offset.max(0))
        .await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Delete a comment (author or moderator)
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user_id: UserId,
    caps: Capabilities,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let service = EngagementService::new((**pool).clone());
    service
        .delete_comment(post_id, comment_id, user_id.0, caps.moderator)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
