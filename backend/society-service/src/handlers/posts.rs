/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::{Capabilities, UserId};
use crate::models::Post;
use crate::services::EngagementService;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub society_id: Uuid,
    pub content: String,
    pub media_url: Option<String>,
    pub link_url: Option<String>,
}

/// Create a new post in a society
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let service = EngagementService::new((**pool).clone());
    let post = service
        .create_post(
            req.society_id,
            user_id.0,
            &req.content,
            req.media_url.as_deref(),
            req.link_url.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// A post read through the API, annotated with the viewer's like state.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    #[serde(flatten)]
    pub post: Post,
    pub liked: bool,
}

/// Get a post by ID, with whether the viewer has liked it
pub async fn get_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = EngagementService::new((**pool).clone());
    let post = service.get_post(*post_id).await?;
    let liked = service.has_liked(*post_id, user_id.0).await?;

    Ok(HttpResponse::Ok().json(PostResponse { post, liked }))
}

#[derive(Debug, Deserialize)]
pub struct EditPostRequest {
    pub content: String,
}

/// Edit a post's text. Author-only, and only within 15 minutes of
/// creation; outside the window the response carries the distinct
/// EDIT_WINDOW_EXPIRED code.
pub async fn edit_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
    req: web::Json<EditPostRequest>,
) -> Result<HttpResponse> {
    let service = EngagementService::new((**pool).clone());
    let post = service.edit_post(*post_id, user_id.0, &req.content).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post (author or moderator)
pub async fn delete_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
    caps: Capabilities,
) -> Result<HttpResponse> {
    let service = EngagementService::new((**pool).clone());
    service
        .delete_post(*post_id, user_id.0, caps.moderator)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
