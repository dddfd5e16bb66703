/// Feed handler - the composed home feed endpoint
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::config::FeedConfig;
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::FeedService;

#[derive(Debug, Deserialize)]
pub struct FeedQueryParams {
    pub limit: Option<usize>,
    pub cursor: Option<String>,
}

/// GET /api/v1/feed
///
/// Returns the next page of the merged followed/discovery feed. The
/// response omits `cursor` once both streams are exhausted.
pub async fn get_feed(
    pool: web::Data<PgPool>,
    feed_config: web::Data<FeedConfig>,
    user_id: UserId,
    query: web::Query<FeedQueryParams>,
) -> Result<HttpResponse> {
    let service = FeedService::new((**pool).clone(), feed_config.get_ref().clone());
    let page = service
        .fetch_page(user_id.0, query.limit, query.cursor.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(page))
}
