use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

mod config;
mod db;
mod error;
mod handlers;
mod metrics;
mod middleware;
mod models;
mod services;

use config::Config;
use middleware::JwtAuthMiddleware;

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "healthy" }))
}

async fn metrics_endpoint() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics::render())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    info!("Starting society-service");

    let config = Config::from_env().context("failed to load configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let bind_addr = (config.app.host.clone(), config.app.http_port);
    info!(host = %config.app.host, port = config.app.http_port, "HTTP server listening");

    let jwt_secret = config.auth.jwt_secret.clone();
    let feed_config = config.feed.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(feed_config.clone()))
            .route("/health", web::get().to(health))
            .route("/metrics", web::get().to(metrics_endpoint))
            .service(
                web::scope("/api/v1")
                    .wrap(JwtAuthMiddleware::new(&jwt_secret))
                    .route("/feed", web::get().to(handlers::get_feed))
                    .route("/posts", web::post().to(handlers::create_post))
                    .route("/posts/{post_id}", web::get().to(handlers::get_post))
                    .route("/posts/{post_id}", web::patch().to(handlers::edit_post))
                    .route("/posts/{post_id}", web::delete().to(handlers::delete_post))
                    .route("/posts/{post_id}/like", web::post().to(handlers::like_post))
                    .route(
                        "/posts/{post_id}/like",
                        web::delete().to(handlers::unlike_post),
                    )
                    .route(
                        "/posts/{post_id}/comments",
                        web::post().to(handlers::create_comment),
                    )
                    .route(
                        "/posts/{post_id}/comments",
                        web::get().to(handlers::get_post_comments),
                    )
                    .route(
                        "/posts/{post_id}/comments/{comment_id}",
                        web::delete().to(handlers::delete_comment),
                    )
                    .route(
                        "/societies/{society_id}/follow",
                        web::post().to(handlers::follow_society),
                    )
                    .route(
                        "/societies/{society_id}/follow",
                        web::delete().to(handlers::unfollow_society),
                    ),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
    .context("HTTP server terminated")?;

    Ok(())
}
