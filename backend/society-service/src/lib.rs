/// Society Service Library
///
/// Home feed composition and engagement for the Quadrangle campus
/// network: societies publish posts; students follow societies, like,
/// comment, and discover new societies through the merged two-stream
/// feed.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for posts, comments, likes, feed pages
/// - `services`: Business logic (feed engine, engagement, nudges)
/// - `db`: Repositories over the relational store
/// - `middleware`: JWT authentication and viewer context
/// - `error`: Error taxonomy and HTTP mapping
/// - `config`: Configuration management
/// - `metrics`: Prometheus instrumentation
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
