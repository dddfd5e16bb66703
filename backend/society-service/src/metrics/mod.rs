/// Observability counters for the feed path.
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, Histogram, IntCounterVec, TextEncoder,
};
use std::time::Duration;

/// Duration of feed composition, store fetches included.
pub static FEED_COMPOSE_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "feed_compose_duration_seconds",
        "Feed page composition duration including store fetches"
    )
    .expect("failed to register feed_compose_duration_seconds")
});

/// Posts returned per page, segmented by tier.
pub static FEED_POSTS_RETURNED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "feed_posts_returned_total",
        "Posts returned in feed pages segmented by tier",
        &["tier"]
    )
    .expect("failed to register feed_posts_returned_total")
});

pub fn observe_feed_page(followed_returned: usize, global_returned: usize, elapsed: Duration) {
    FEED_COMPOSE_DURATION_SECONDS.observe(elapsed.as_secs_f64());
    FEED_POSTS_RETURNED_TOTAL
        .with_label_values(&["followed"])
        .inc_by(followed_returned as u64);
    FEED_POSTS_RETURNED_TOTAL
        .with_label_values(&["global"])
        .inc_by(global_returned as u64);
}

/// Render the default registry in the Prometheus text format.
pub fn render() -> String {
    let encoder = TextEncoder::new();
    encoder
        .encode_to_string(&prometheus::gather())
        .unwrap_or_default()
}
