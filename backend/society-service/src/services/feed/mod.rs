/// Feed composition engine
///
/// Stateless across requests: all continuation state lives in the opaque
/// cursor. Each request decodes the cursor, pulls one slice from the
/// followed stream and one from the discovery stream, interleaves them at
/// a 2:1 target, and re-encodes the advanced positions. Pagination ends
/// only when both streams are exhausted at once.
pub mod composer;
pub mod cursor;

use std::time::Instant;

use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::config::FeedConfig;
use crate::db::{FollowRepository, PostRepository};
use crate::error::Result;
use crate::metrics;
use crate::models::{AchievedRatio, FeedMeta, FeedPage, Post};
use crate::services::nudge;
use composer::{interleave, sub_fetch_sizes};
use cursor::{FeedCursor, StreamPosition};

/// One fetched slice of a sub-stream plus whether more rows exist past it.
struct StreamSlice {
    posts: Vec<Post>,
    has_more: bool,
}

pub struct FeedService {
    posts: PostRepository,
    follows: FollowRepository,
    config: FeedConfig,
}

impl FeedService {
    pub fn new(pool: PgPool, config: FeedConfig) -> Self {
        Self {
            posts: PostRepository::new(pool.clone()),
            follows: FollowRepository::new(pool),
            config,
        }
    }

    /// Produce the next page of the merged feed for `viewer_id`.
    pub async fn fetch_page(
        &self,
        viewer_id: Uuid,
        limit: Option<usize>,
        cursor_param: Option<&str>,
    ) -> Result<FeedPage> {
        let started = Instant::now();
        let limit = self.clamp_limit(limit);
        let cursor = FeedCursor::from_param(cursor_param)?;

        // Live follow count: feeds both the meta block and the nudge.
        let followed_count = self.follows.count_follows(viewer_id).await?;

        let (want_followed, want_global) = sub_fetch_sizes(limit);
        let followed = self
            .fetch_followed(viewer_id, cursor.followed, want_followed)
            .await?;
        let global = self
            .fetch_global(viewer_id, cursor.global, want_global)
            .await?;

        let followed_has_more = followed.has_more;
        let global_has_more = global.has_more;

        let comp = interleave(followed.posts, global.posts, limit);

        // Per-stream positions advance independently; a stream that
        // contributed nothing this page keeps its inbound position so it
        // can resume later.
        let next = FeedCursor {
            followed: comp.last_followed.or(cursor.followed),
            global: comp.last_global.or(cursor.global),
        };
        let followed_exhausted = !followed_has_more && !comp.followed_leftover;
        let global_exhausted = !global_has_more && !comp.global_leftover;
        let next_cursor = if followed_exhausted && global_exhausted {
            None
        } else {
            Some(next.encode()?)
        };

        let ratio = achieved_ratio(comp.followed_returned, comp.global_returned);

        debug!(
            %viewer_id,
            limit,
            followed_returned = comp.followed_returned,
            global_returned = comp.global_returned,
            has_more = next_cursor.is_some(),
            "composed feed page"
        );
        metrics::observe_feed_page(
            comp.followed_returned,
            comp.global_returned,
            started.elapsed(),
        );

        Ok(FeedPage {
            data: comp.entries,
            cursor: next_cursor,
            meta: FeedMeta {
                followed_count,
                followed_returned: comp.followed_returned,
                global_returned: comp.global_returned,
                achieved_ratio: ratio,
            },
            nudge: nudge::nudge_for_follow_count(followed_count, self.config.nudge_threshold),
        })
    }

    fn clamp_limit(&self, limit: Option<usize>) -> usize {
        limit
            .unwrap_or(self.config.default_page_size)
            .clamp(1, self.config.max_page_size)
    }

    async fn fetch_followed(
        &self,
        viewer_id: Uuid,
        after: Option<StreamPosition>,
        want: usize,
    ) -> Result<StreamSlice> {
        // Over-fetch by one row to learn whether the stream continues
        // without a second query.
        let rows = self
            .posts
            .list_followed(
                viewer_id,
                after.map(|p| p.as_keyset()),
                (want + 1) as i64,
            )
            .await?;
        Ok(slice(rows, want))
    }

    async fn fetch_global(
        &self,
        viewer_id: Uuid,
        after: Option<StreamPosition>,
        want: usize,
    ) -> Result<StreamSlice> {
        let rows = self
            .posts
            .list_discovery(
                viewer_id,
                after.map(|p| p.as_keyset()),
                (want + 1) as i64,
            )
            .await?;
        Ok(slice(rows, want))
    }
}

fn slice(mut rows: Vec<Post>, want: usize) -> StreamSlice {
    let has_more = rows.len() > want;
    rows.truncate(want);
    StreamSlice {
        posts: rows,
        has_more,
    }
}

/// The split actually returned, as fractions of the page. Reports actuals
/// rather than the 2:1 target; an empty page is 0/0.
pub fn achieved_ratio(followed_returned: usize, global_returned: usize) -> AchievedRatio {
    let total = followed_returned + global_returned;
    if total == 0 {
        return AchievedRatio {
            followed: 0.0,
            global: 0.0,
        };
    }
    AchievedRatio {
        followed: followed_returned as f64 / total as f64,
        global: global_returned as f64 / total as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_reports_actuals_not_target() {
        // A 4 followed + 2 global page of 6 reports the true split.
        let ratio = achieved_ratio(4, 2);
        assert!((ratio.followed - 4.0 / 6.0).abs() < f64::EPSILON);
        assert!((ratio.global - 2.0 / 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn all_global_page_reports_zero_followed() {
        let ratio = achieved_ratio(0, 6);
        assert_eq!(ratio.followed, 0.0);
        assert_eq!(ratio.global, 1.0);
    }

    #[test]
    fn empty_page_is_zero_zero() {
        let ratio = achieved_ratio(0, 0);
        assert_eq!(ratio.followed, 0.0);
        assert_eq!(ratio.global, 0.0);
    }
}
