/// Pure interleave of the two candidate streams.
///
/// The page alternates two followed posts, one global post while both
/// streams have candidates. The 2:1 split is a target, not a guarantee:
/// when one stream runs dry the remainder of the page fills from the
/// other, and the achieved split is reported honestly in the page
/// metadata. Remainder slots overflow to whichever stream still has
/// candidates.
use std::collections::VecDeque;

use super::cursor::StreamPosition;
use crate::models::{FeedPost, Post, Tier};

/// Followed posts taken per round of the interleave.
pub const FOLLOWED_PER_ROUND: usize = 2;
/// Global posts taken per round of the interleave.
pub const GLOBAL_PER_ROUND: usize = 1;

/// Candidate counts requested from each stream for a page of `limit`.
/// Slightly over-fetching both keeps the ratio reachable when rounding
/// leaves a remainder slot.
pub fn sub_fetch_sizes(limit: usize) -> (usize, usize) {
    let followed = (limit * FOLLOWED_PER_ROUND).div_ceil(FOLLOWED_PER_ROUND + GLOBAL_PER_ROUND);
    let global = (limit * GLOBAL_PER_ROUND).div_ceil(FOLLOWED_PER_ROUND + GLOBAL_PER_ROUND);
    (followed, global)
}

/// Result of composing one page from already-fetched candidates.
#[derive(Debug)]
pub struct Composition {
    /// Merged page, each entry tagged with the stream that produced it
    /// in this fetch.
    pub entries: Vec<FeedPost>,
    pub followed_returned: usize,
    pub global_returned: usize,
    /// Position of the last followed candidate consumed, if any.
    pub last_followed: Option<StreamPosition>,
    /// Position of the last global candidate consumed, if any.
    pub last_global: Option<StreamPosition>,
    /// Candidates fetched but not consumed this page. A stream with
    /// leftovers is not exhausted regardless of what the fetch said.
    pub followed_leftover: bool,
    pub global_leftover: bool,
}

/// Merge candidates into a single page of at most `limit` entries.
/// Both inputs are newest-first; output order within each tier is
/// preserved.
pub fn interleave(followed: Vec<Post>, global: Vec<Post>, limit: usize) -> Composition {
    let mut followed: VecDeque<Post> = followed.into();
    let mut global: VecDeque<Post> = global.into();

    let mut entries = Vec::with_capacity(limit.min(followed.len() + global.len()));
    let mut last_followed = None;
    let mut last_global = None;
    let mut followed_returned = 0;
    let mut global_returned = 0;

    while entries.len() < limit && (!followed.is_empty() || !global.is_empty()) {
        for _ in 0..FOLLOWED_PER_ROUND {
            if entries.len() == limit {
                break;
            }
            if let Some(post) = followed.pop_front() {
                last_followed = Some(StreamPosition::from_post(&post));
                followed_returned += 1;
                entries.push(FeedPost {
                    post,
                    tier: Tier::Followed,
                });
            }
        }
        for _ in 0..GLOBAL_PER_ROUND {
            if entries.len() == limit {
                break;
            }
            if let Some(post) = global.pop_front() {
                last_global = Some(StreamPosition::from_post(&post));
                global_returned += 1;
                entries.push(FeedPost {
                    post,
                    tier: Tier::Global,
                });
            }
        }
    }

    Composition {
        entries,
        followed_returned,
        global_returned,
        last_followed,
        last_global,
        followed_leftover: !followed.is_empty(),
        global_leftover: !global.is_empty(),
    }
}
