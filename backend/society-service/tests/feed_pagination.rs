//! Cursor pagination over a fixed snapshot.
//!
//! Drives the composer and cursor codec the same way FeedService does,
//! with an in-memory stand-in for the store's keyset reads: repeatedly
//! fetching with the returned cursor must surface the union of both
//! streams exactly once, and must keep working when a post vanishes
//! between pages.

use std::collections::HashSet;

use chrono::{Duration, Utc};
use uuid::Uuid;

use society_service::models::Post;
use society_service::services::feed::composer::{interleave, sub_fetch_sizes};
use society_service::services::feed::cursor::{FeedCursor, StreamPosition};

fn snapshot(n: usize, base_offset: i64) -> Vec<Post> {
    (0..n)
        .map(|i| Post {
            id: Uuid::new_v4(),
            society_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            content: format!("post {i}"),
            media_url: None,
            link_url: None,
            like_count: 0,
            comment_count: 0,
            edit_count: 0,
            edited_at: None,
            created_at: Utc::now() - Duration::seconds(base_offset + i as i64),
        })
        .collect()
}

/// The repository's keyset read: newest-first, strictly after `after`,
/// at most `limit` rows.
fn keyset_fetch(stream: &[Post], after: Option<StreamPosition>, limit: usize) -> Vec<Post> {
    let mut rows: Vec<Post> = stream
        .iter()
        .filter(|p| match after {
            None => true,
            Some(pos) => {
                let (ts, id) = pos.as_keyset();
                p.created_at < ts || (p.created_at == ts && p.id < id)
            }
        })
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    rows.truncate(limit);
    rows
}

/// One FeedService round against in-memory streams, including the
/// encode/decode round trip so the cursor stays an opaque string.
fn fetch_page(
    followed: &[Post],
    global: &[Post],
    limit: usize,
    cursor_param: Option<&str>,
) -> (Vec<Uuid>, Option<String>) {
    let cursor = FeedCursor::from_param(cursor_param).expect("cursor must decode");
    let (want_f, want_g) = sub_fetch_sizes(limit);

    let f_rows = keyset_fetch(followed, cursor.followed, want_f + 1);
    let g_rows = keyset_fetch(global, cursor.global, want_g + 1);
    let f_has_more = f_rows.len() > want_f;
    let g_has_more = g_rows.len() > want_g;
    let mut f_rows = f_rows;
    let mut g_rows = g_rows;
    f_rows.truncate(want_f);
    g_rows.truncate(want_g);

    let comp = interleave(f_rows, g_rows, limit);

    let next = FeedCursor {
        followed: comp.last_followed.or(cursor.followed),
        global: comp.last_global.or(cursor.global),
    };
    let followed_exhausted = !f_has_more && !comp.followed_leftover;
    let global_exhausted = !g_has_more && !comp.global_leftover;
    let next_cursor = if followed_exhausted && global_exhausted {
        None
    } else {
        Some(next.encode().expect("cursor must encode"))
    };

    (
        comp.entries.iter().map(|e| e.post.id).collect(),
        next_cursor,
    )
}

#[test]
fn paging_to_the_end_yields_every_post_exactly_once() {
    let followed = snapshot(23, 0);
    let global = snapshot(11, 1000);

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0;

    loop {
        let (ids, next) = fetch_page(&followed, &global, 6, cursor.as_deref());
        seen.extend(ids);
        pages += 1;
        assert!(pages < 50, "pagination must terminate");
        match next {
            Some(c) => cursor = Some(c),
            None => break,
        }
    }

    let unique: HashSet<Uuid> = seen.iter().copied().collect();
    assert_eq!(unique.len(), seen.len(), "no post may appear twice");

    let expected: HashSet<Uuid> = followed
        .iter()
        .chain(global.iter())
        .map(|p| p.id)
        .collect();
    assert_eq!(unique, expected, "no post may be omitted");
}

#[test]
fn exhausting_one_stream_does_not_end_pagination() {
    // Tiny followed pool, large global pool: followed dries up on page
    // one but the cursor must keep coming until global is done too.
    let followed = snapshot(2, 0);
    let global = snapshot(15, 1000);

    // Page one: both followed posts plus the global sub-fetch quota.
    let (ids, cursor) = fetch_page(&followed, &global, 6, None);
    assert_eq!(ids.len(), 4);
    assert!(cursor.is_some(), "global stream still has rows");

    let mut cursor = cursor;
    let mut seen: usize = ids.len();
    while let Some(c) = cursor {
        let (ids, next) = fetch_page(&followed, &global, 6, Some(&c));
        seen += ids.len();
        cursor = next;
    }
    assert_eq!(seen, 17);
}

#[test]
fn post_deleted_between_pages_does_not_break_the_cursor() {
    let followed = snapshot(10, 0);
    let global = snapshot(5, 1000);

    let (first_page, cursor) = fetch_page(&followed, &global, 6, None);
    let cursor = cursor.expect("more pages expected");

    // Delete one already-surfaced post and one not-yet-surfaced post.
    let surfaced = first_page[0];
    let unsurfaced = followed
        .iter()
        .map(|p| p.id)
        .find(|id| !first_page.contains(id))
        .unwrap();
    let followed_after: Vec<Post> = followed
        .iter()
        .filter(|p| p.id != surfaced && p.id != unsurfaced)
        .cloned()
        .collect();

    let mut seen: Vec<Uuid> = first_page.clone();
    let mut cursor = Some(cursor);
    while let Some(c) = cursor {
        let (ids, next) = fetch_page(&followed_after, &global, 6, Some(&c));
        seen.extend(ids);
        cursor = next;
    }

    let unique: HashSet<Uuid> = seen.iter().copied().collect();
    assert_eq!(unique.len(), seen.len());
    // Everything except the unsurfaced deleted post shows up exactly once.
    let mut expected: HashSet<Uuid> = followed
        .iter()
        .chain(global.iter())
        .map(|p| p.id)
        .collect();
    expected.remove(&unsurfaced);
    assert_eq!(unique, expected);
}

#[test]
fn zero_follow_viewer_sees_only_global_pages() {
    let followed: Vec<Post> = Vec::new();
    let global = snapshot(8, 0);

    // limit 20 caps the global sub-fetch at 7 per page.
    let (ids, cursor) = fetch_page(&followed, &global, 20, None);
    assert_eq!(ids.len(), 7);
    let cursor = cursor.expect("one global row remains");

    let (ids, cursor) = fetch_page(&followed, &global, 20, Some(&cursor));
    assert_eq!(ids.len(), 1);
    assert!(cursor.is_none(), "both streams exhausted");
}
