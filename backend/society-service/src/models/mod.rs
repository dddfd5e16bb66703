/// Data models for society-service
///
/// This module defines structures for:
/// - Post: posts published by campus societies
/// - Comment: comments on posts
/// - Feed DTOs: composed feed pages, composition metadata, and nudges
///
/// Like rows never leave the store as values; the viewer's like state is
/// read through the like repository's existence check. All wire-facing
/// structs serialize camelCase.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post published by a society author.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub society_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub media_url: Option<String>,
    pub link_url: Option<String>,
    pub like_count: i32,
    pub comment_count: i32,
    pub edit_count: i32,
    pub edited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A comment on a post. Deletion is a hard remove.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Which stream produced a feed entry in this fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Followed,
    Global,
}

/// A post as it appears in a composed feed page, tagged with provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPost {
    #[serde(flatten)]
    pub post: Post,
    pub tier: Tier,
}

/// Actual followed:global split of a returned page, as fractions of the
/// page length. Both zero for an empty page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AchievedRatio {
    pub followed: f64,
    pub global: f64,
}

/// Composition metadata reported with every feed page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedMeta {
    pub followed_count: i64,
    pub followed_returned: usize,
    pub global_returned: usize,
    pub achieved_ratio: AchievedRatio,
}

/// Advisory payload shown to viewers who follow very few societies.
/// Never persisted; recomputed from the live follow count on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedNudge {
    pub title: String,
    pub message: String,
    pub suggested_action: String,
}

/// One page of the merged feed. Absence of `cursor` signals end of feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPage {
    pub data: Vec<FeedPost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    pub meta: FeedMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nudge: Option<FeedNudge>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post() -> Post {
        Post {
            id: Uuid::new_v4(),
            society_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            content: "welcome week schedule".to_string(),
            media_url: None,
            link_url: None,
            like_count: 3,
            comment_count: 1,
            edit_count: 0,
            edited_at: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn post_serializes_camel_case() {
        let value = serde_json::to_value(post()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "societyId",
            "authorId",
            "mediaUrl",
            "linkUrl",
            "likeCount",
            "commentCount",
            "editCount",
            "editedAt",
            "createdAt",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert!(!obj.contains_key("society_id"));
        assert!(!obj.contains_key("like_count"));
    }

    #[test]
    fn comment_serializes_camel_case() {
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            content: "see you there".to_string(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(comment).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["postId", "authorId", "createdAt"] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert!(!obj.contains_key("post_id"));
    }

    #[test]
    fn feed_post_flattens_the_post_and_tags_the_tier() {
        let feed_post = FeedPost {
            post: post(),
            tier: Tier::Followed,
        };
        let value = serde_json::to_value(feed_post).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["tier"], "followed");
        assert!(obj.contains_key("societyId"));
        assert!(!obj.contains_key("post"));
    }
}
