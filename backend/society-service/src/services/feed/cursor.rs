/// Opaque continuation cursor for the two-stream feed.
///
/// The followed and discovery streams page independently at different
/// rates, so the cursor carries one position per stream rather than a
/// single linear offset. Clients treat the encoded form as a black box:
/// base64 over a JSON body, decoded back into the same struct.
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Post;

/// Keyset position inside one newest-first stream: the (created_at, id)
/// pair of the last post consumed from it. Timestamps are stored as
/// microseconds so the round trip through JSON is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamPosition {
    pub ts_micros: i64,
    pub id: Uuid,
}

impl StreamPosition {
    pub fn from_post(post: &Post) -> Self {
        Self {
            ts_micros: post.created_at.timestamp_micros(),
            id: post.id,
        }
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_micros(self.ts_micros).single()
    }

    /// The keyset filter pair handed to the repository. Decode has already
    /// rejected unrepresentable timestamps; if one slips through anyway,
    /// MIN_UTC matches no rows rather than replaying them.
    pub fn as_keyset(&self) -> (DateTime<Utc>, Uuid) {
        let ts = self.timestamp().unwrap_or(DateTime::<Utc>::MIN_UTC);
        (ts, self.id)
    }
}

/// Continuation state for both sub-streams. `None` means the head of that
/// stream (nothing consumed yet).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCursor {
    pub followed: Option<StreamPosition>,
    pub global: Option<StreamPosition>,
}

impl FeedCursor {
    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(general_purpose::STANDARD.encode(json))
    }

    pub fn decode(raw: &str) -> Result<Self> {
        let bytes = general_purpose::STANDARD
            .decode(raw)
            .map_err(|_| AppError::Validation("invalid cursor format".to_string()))?;
        let cursor: Self = serde_json::from_slice(&bytes)
            .map_err(|_| AppError::Validation("invalid cursor contents".to_string()))?;
        for pos in [cursor.followed, cursor.global].into_iter().flatten() {
            if pos.timestamp().is_none() {
                return Err(AppError::Validation(
                    "invalid cursor timestamp".to_string(),
                ));
            }
        }
        Ok(cursor)
    }

    /// Decode an optional query parameter; absent or empty means first page.
    pub fn from_param(param: Option<&str>) -> Result<Self> {
        match param {
            Some(raw) if !raw.is_empty() => Self::decode(raw),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(micros: i64) -> StreamPosition {
        StreamPosition {
            ts_micros: micros,
            id: Uuid::new_v4(),
        }
    }

    #[test]
    fn cursor_round_trips_exactly() {
        let cursor = FeedCursor {
            followed: Some(position(1_700_000_123_456_789)),
            global: Some(position(42)),
        };
        let encoded = cursor.encode().unwrap();
        assert_eq!(FeedCursor::decode(&encoded).unwrap(), cursor);
    }

    #[test]
    fn half_empty_cursor_round_trips() {
        let cursor = FeedCursor {
            followed: None,
            global: Some(position(7)),
        };
        let encoded = cursor.encode().unwrap();
        assert_eq!(FeedCursor::decode(&encoded).unwrap(), cursor);
    }

    #[test]
    fn absent_param_is_first_page() {
        assert_eq!(FeedCursor::from_param(None).unwrap(), FeedCursor::default());
        assert_eq!(
            FeedCursor::from_param(Some("")).unwrap(),
            FeedCursor::default()
        );
    }

    #[test]
    fn garbage_cursor_is_a_validation_error() {
        let err = FeedCursor::decode("not-base64!!").unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        // Valid base64 wrapping invalid JSON is rejected the same way.
        let bogus = general_purpose::STANDARD.encode(b"{\"weird\": true");
        let err = FeedCursor::decode(&bogus).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn unrepresentable_timestamp_is_rejected_at_decode() {
        // i64::MAX microseconds is far outside chrono's datetime range.
        let cursor = FeedCursor {
            followed: Some(position(i64::MAX)),
            global: None,
        };
        let encoded = cursor.encode().unwrap();
        let err = FeedCursor::decode(&encoded).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn keyset_preserves_microseconds() {
        let pos = position(1_700_000_000_000_001);
        let (ts, _) = pos.as_keyset();
        assert_eq!(ts.timestamp_micros(), 1_700_000_000_000_001);
    }
}
