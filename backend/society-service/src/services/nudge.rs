/// Feed nudge advisor
///
/// Pure function of the viewer's follow count as of this request. Viewers
/// below the threshold get a structured suggestion alongside their feed;
/// everyone else gets nothing. Never persisted, never cached.
use crate::models::FeedNudge;

/// Build the nudge for a viewer following `follow_count` societies, or
/// `None` at or above `threshold`.
pub fn nudge_for_follow_count(follow_count: i64, threshold: i64) -> Option<FeedNudge> {
    if follow_count >= threshold {
        return None;
    }

    Some(FeedNudge {
        title: "Find your societies".to_string(),
        message: format!(
            "You follow {} {}. Follow a few more to fill your feed with things you care about.",
            follow_count,
            if follow_count == 1 {
                "society"
            } else {
                "societies"
            }
        ),
        suggested_action: "browse_societies".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: i64 = 3;

    #[test]
    fn below_threshold_gets_a_nudge() {
        let nudge = nudge_for_follow_count(2, THRESHOLD).expect("nudge expected");
        assert_eq!(nudge.suggested_action, "browse_societies");
        assert!(nudge.message.contains("2 societies"));
    }

    #[test]
    fn at_threshold_gets_nothing() {
        assert!(nudge_for_follow_count(3, THRESHOLD).is_none());
        assert!(nudge_for_follow_count(10, THRESHOLD).is_none());
    }

    #[test]
    fn zero_and_one_follow_copy_is_grammatical() {
        let zero = nudge_for_follow_count(0, THRESHOLD).unwrap();
        assert!(zero.message.contains("0 societies"));
        let one = nudge_for_follow_count(1, THRESHOLD).unwrap();
        assert!(one.message.contains("1 society"));
    }
}
