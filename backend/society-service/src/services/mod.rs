/// Business logic layer for society-service
///
/// - `feed`: two-stream feed composition, cursors, and interleave
/// - `engagement`: likes, comments, post edit/delete with the edit window
/// - `follow`: idempotent society follow/unfollow
/// - `nudge`: low-follow-count advisory computed per feed request
pub mod engagement;
pub mod feed;
pub mod follow;
pub mod nudge;

pub use engagement::EngagementService;
pub use feed::FeedService;
pub use follow::FollowService;
