/// HTTP handlers for society-service
///
/// - Feed: composed two-stream home feed with continuation cursors
/// - Posts: create, read, time-boxed edit, delete
/// - Comments: create, list, delete with counter maintenance
/// - Likes / Follows: idempotent set-membership operations
pub mod comments;
pub mod feed;
pub mod follows;
pub mod likes;
pub mod posts;

pub use comments::{create_comment, delete_comment, get_post_comments};
pub use feed::get_feed;
pub use follows::{follow_society, unfollow_society};
pub use likes::{like_post, unlike_post};
pub use posts::{create_post, delete_post, edit_post, get_post};
