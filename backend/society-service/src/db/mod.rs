/// Database access layer
///
/// One repository per aggregate, each a thin struct over the shared
/// `PgPool`. Denormalized counter maintenance (like_count, comment_count)
/// lives exclusively in this layer, in the same transaction as the row
/// write it mirrors; decrements clamp at zero to tolerate drift.
pub mod comment_repo;
pub mod follow_repo;
pub mod like_repo;
pub mod post_repo;

pub use comment_repo::CommentRepository;
pub use follow_repo::FollowRepository;
pub use like_repo::LikeRepository;
pub use post_repo::PostRepository;
