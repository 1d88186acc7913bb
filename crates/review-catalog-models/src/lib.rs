pub mod comment;
pub mod kind;
pub mod review;

pub use comment::{Comment, CommentDraft};
pub use kind::MediaKind;
pub use review::{Review, ReviewForm};
