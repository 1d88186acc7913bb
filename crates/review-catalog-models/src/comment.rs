use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment attached to a single review. Comments have no lifecycle of
/// their own: they are stored inside the owning review and disappear with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied input for a new comment. The id and timestamp are
/// assigned by the repository; `user_id`/`user_name` are opaque strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentDraft {
    pub user_id: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    pub content: String,
}

impl Comment {
    pub fn from_draft(id: String, draft: CommentDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            user_name: draft.user_name,
            user_avatar: draft.user_avatar,
            content: draft.content,
            created_at,
        }
    }
}
