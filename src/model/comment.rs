use chrono::{DateTime, Utc};
use serde::Serialize;

use super::user::UserRef;

/// One comment or reply in a task's thread.
///
/// Top-level comments carry their replies; replies never carry replies of
/// their own (the decoder flattens deeper nesting under the top-level
/// comment), so the tree is exactly one level deep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserRef>,
    /// Raw text with mentions embedded as `@username`
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    pub fn new(id: impl Into<String>, author: Option<UserRef>, body: impl Into<String>) -> Self {
        CommentNode {
            id: id.into(),
            author,
            body: body.into(),
            created_at: None,
            replies: Vec::new(),
        }
    }

    pub fn author_name(&self) -> &str {
        self.author.as_ref().map_or("unknown", UserRef::display_name)
    }

    pub fn find_reply(&self, reply_id: &str) -> Option<&CommentNode> {
        self.replies.iter().find(|r| r.id == reply_id)
    }
}
