use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::lenient;
use crate::model::{CommentNode, UserRef};

/// A comment as the API sends it, with arbitrarily nested replies
#[derive(Debug, Deserialize)]
struct RawComment {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient::id")]
    id: String,
    #[serde(default, alias = "user", deserialize_with = "lenient::opt_user")]
    author: Option<UserRef>,
    #[serde(default, alias = "comment", alias = "text", deserialize_with = "lenient::string")]
    body: String,
    #[serde(default, rename = "createdAt", deserialize_with = "lenient::opt_datetime")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::list")]
    replies: Vec<RawComment>,
}

/// Decode a task's `comments` array into a one-level thread.
///
/// Replies to replies are hoisted into the top-level comment's reply list,
/// directly after the reply they answered.
pub fn comment_tree<'de, D>(deserializer: D) -> Result<Vec<CommentNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<RawComment> = lenient::list(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|c| {
            let mut replies = Vec::new();
            flatten_replies(c.replies, &mut replies);
            CommentNode {
                id: c.id,
                author: c.author,
                body: c.body,
                created_at: c.created_at,
                replies,
            }
        })
        .collect())
}

fn flatten_replies(raw: Vec<RawComment>, out: &mut Vec<CommentNode>) {
    for reply in raw {
        if !reply.replies.is_empty() {
            tracing::debug!(reply = %reply.id, nested = reply.replies.len(), "flattening nested replies");
        }
        out.push(CommentNode {
            id: reply.id,
            author: reply.author,
            body: reply.body,
            created_at: reply.created_at,
            replies: Vec::new(),
        });
        flatten_replies(reply.replies, out);
    }
}
