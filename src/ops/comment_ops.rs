use std::fmt;

use serde::Serialize;

use crate::mention::{MentionLookup, mentioned_usernames};
use crate::model::{CommentNode, Task};

/// Error type for comment submission
#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    #[error("comment cannot be empty")]
    EmptyComment,
    #[error("reply cannot be empty")]
    EmptyReply,
    #[error("comment not found: {0}")]
    CommentNotFound(String),
    #[error("reply not found: {reply_id} (on comment {comment_id})")]
    ReplyNotFound { comment_id: String, reply_id: String },
}

/// HTTP verb of a prepared request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Post,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        })
    }
}

/// Body sent to the comment endpoints. Mentions stay as plain `@username`
/// text; nothing structured is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentPayload {
    pub comment: String,
}

/// A validated new or edited comment or reply, ready to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedComment {
    pub method: Method,
    /// Request path relative to the tasks API root
    pub path: String,
    pub payload: CommentPayload,
    /// Known participants mentioned in the body
    pub mentions: Vec<String>,
}

/// A validated delete; these carry no body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedDelete {
    pub method: Method,
    pub path: String,
}

fn comment_path(task: &Task, comment_id: &str) -> String {
    format!("/{}/comments/{}", task.id, comment_id)
}

fn reply_path(task: &Task, comment_id: &str, reply_id: &str) -> String {
    format!("/{}/comments/{}/replies/{}", task.id, comment_id, reply_id)
}

fn find_comment<'a>(task: &'a Task, comment_id: &str) -> Result<&'a CommentNode, CommentError> {
    task.find_comment(comment_id)
        .ok_or_else(|| CommentError::CommentNotFound(comment_id.to_string()))
}

fn find_reply(task: &Task, comment_id: &str, reply_id: &str) -> Result<(), CommentError> {
    find_comment(task, comment_id)?
        .find_reply(reply_id)
        .map(|_| ())
        .ok_or_else(|| CommentError::ReplyNotFound {
            comment_id: comment_id.to_string(),
            reply_id: reply_id.to_string(),
        })
}

fn prepared(task: &Task, method: Method, path: String, body: &str) -> PreparedComment {
    PreparedComment {
        method,
        path,
        payload: CommentPayload {
            comment: body.to_string(),
        },
        mentions: mentioned_usernames(body, &MentionLookup::for_task(task)),
    }
}

/// Validate a new top-level comment on `task`
pub fn prepare_comment(task: &Task, text: &str) -> Result<PreparedComment, CommentError> {
    let body = text.trim();
    if body.is_empty() {
        return Err(CommentError::EmptyComment);
    }
    Ok(prepared(task, Method::Post, format!("/{}/comments", task.id), body))
}

/// Validate a reply to `comment_id` on `task`
pub fn prepare_reply(task: &Task, comment_id: &str, text: &str) -> Result<PreparedComment, CommentError> {
    find_comment(task, comment_id)?;
    let body = text.trim();
    if body.is_empty() {
        return Err(CommentError::EmptyReply);
    }
    let path = format!("/{}/comments/{}/replies", task.id, comment_id);
    Ok(prepared(task, Method::Post, path, body))
}

/// Replace the text of an existing top-level comment
pub fn prepare_edit_comment(task: &Task, comment_id: &str, text: &str) -> Result<PreparedComment, CommentError> {
    find_comment(task, comment_id)?;
    let body = text.trim();
    if body.is_empty() {
        return Err(CommentError::EmptyComment);
    }
    Ok(prepared(task, Method::Patch, comment_path(task, comment_id), body))
}

pub fn prepare_delete_comment(task: &Task, comment_id: &str) -> Result<PreparedDelete, CommentError> {
    find_comment(task, comment_id)?;
    Ok(PreparedDelete {
        method: Method::Delete,
        path: comment_path(task, comment_id),
    })
}

/// Replace the text of reply `reply_id` under `comment_id`
pub fn prepare_edit_reply(
    task: &Task,
    comment_id: &str,
    reply_id: &str,
    text: &str,
) -> Result<PreparedComment, CommentError> {
    find_reply(task, comment_id, reply_id)?;
    let body = text.trim();
    if body.is_empty() {
        return Err(CommentError::EmptyReply);
    }
    Ok(prepared(task, Method::Patch, reply_path(task, comment_id, reply_id), body))
}

pub fn prepare_delete_reply(task: &Task, comment_id: &str, reply_id: &str) -> Result<PreparedDelete, CommentError> {
    find_reply(task, comment_id, reply_id)?;
    Ok(PreparedDelete {
        method: Method::Delete,
        path: reply_path(task, comment_id, reply_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserRef;

    fn sample_task() -> Task {
        let mut task = Task::new("t1", "Launch");
        task.owner = Some(UserRef::new("u1", "alice", "alice@x.com"));
        task.assigned_to = vec![UserRef::new("u2", "bob", "bob@x.com")];
        let mut first = CommentNode::new("c1", task.owner.clone(), "first");
        first.replies = vec![CommentNode::new("r1", None, "second")];
        task.comments = vec![first];
        task
    }

    #[test]
    fn comment_is_trimmed_and_mentions_collected() {
        let prepared = prepare_comment(&sample_task(), "  thanks @bob").unwrap();
        assert_eq!(prepared.method, Method::Post);
        assert_eq!(prepared.path, "/t1/comments");
        assert_eq!(prepared.payload.comment, "thanks @bob");
        assert_eq!(prepared.mentions, vec!["bob"]);
    }

    #[test]
    fn blank_comment_rejected() {
        let err = prepare_comment(&sample_task(), " \n\t").unwrap_err();
        assert!(matches!(err, CommentError::EmptyComment));
        assert_eq!(err.to_string(), "comment cannot be empty");
    }

    #[test]
    fn reply_targets_parent() {
        let prepared = prepare_reply(&sample_task(), "c1", "@alice done").unwrap();
        assert_eq!(prepared.path, "/t1/comments/c1/replies");
        assert!(prepared.mentions.is_empty(), "handle runs to end of text");
    }

    #[test]
    fn reply_errors() {
        let task = sample_task();
        assert!(matches!(
            prepare_reply(&task, "nope", "hi"),
            Err(CommentError::CommentNotFound(id)) if id == "nope"
        ));
        assert!(matches!(prepare_reply(&task, "c1", ""), Err(CommentError::EmptyReply)));
    }

    #[test]
    fn payload_serializes_as_comment_field() {
        let payload = CommentPayload {
            comment: "hi @bob".into(),
        };
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"comment":"hi @bob"}"#);
    }

    #[test]
    fn edit_comment_patches_in_place() {
        let prepared = prepare_edit_comment(&sample_task(), "c1", " fixed, @bob").unwrap();
        assert_eq!(prepared.method, Method::Patch);
        assert_eq!(prepared.path, "/t1/comments/c1");
        assert_eq!(prepared.payload.comment, "fixed, @bob");
        assert_eq!(prepared.mentions, vec!["bob"]);
    }

    #[test]
    fn edit_comment_errors() {
        let task = sample_task();
        assert!(matches!(prepare_edit_comment(&task, "c1", "  "), Err(CommentError::EmptyComment)));
        assert!(matches!(
            prepare_edit_comment(&task, "r1", "hi"),
            Err(CommentError::CommentNotFound(_))
        ));
    }

    #[test]
    fn edit_and_delete_reply_paths() {
        let task = sample_task();
        let edit = prepare_edit_reply(&task, "c1", "r1", "second, edited").unwrap();
        assert_eq!(edit.method, Method::Patch);
        assert_eq!(edit.path, "/t1/comments/c1/replies/r1");
        assert!(matches!(prepare_edit_reply(&task, "c1", "r1", ""), Err(CommentError::EmptyReply)));

        let delete = prepare_delete_reply(&task, "c1", "r1").unwrap();
        assert_eq!(delete.method, Method::Delete);
        assert_eq!(delete.path, "/t1/comments/c1/replies/r1");
    }

    #[test]
    fn delete_checks_targets_exist() {
        let task = sample_task();
        assert_eq!(prepare_delete_comment(&task, "c1").unwrap().path, "/t1/comments/c1");
        assert!(matches!(prepare_delete_comment(&task, "c9"), Err(CommentError::CommentNotFound(_))));
        let err = prepare_delete_reply(&task, "c1", "r9").unwrap_err();
        assert_eq!(err.to_string(), "reply not found: r9 (on comment c1)");
        assert!(matches!(
            prepare_delete_reply(&task, "c9", "r1"),
            Err(CommentError::CommentNotFound(_))
        ));
    }

    #[test]
    fn method_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Method::Patch).unwrap(), r#""PATCH""#);
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
