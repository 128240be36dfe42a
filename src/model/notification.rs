use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::Attachment;
use super::user::UserRef;
use crate::parse::lenient;

/// The task a notification points at. The API sends either a bare id or a
/// populated `{_id, title}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLink {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A user notification from the notifications endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: String,
    #[serde(default, alias = "isRead")]
    pub read: bool,
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        alias = "taskId",
        deserialize_with = "lenient::opt_task_link",
        skip_serializing_if = "Option::is_none"
    )]
    pub task: Option<TaskLink>,
    /// Who triggered it
    #[serde(default, deserialize_with = "lenient::opt_user", skip_serializing_if = "Option::is_none")]
    pub actor: Option<UserRef>,
}

impl Notification {
    pub fn task_id(&self) -> Option<&str> {
        self.task.as_ref().map(|t| t.id.as_str())
    }

    pub fn task_title(&self) -> Option<&str> {
        self.task.as_ref().and_then(|t| t.title.as_deref())
    }
}

/// One entry of the recent-activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Actor's display name as recorded by the activity log
    #[serde(default, deserialize_with = "lenient::string")]
    pub user: String,
    /// Free-text action line, e.g. `bob uploaded file(s): a.png`
    #[serde(default, deserialize_with = "lenient::string")]
    pub action: String,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub files: Vec<Attachment>,
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}
