use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::comment::CommentNode;
use super::user::UserRef;
use crate::parse::lenient;

/// Kanban column a task sits in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed];

    /// Wire name used by the API (`pending`, `inProgress`, `completed`)
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "inProgress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Human label for column headers
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Parse a status name. Case and inner whitespace are ignored, so
    /// `"In Progress"` and `"inprogress"` both map to `InProgress`.
    pub fn parse(s: &str) -> Option<TaskStatus> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "pending" | "todo" => Some(TaskStatus::Pending),
            "inprogress" | "active" => Some(TaskStatus::InProgress),
            "completed" | "done" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn parse(s: &str) -> Option<Priority> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// What an attachment looks like, for picking an icon or preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Image,
    Other,
}

impl FileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Image => "image",
            FileKind::Other => "other",
        }
    }

    /// Classify by file extension (case-insensitive)
    pub fn from_name(name: &str) -> FileKind {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => FileKind::Pdf,
            "jpg" | "jpeg" | "png" => FileKind::Image,
            _ => FileKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, alias = "filename", alias = "originalname", deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Attachment {
    pub fn kind(&self) -> FileKind {
        FileKind::from_name(&self.name)
    }
}

/// A task as returned by the task-fetch endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::status")]
    pub status: TaskStatus,
    #[serde(default, deserialize_with = "lenient::priority")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::opt_user")]
    pub owner: Option<UserRef>,
    #[serde(default, deserialize_with = "lenient::users")]
    pub assigned_to: Vec<UserRef>,
    #[serde(rename = "subtask", alias = "subtasks", default, deserialize_with = "lenient::list")]
    pub subtasks: Vec<Subtask>,
    #[serde(rename = "attachment", alias = "attachments", default, deserialize_with = "lenient::list")]
    pub attachments: Vec<Attachment>,
    #[serde(default, deserialize_with = "crate::parse::comment_tree")]
    pub comments: Vec<CommentNode>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            title: title.into(),
            ..Task::default()
        }
    }

    /// Everyone who can be mentioned on this task: owner first, then
    /// assignees in the order the API returned them.
    pub fn participants(&self) -> Vec<&UserRef> {
        self.owner.iter().chain(self.assigned_to.iter()).collect()
    }

    pub fn find_comment(&self, comment_id: &str) -> Option<&CommentNode> {
        self.comments.iter().find(|c| c.id == comment_id)
    }
}
