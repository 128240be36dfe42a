use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::model::{Priority, Subtask, TaskStatus};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// MIME types the upload endpoint accepts
pub const ALLOWED_UPLOAD_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

/// Error type for task form submission
#[derive(Debug, thiserror::Error)]
pub enum TaskDraftError {
    #[error("title is required")]
    EmptyTitle,
    #[error("invalid email addresses: {}", .0.join(", "))]
    InvalidEmails(Vec<String>),
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// A file picked for upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Upload {
    pub name: String,
    pub mime: String,
}

/// Task form contents as typed by the user
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    /// Comma-separated, as typed in the tags box
    pub tags: String,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    /// Invitee emails
    pub assigned_to: Vec<String>,
    pub subtasks: Vec<Subtask>,
    pub uploads: Vec<Upload>,
}

/// The create/update request body built from a draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub assigned_to: Vec<String>,
    #[serde(rename = "subtask")]
    pub subtasks: Vec<Subtask>,
    #[serde(rename = "attachment", skip_serializing_if = "Vec::is_empty")]
    pub uploads: Vec<Upload>,
}

/// A normalized payload plus any uploads that were dropped for their type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDraft {
    pub payload: TaskPayload,
    pub rejected_uploads: Vec<Upload>,
}

impl TaskDraft {
    /// Validate and clean up the draft: trim the title (required), split the
    /// tag string, require every assignee to look like an email, drop blank
    /// subtasks, and filter uploads to the accepted types.
    pub fn normalize(self) -> Result<NormalizedDraft, TaskDraftError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(TaskDraftError::EmptyTitle);
        }

        let assigned_to: Vec<String> = self
            .assigned_to
            .iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        let invalid: Vec<String> = assigned_to
            .iter()
            .filter(|e| !is_valid_email(e))
            .cloned()
            .collect();
        if !invalid.is_empty() {
            return Err(TaskDraftError::InvalidEmails(invalid));
        }

        let tags = self
            .tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();

        let subtasks = self
            .subtasks
            .into_iter()
            .filter_map(|s| {
                let title = s.title.trim();
                (!title.is_empty()).then(|| Subtask {
                    title: title.to_string(),
                    completed: s.completed,
                })
            })
            .collect();

        let (uploads, rejected_uploads): (Vec<Upload>, Vec<Upload>) = self
            .uploads
            .into_iter()
            .partition(|u| ALLOWED_UPLOAD_TYPES.contains(&u.mime.as_str()));
        if !rejected_uploads.is_empty() {
            tracing::warn!(count = rejected_uploads.len(), "only JPEG, PNG, and PDF files are allowed");
        }

        Ok(NormalizedDraft {
            payload: TaskPayload {
                title,
                description: self.description,
                status: self.status,
                priority: self.priority,
                tags,
                start_date: self.start_date,
                due_date: self.due_date,
                assigned_to,
                subtasks,
                uploads,
            },
            rejected_uploads,
        })
    }
}
