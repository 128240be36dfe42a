use std::collections::HashSet;

use serde::Serialize;

use super::activity_format::Fragment;
use super::comment_ops::Method;
use crate::model::Notification;

/// Error type for invitation responses
#[derive(Debug, thiserror::Error)]
pub enum InvitationError {
    #[error("not an invitation: {0}")]
    NotAnInvitation(String),
    #[error("invitation already handled: {0}")]
    AlreadyRead(String),
    #[error("invitation has no task: {0}")]
    MissingTask(String),
    #[error("invitation for task {0} is already being answered")]
    InFlight(String),
}

/// Answer to a task invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Accept,
    Decline,
}

impl Response {
    fn segment(self) -> &'static str {
        match self {
            Response::Accept => "accept",
            Response::Decline => "decline",
        }
    }
}

/// A validated invitation answer, ready to post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedInvitation {
    pub method: Method,
    pub path: String,
    pub response: Response,
    pub task_id: String,
    pub notification_id: String,
}

pub fn is_invitation(notification: &Notification) -> bool {
    notification.message.contains("invited")
}

/// An unread invitation that names its task can still be answered
pub fn is_actionable(notification: &Notification) -> bool {
    is_invitation(notification) && !notification.read && notification.task_id().is_some()
}

/// Message split so the invited task's title stands out. Anything else, or
/// an invitation whose title does not appear in the text, is one plain
/// fragment.
pub fn message_fragments(notification: &Notification) -> Vec<Fragment> {
    let message = notification.message.as_str();
    let title = notification
        .task_title()
        .filter(|t| !t.is_empty() && is_invitation(notification));
    let Some((title, at)) = title.and_then(|t| message.find(t).map(|at| (t, at))) else {
        return vec![Fragment::plain(message)];
    };
    let mut out = Vec::with_capacity(3);
    if at > 0 {
        out.push(Fragment::plain(&message[..at]));
    }
    out.push(Fragment::emphasized(title));
    let rest = &message[at + title.len()..];
    if !rest.is_empty() {
        out.push(Fragment::plain(rest));
    }
    out
}

fn prepare(notification: &Notification, response: Response) -> Result<PreparedInvitation, InvitationError> {
    if !is_invitation(notification) {
        return Err(InvitationError::NotAnInvitation(notification.id.clone()));
    }
    if notification.read {
        return Err(InvitationError::AlreadyRead(notification.id.clone()));
    }
    let task_id = notification
        .task_id()
        .ok_or_else(|| InvitationError::MissingTask(notification.id.clone()))?;
    Ok(PreparedInvitation {
        method: Method::Post,
        path: format!("/invitations/{}/{}", response.segment(), task_id),
        response,
        task_id: task_id.to_string(),
        notification_id: notification.id.clone(),
    })
}

pub fn prepare_accept(notification: &Notification) -> Result<PreparedInvitation, InvitationError> {
    prepare(notification, Response::Accept)
}

pub fn prepare_decline(notification: &Notification) -> Result<PreparedInvitation, InvitationError> {
    prepare(notification, Response::Decline)
}

/// Tasks whose invitation answer is still on the wire. A second answer for
/// the same task is refused until the first one finishes.
#[derive(Debug, Clone, Default)]
pub struct PendingInvitations {
    tasks: HashSet<String>,
}

impl PendingInvitations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, prepared: &PreparedInvitation) -> Result<(), InvitationError> {
        if !self.tasks.insert(prepared.task_id.clone()) {
            return Err(InvitationError::InFlight(prepared.task_id.clone()));
        }
        tracing::debug!(task = %prepared.task_id, response = ?prepared.response, "invitation answer started");
        Ok(())
    }

    /// Call when the request settles, whether it succeeded or not
    pub fn finish(&mut self, task_id: &str) {
        self.tasks.remove(task_id);
    }

    pub fn is_pending(&self, task_id: &str) -> bool {
        self.tasks.contains(task_id)
    }
}
