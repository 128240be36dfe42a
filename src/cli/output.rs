use chrono::{DateTime, Utc};
use crossterm::style::{Color as AnsiColor, Stylize};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use serde::Serialize;

use crate::mention::{AutocompleteState, MentionLookup, TextSegment, TextboxId, tokenize};
use crate::model::{Activity, CommentNode, FileKind, Notification, Priority, Task, TaskStatus, UserRef};
use crate::ops::activity_format::Fragment;
use crate::ops::board_ops::{Board, StatusChange, progress};
use crate::ops::invitation_ops::is_actionable;
use crate::util::time::relative_or_dash;
use crate::util::unicode::{pad_to_width, truncate_to_width};

/// Widest a task title gets on a board card before it is cut
const CARD_TITLE_WIDTH: usize = 40;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct CandidateJson {
    pub id: String,
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Serialize)]
pub struct SuggestJson {
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textbox: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub candidates: Vec<CandidateJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

#[derive(Serialize)]
pub struct ThreadCommentJson {
    pub id: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub segments: Vec<TextSegment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<ThreadCommentJson>,
}

#[derive(Serialize)]
pub struct FileJson {
    pub name: String,
    pub kind: FileKind,
}

#[derive(Serialize)]
pub struct ActivityJson {
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub fragments: Vec<Fragment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileJson>,
}

#[derive(Serialize)]
pub struct CardJson {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub progress: String,
}

#[derive(Serialize)]
pub struct ColumnJson {
    pub status: TaskStatus,
    pub label: &'static str,
    pub tasks: Vec<CardJson>,
}

#[derive(Serialize)]
pub struct NotificationsJson<'a> {
    pub unread: usize,
    pub poll_interval_secs: u64,
    pub notifications: &'a [Notification],
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn candidate_to_json(user: &UserRef) -> CandidateJson {
    CandidateJson {
        id: user.id.clone(),
        username: user.username.clone(),
        email: user.email.clone(),
    }
}

pub fn textbox_label(textbox: &TextboxId) -> String {
    match textbox {
        TextboxId::Comment => "comment".to_string(),
        TextboxId::Reply(id) => format!("reply:{id}"),
    }
}

pub fn suggest_to_json(state: &AutocompleteState, limit: usize) -> SuggestJson {
    match state {
        AutocompleteState::Idle => SuggestJson {
            open: false,
            textbox: None,
            query: None,
            candidates: Vec::new(),
            selected: None,
        },
        AutocompleteState::Suggesting { textbox, query, .. } => SuggestJson {
            open: true,
            textbox: Some(textbox_label(textbox)),
            query: Some(query.clone()),
            candidates: state.candidates().iter().take(limit).map(candidate_to_json).collect(),
            selected: state.selected_candidate().and_then(|u| u.username.clone()),
        },
    }
}

pub fn comment_to_json(comment: &CommentNode, lookup: &MentionLookup) -> ThreadCommentJson {
    ThreadCommentJson {
        id: comment.id.clone(),
        author: comment.author_name().to_string(),
        created_at: comment.created_at,
        segments: tokenize(&comment.body, lookup),
        replies: comment
            .replies
            .iter()
            .map(|r| comment_to_json(r, lookup))
            .collect(),
    }
}

pub fn activity_to_json(activity: &Activity, fragments: Vec<Fragment>) -> ActivityJson {
    ActivityJson {
        user: activity.user.clone(),
        task_id: activity.task_id.clone(),
        created_at: activity.created_at,
        fragments,
        files: activity
            .files
            .iter()
            .map(|f| FileJson {
                name: f.name.clone(),
                kind: f.kind(),
            })
            .collect(),
    }
}

pub fn board_to_json(board: &Board) -> Vec<ColumnJson> {
    board
        .columns()
        .map(|(status, tasks)| ColumnJson {
            status,
            label: status.label(),
            tasks: tasks
                .iter()
                .map(|t| CardJson {
                    id: t.id.clone(),
                    title: t.title.clone(),
                    priority: t.priority,
                    progress: progress(t).ratio(),
                })
                .collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ANSI rendering
// ---------------------------------------------------------------------------

/// Map a ratatui colour onto crossterm's palette. ratatui's plain names are
/// the dark ANSI variants and its `Light*` names the bright ones.
fn ansi_color(color: Color) -> Option<AnsiColor> {
    let c = match color {
        Color::Reset => return None,
        Color::Black => AnsiColor::Black,
        Color::Red => AnsiColor::DarkRed,
        Color::Green => AnsiColor::DarkGreen,
        Color::Yellow => AnsiColor::DarkYellow,
        Color::Blue => AnsiColor::DarkBlue,
        Color::Magenta => AnsiColor::DarkMagenta,
        Color::Cyan => AnsiColor::DarkCyan,
        Color::Gray => AnsiColor::Grey,
        Color::DarkGray => AnsiColor::DarkGrey,
        Color::LightRed => AnsiColor::Red,
        Color::LightGreen => AnsiColor::Green,
        Color::LightYellow => AnsiColor::Yellow,
        Color::LightBlue => AnsiColor::Blue,
        Color::LightMagenta => AnsiColor::Magenta,
        Color::LightCyan => AnsiColor::Cyan,
        Color::White => AnsiColor::White,
        Color::Rgb(r, g, b) => AnsiColor::Rgb { r, g, b },
        Color::Indexed(i) => AnsiColor::AnsiValue(i),
    };
    Some(c)
}

/// Apply a ratatui style to `text` as ANSI escapes; plain text when `color`
/// is off
pub fn style_text(text: &str, style: Style, color: bool) -> String {
    if !color || text.is_empty() {
        return text.to_string();
    }
    let mut styled = text.stylize();
    if let Some(fg) = style.fg.and_then(ansi_color) {
        styled = styled.with(fg);
    }
    if style.add_modifier.contains(Modifier::BOLD) {
        styled = styled.bold();
    }
    styled.to_string()
}

pub fn line_to_ansi(line: &Line, color: bool) -> String {
    line.spans
        .iter()
        .map(|span| style_text(&span.content, line.style.patch(span.style), color))
        .collect()
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// One segment per line: kind, the text as written, and what it resolved to
pub fn format_segment(segment: &TextSegment) -> String {
    match segment {
        TextSegment::Literal { text } => format!("literal  {text:?}"),
        TextSegment::Mention {
            raw_handle,
            resolved_username,
            known: true,
        } => format!("mention  {:?} -> @{}", format!("@{raw_handle}"), resolved_username),
        TextSegment::Mention { raw_handle, .. } => {
            format!("mention  {:?} (unknown)", format!("@{raw_handle}"))
        }
    }
}

/// Candidate list with the highlighted entry marked, at most `limit` rows
pub fn format_candidates(state: &AutocompleteState, limit: usize) -> Vec<String> {
    if !state.is_open() {
        return vec!["no suggestions".to_string()];
    }
    let candidates = state.candidates();
    if candidates.is_empty() {
        return vec!["no matching participants".to_string()];
    }
    let selected = state.selected_candidate().map(|u| u.id.as_str());
    let mut lines: Vec<String> = candidates
        .iter()
        .take(limit)
        .map(|user| {
            let marker = if selected == Some(user.id.as_str()) { '>' } else { ' ' };
            let name = user.username.as_deref().unwrap_or_default();
            match &user.email {
                Some(email) => format!("{marker} {name}  <{email}>"),
                None => format!("{marker} {name}"),
            }
        })
        .collect();
    if candidates.len() > limit {
        lines.push(format!("  ... {} more", candidates.len() - limit));
    }
    lines
}

pub fn format_card(task: &Task) -> String {
    let title = pad_to_width(&truncate_to_width(&task.title, CARD_TITLE_WIDTH), CARD_TITLE_WIDTH);
    let priority = match task.priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    };
    let mut line = format!("  {}  {}  [{}]", task.id, title, priority);
    if !task.subtasks.is_empty() {
        line.push_str(&format!("  {}", progress(task).ratio()));
    }
    line.trim_end().to_string()
}

pub fn format_board(board: &Board) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (status, tasks)) in board.columns().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!("== {} ({}) ==", status.label(), tasks.len()));
        for task in tasks {
            lines.push(format_card(task));
        }
    }
    lines
}

pub fn format_status_change(change: &StatusChange) -> String {
    format!("{}: {} -> {}", change.task_id, change.from, change.to)
}

/// `message` is the notification text as it should be shown, already styled
pub fn format_notification(notification: &Notification, message: &str, now: DateTime<Utc>) -> String {
    let marker = if notification.read { ' ' } else { '*' };
    let mut line = format!(
        "{} {}  ({})",
        marker,
        message,
        relative_or_dash(notification.created_at, now)
    );
    if is_actionable(notification) {
        line.push_str("  [accept/decline]");
    }
    line
}
