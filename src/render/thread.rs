use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{Theme, fragments_to_lines, segment_fragments};
use crate::mention::{MentionLookup, tokenize};
use crate::model::{CommentNode, Task};
use crate::util::avatar::avatar_color;
use crate::util::time::relative_or_dash;
use crate::util::unicode::initials;

const REPLY_INDENT: &str = "  ";

/// A task's comment thread, ready to draw
pub struct ThreadView<'a> {
    pub task: &'a Task,
    pub lookup: &'a MentionLookup,
    /// Reference point for "N minutes ago" labels
    pub now: DateTime<Utc>,
}

impl<'a> ThreadView<'a> {
    pub fn new(task: &'a Task, lookup: &'a MentionLookup, now: DateTime<Utc>) -> Self {
        ThreadView { task, lookup, now }
    }
}

fn header_line(comment: &CommentNode, view: &ThreadView, theme: &Theme, indent: &str) -> Line<'static> {
    let author = comment.author_name().to_string();
    let mut spans = Vec::new();
    if !indent.is_empty() {
        spans.push(Span::raw(format!("{indent}\u{21B3} ")));
    }
    spans.push(Span::styled(
        format!("({})", initials(&author)),
        Style::default().fg(avatar_color(&author)),
    ));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(author, Style::default().add_modifier(Modifier::BOLD)));
    spans.push(Span::styled(
        format!(" \u{00B7} {}", relative_or_dash(comment.created_at, view.now)),
        Style::default().fg(theme.dim),
    ));
    Line::from(spans)
}

fn body_lines(comment: &CommentNode, view: &ThreadView, theme: &Theme, indent: &str) -> Vec<Line<'static>> {
    let fragments = segment_fragments(&tokenize(&comment.body, view.lookup));
    fragments_to_lines(&fragments, theme)
        .into_iter()
        .map(|line| {
            if indent.is_empty() {
                line
            } else {
                let mut spans = vec![Span::raw(indent.to_string())];
                spans.extend(line.spans);
                Line::from(spans)
            }
        })
        .collect()
}

/// Lines for the whole thread: each comment's header and mention-rendered
/// body, replies indented beneath it, a blank line between comments.
pub fn thread_lines(view: &ThreadView, theme: &Theme) -> Vec<Line<'static>> {
    if view.task.comments.is_empty() {
        return vec![Line::styled("No comments yet", Style::default().fg(theme.dim))];
    }
    let reply_body_indent = format!("{REPLY_INDENT}  ");
    let mut lines = Vec::new();
    for (i, comment) in view.task.comments.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(header_line(comment, view, theme, ""));
        lines.extend(body_lines(comment, view, theme, ""));
        for reply in &comment.replies {
            lines.push(header_line(reply, view, theme, REPLY_INDENT));
            lines.extend(body_lines(reply, view, theme, &reply_body_indent));
        }
    }
    lines
}

/// Draw the comment thread into `area`
pub fn render_comment_thread(frame: &mut Frame, area: Rect, view: &ThreadView, theme: &Theme) {
    let paragraph = Paragraph::new(thread_lines(view, theme)).style(Style::default().fg(theme.text).bg(Color::Reset));
    frame.render_widget(paragraph, area);
}
