use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::lookup::MentionLookup;

/// An `@` followed by everything up to the next `@` or end of text.
/// Whitespace does not end the run; stored comments render against this
/// boundary.
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[^@]+").expect("mention pattern is valid"));

/// A contiguous span of comment text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TextSegment {
    Literal {
        text: String,
    },
    Mention {
        /// Handle exactly as written, without the leading `@`
        raw_handle: String,
        /// Canonical username, or `raw_handle` when nobody matched
        resolved_username: String,
        /// Whether `resolved_username` came from the lookup
        known: bool,
    },
}

impl TextSegment {
    pub fn literal(text: impl Into<String>) -> Self {
        TextSegment::Literal { text: text.into() }
    }

    pub fn is_mention(&self) -> bool {
        matches!(self, TextSegment::Mention { .. })
    }

    /// The exact slice of input this segment was cut from
    pub fn raw_source(&self) -> String {
        match self {
            TextSegment::Literal { text } => text.clone(),
            TextSegment::Mention { raw_handle, .. } => format!("@{raw_handle}"),
        }
    }

    /// Text to show on screen. A resolved mention shows the canonical
    /// username and keeps any whitespace that trailed the handle.
    pub fn display_text(&self) -> String {
        match self {
            TextSegment::Literal { text } => text.clone(),
            TextSegment::Mention {
                raw_handle,
                resolved_username,
                known: true,
            } => {
                let trailing = &raw_handle[raw_handle.trim_end().len()..];
                format!("@{resolved_username}{trailing}")
            }
            TextSegment::Mention { raw_handle, .. } => format!("@{raw_handle}"),
        }
    }
}

/// A mention may only open at the start of the text or after whitespace,
/// and the handle must not begin with whitespace.
fn opens_mention(text: &str, at: usize, handle: &str) -> bool {
    let after_boundary = text[..at]
        .chars()
        .next_back()
        .is_none_or(char::is_whitespace);
    let handle_starts = handle.chars().next().is_some_and(|c| !c.is_whitespace());
    after_boundary && handle_starts
}

/// Split `text` into literal and mention segments.
///
/// Lossless: concatenating every segment's [`TextSegment::raw_source`]
/// reproduces `text`. Never fails; unknown handles fall back to the handle
/// as typed.
pub fn tokenize(text: &str, lookup: &MentionLookup) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut literal_start = 0;

    for m in MENTION_RE.find_iter(text) {
        let handle = &m.as_str()[1..];
        if !opens_mention(text, m.start(), handle) {
            // Stays part of the surrounding literal.
            continue;
        }
        if literal_start < m.start() {
            segments.push(TextSegment::literal(&text[literal_start..m.start()]));
        }
        let (resolved_username, known) = match lookup.resolve(handle) {
            Some(name) => (name.to_string(), true),
            None => (handle.to_string(), false),
        };
        segments.push(TextSegment::Mention {
            raw_handle: handle.to_string(),
            resolved_username,
            known,
        });
        literal_start = m.end();
    }

    if literal_start < text.len() {
        segments.push(TextSegment::literal(&text[literal_start..]));
    }
    segments
}

/// Tokenize text that may be missing; `None` behaves like `""`
pub fn tokenize_opt(text: Option<&str>, lookup: &MentionLookup) -> Vec<TextSegment> {
    tokenize(text.unwrap_or_default(), lookup)
}

/// Reassemble the original text from its segments
pub fn source_of(segments: &[TextSegment]) -> String {
    segments.iter().map(TextSegment::raw_source).collect()
}

/// Usernames of known participants mentioned in `text`, first mention
/// first, each listed once.
pub fn mentioned_usernames(text: &str, lookup: &MentionLookup) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for segment in tokenize(text, lookup) {
        if let TextSegment::Mention {
            resolved_username,
            known: true,
            ..
        } = segment
            && !names.contains(&resolved_username)
        {
            names.push(resolved_username);
        }
    }
    names
}
