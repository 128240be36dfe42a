use serde::Serialize;

use crate::mention::{MentionLookup, TextSegment, tokenize};

/// How a fragment of an activity line is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Literal,
    Mention,
}

/// A styled piece of an activity line or comment body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub text: String,
    pub kind: FragmentKind,
    pub emphasis: bool,
}

impl Fragment {
    pub fn plain(text: impl Into<String>) -> Self {
        Fragment {
            text: text.into(),
            kind: FragmentKind::Literal,
            emphasis: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Fragment {
            text: text.into(),
            kind: FragmentKind::Literal,
            emphasis: true,
        }
    }

    pub fn from_segment(segment: &TextSegment, emphasis: bool) -> Self {
        Fragment {
            text: segment.display_text(),
            kind: if segment.is_mention() {
                FragmentKind::Mention
            } else {
                FragmentKind::Literal
            },
            emphasis,
        }
    }
}

/// Concatenated display text of a formatted line
pub fn plain_text(fragments: &[Fragment]) -> String {
    fragments.iter().map(|f| f.text.as_str()).collect()
}

fn mentions(text: &str, lookup: &MentionLookup, emphasis: bool) -> Vec<Fragment> {
    tokenize(text, lookup)
        .iter()
        .map(|s| Fragment::from_segment(s, emphasis))
        .collect()
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// One recognised activity phrasing: a containment test plus a formatter
/// that is only called when the test passed.
struct Rule {
    name: &'static str,
    matches: fn(&str) -> bool,
    format: fn(&str, &MentionLookup) -> Vec<Fragment>,
}

const UPLOADED: &str = " uploaded file(s): ";
const CREATED: &str = "created task ";
const COMMENTED: &str = " added comment : ";
const REPLIED: [&str; 3] = [" replied to comment : ", " replied to comment: ", " replied : "];
const ASSIGNED: &str = "assigned task with title ";
const ACCEPTED: &str = " accepted invitation to join ";
const DECLINED: &str = " declined invitation to join ";

/// Tested top to bottom; the first match formats the line.
const RULES: &[Rule] = &[
    Rule {
        name: "uploaded",
        matches: |s| s.contains(UPLOADED),
        format: format_uploaded,
    },
    Rule {
        name: "created",
        matches: |s| s.contains(CREATED),
        format: format_created,
    },
    Rule {
        name: "commented",
        matches: |s| s.contains(COMMENTED),
        format: format_commented,
    },
    Rule {
        name: "replied",
        matches: |s| REPLIED.iter().any(|d| s.contains(d)),
        format: format_replied,
    },
    Rule {
        name: "assigned",
        matches: |s| s.contains(ASSIGNED),
        format: format_assigned,
    },
    Rule {
        name: "accepted",
        matches: |s| s.contains(ACCEPTED),
        format: |s, lookup| format_subject(s, ACCEPTED, lookup),
    },
    Rule {
        name: "declined",
        matches: |s| s.contains(DECLINED),
        format: |s, lookup| format_subject(s, DECLINED, lookup),
    },
];

/// `<actor><delimiter><emphasized subject>`
fn format_subject(raw: &str, delimiter: &str, lookup: &MentionLookup) -> Vec<Fragment> {
    let Some((actor, subject)) = raw.split_once(delimiter) else {
        return mentions(raw, lookup, false);
    };
    let mut out = mentions(actor, lookup, false);
    out.push(Fragment::plain(delimiter));
    if !subject.is_empty() {
        out.push(Fragment::emphasized(subject));
    }
    out
}

fn format_uploaded(raw: &str, lookup: &MentionLookup) -> Vec<Fragment> {
    format_subject(raw, UPLOADED, lookup)
}

fn format_created(raw: &str, lookup: &MentionLookup) -> Vec<Fragment> {
    format_subject(raw, CREATED, lookup)
}

/// `<actor> added comment : <comment>`; the comment keeps its mentions
fn format_commented(raw: &str, lookup: &MentionLookup) -> Vec<Fragment> {
    format_quoted_text(raw, COMMENTED, lookup)
}

fn format_replied(raw: &str, lookup: &MentionLookup) -> Vec<Fragment> {
    let delimiter = REPLIED
        .iter()
        .copied()
        .find(|d| raw.contains(d))
        .unwrap_or(REPLIED[0]);
    format_quoted_text(raw, delimiter, lookup)
}

fn format_quoted_text(raw: &str, delimiter: &str, lookup: &MentionLookup) -> Vec<Fragment> {
    let Some((actor, text)) = raw.split_once(delimiter) else {
        return mentions(raw, lookup, false);
    };
    let mut out = mentions(actor, lookup, false);
    out.push(Fragment::plain(delimiter));
    out.extend(mentions(text, lookup, true));
    out
}

/// `<actor>assigned task with title "<title>"`; quotes are dropped from the
/// emphasized title when present.
fn format_assigned(raw: &str, lookup: &MentionLookup) -> Vec<Fragment> {
    let Some((actor, rest)) = raw.split_once(ASSIGNED) else {
        return mentions(raw, lookup, false);
    };
    let mut out = mentions(actor, lookup, false);
    out.push(Fragment::plain(ASSIGNED));
    let title = rest
        .strip_prefix('"')
        .and_then(|r| r.split_once('"'))
        .map(|(title, _)| title)
        .unwrap_or(rest);
    if !title.is_empty() {
        out.push(Fragment::emphasized(title));
    }
    out
}

/// Turn a free-text activity line into styled fragments.
///
/// Never fails and never returns an empty list: an empty line comes back as a
/// single empty plain fragment, and a line no rule recognises is
/// mention-tokenized as a whole.
pub fn format_action(raw: &str, lookup: &MentionLookup) -> Vec<Fragment> {
    if raw.is_empty() {
        return vec![Fragment::plain("")];
    }
    if let Some(rule) = RULES.iter().find(|r| (r.matches)(raw)) {
        tracing::trace!(rule = rule.name, "activity rule matched");
        return (rule.format)(raw, lookup);
    }
    let out = mentions(raw, lookup, false);
    if out.is_empty() {
        vec![Fragment::plain(raw)]
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mention::build_lookup;
    use crate::model::UserRef;
    use pretty_assertions::assert_eq;

    fn lookup() -> MentionLookup {
        build_lookup(None, &[UserRef::new("1", "bob", "bob@x.com"), UserRef::new("2", "amy", "amy@x.com")])
    }

    fn emphasized(frags: &[Fragment]) -> Vec<&str> {
        frags.iter().filter(|f| f.emphasis).map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn upload_emphasizes_file_list() {
        let frags = format_action("bob uploaded file(s): a.png", &lookup());
        assert_eq!(
            frags,
            vec![
                Fragment::plain("bob"),
                Fragment::plain(" uploaded file(s): "),
                Fragment::emphasized("a.png"),
            ]
        );
    }

    #[test]
    fn upload_wins_over_created_task() {
        let frags = format_action("bob uploaded file(s): created task notes.pdf", &lookup());
        assert_eq!(emphasized(&frags), vec!["created task notes.pdf"]);
    }

    #[test]
    fn created_task_title() {
        let frags = format_action("@bob created task Launch site", &lookup());
        assert_eq!(frags[0].kind, FragmentKind::Mention);
        assert_eq!(frags[0].text, "@bob ");
        assert_eq!(plain_text(&frags), "@bob created task Launch site");
        assert_eq!(emphasized(&frags), vec!["Launch site"]);
    }

    #[test]
    fn comment_text_is_tokenized_and_emphasized() {
        let frags = format_action("bob added comment : thanks @amy", &lookup());
        assert_eq!(
            frags,
            vec![
                Fragment::plain("bob"),
                Fragment::plain(" added comment : "),
                Fragment::emphasized("thanks "),
                Fragment {
                    text: "@amy".into(),
                    kind: FragmentKind::Mention,
                    emphasis: true,
                },
            ]
        );
    }

    #[test]
    fn reply_delimiter_variants() {
        for line in [
            "amy replied to comment : ok",
            "amy replied to comment: ok",
            "amy replied : ok",
        ] {
            let frags = format_action(line, &lookup());
            assert_eq!(emphasized(&frags), vec!["ok"], "line: {line}");
            assert_eq!(plain_text(&frags), line);
        }
    }

    #[test]
    fn assigned_title_drops_quotes() {
        let frags = format_action("bob assigned task with title \"Q3 plan\" to amy", &lookup());
        assert_eq!(emphasized(&frags), vec!["Q3 plan"]);
    }

    #[test]
    fn invitation_lines() {
        let frags = format_action("amy accepted invitation to join Roadmap", &lookup());
        assert_eq!(emphasized(&frags), vec!["Roadmap"]);
        let frags = format_action("amy declined invitation to join Roadmap", &lookup());
        assert_eq!(emphasized(&frags), vec!["Roadmap"]);
    }

    #[test]
    fn fallback_tokenizes_whole_line() {
        let frags = format_action("@amy changed status", &lookup());
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].kind, FragmentKind::Mention);
        assert!(!frags[0].emphasis);
    }

    #[test]
    fn empty_line_is_one_empty_fragment() {
        assert_eq!(format_action("", &lookup()), vec![Fragment::plain("")]);
    }

    #[test]
    fn repeated_formatting_is_stable() {
        let line = "bob added comment : @amy @ghost";
        assert_eq!(format_action(line, &lookup()), format_action(line, &lookup()));
    }
}
