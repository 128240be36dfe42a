pub mod theme;
pub mod thread;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::text::{Line, Span};

use crate::mention::TextSegment;
use crate::ops::activity_format::Fragment;

pub use theme::Theme;
pub use thread::{ThreadView, render_comment_thread, thread_lines};

/// Plain (unemphasized) fragments for a tokenized body
pub fn segment_fragments(segments: &[TextSegment]) -> Vec<Fragment> {
    segments
        .iter()
        .map(|s| Fragment::from_segment(s, false))
        .collect()
}

/// One styled line, in fragment order. Newlines inside fragments are not
/// interpreted; use [`fragments_to_lines`] for multi-line text.
pub fn fragments_to_line(fragments: &[Fragment], theme: &Theme) -> Line<'static> {
    Line::from(
        fragments
            .iter()
            .map(|f| Span::styled(f.text.clone(), theme.fragment_style(f)))
            .collect::<Vec<_>>(),
    )
}

/// Styled lines, breaking at every `\n` while keeping each piece's style
pub fn fragments_to_lines(fragments: &[Fragment], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines: Vec<Vec<Span<'static>>> = vec![Vec::new()];
    for fragment in fragments {
        let style = theme.fragment_style(fragment);
        for (i, piece) in fragment.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Vec::new());
            }
            if !piece.is_empty()
                && let Some(current) = lines.last_mut()
            {
                current.push(Span::styled(piece.to_string(), style));
            }
        }
    }
    lines.into_iter().map(Line::from).collect()
}

pub fn segments_to_line(segments: &[TextSegment], theme: &Theme) -> Line<'static> {
    fragments_to_line(&segment_fragments(segments), theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mention::{build_lookup, tokenize};
    use crate::model::UserRef;
    use ratatui::style::{Color, Style};

    #[test]
    fn line_preserves_segment_order_and_styles() {
        let lookup = build_lookup(None, &[UserRef::new("1", "bob", "bob@x.com")]);
        let line = segments_to_line(&tokenize("ask @bob", &lookup), &Theme::default());
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, "ask ");
        assert_eq!(line.spans[1].content, "@bob");
        assert_eq!(line.spans[1].style, Style::default().fg(Color::Cyan));
    }

    #[test]
    fn multiline_fragments_split() {
        let frags = vec![Fragment::plain("one\ntwo"), Fragment::emphasized("!\n"), Fragment::plain("three")];
        let lines = fragments_to_lines(&frags, &Theme::default());
        let text: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(text, vec!["one", "two!", "three"]);
    }
}
