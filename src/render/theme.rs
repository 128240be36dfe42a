use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

use crate::model::UiConfig;
use crate::ops::activity_format::{Fragment, FragmentKind};

/// Colours used for comment and activity rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub mention: Color,
    pub emphasis: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            text: Color::Reset,
            dim: Color::DarkGray,
            mention: Color::Cyan,
            emphasis: Color::Yellow,
        }
    }
}

/// Parse a colour name (`cyan`, `lightblue`), index, or `#RRGGBB`
fn parse_color(name: &str, field: &str) -> Option<Color> {
    match Color::from_str(name.trim()) {
        Ok(c) => Some(c),
        Err(_) => {
            tracing::warn!(field, value = name, "unrecognised colour, using default");
            None
        }
    }
}

impl Theme {
    /// Create a theme from the `[ui]` config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        if let Some(c) = parse_color(&ui.mention_color, "mention_color") {
            theme.mention = c;
        }
        if let Some(c) = parse_color(&ui.emphasis_color, "emphasis_color") {
            theme.emphasis = c;
        }
        theme
    }

    /// Mentions always get the mention colour; emphasis adds bold, and
    /// turns plain text into the emphasis colour.
    pub fn fragment_style(&self, fragment: &Fragment) -> Style {
        let base = match (fragment.kind, fragment.emphasis) {
            (FragmentKind::Mention, _) => Style::default().fg(self.mention),
            (FragmentKind::Literal, true) => Style::default().fg(self.emphasis),
            (FragmentKind::Literal, false) => Style::default(),
        };
        if fragment.emphasis {
            base.add_modifier(Modifier::BOLD)
        } else {
            base
        }
    }
}
