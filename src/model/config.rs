use serde::{Deserialize, Serialize};

/// Configuration from focusflow.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub board: BoardConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Emit ANSI colour in CLI output
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_mention_color")]
    pub mention_color: String,
    #[serde(default = "default_emphasis_color")]
    pub emphasis_color: String,
    /// Cap on candidates shown in the suggestion list
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            color: true,
            mention_color: default_mention_color(),
            emphasis_color: default_emphasis_color(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default tracing filter; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Column order, by status wire name
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            columns: default_columns(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_mention_color() -> String {
    "cyan".to_string()
}

fn default_emphasis_color() -> String {
    "yellow".to_string()
}

fn default_max_suggestions() -> usize {
    8
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_columns() -> Vec<String> {
    vec!["pending".into(), "inProgress".into(), "completed".into()]
}
