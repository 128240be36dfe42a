use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::ClientConfig;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "focusflow.toml";

/// Error type for loading config and exported JSON
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    JsonError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not parse config: {0}")]
    ConfigParseError(#[from] toml::de::Error),
}

pub(crate) fn read_text(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|e| LoadError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse config text; every section and key is optional
pub fn parse_config(text: &str) -> Result<ClientConfig, LoadError> {
    Ok(toml::from_str(text)?)
}

/// The config file `load_config` would read: an explicit path as given,
/// else `./focusflow.toml` when present. `None` means built-in defaults.
pub fn config_path(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(p) => Some(p.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    }
}

/// Load the client config. An explicit path must exist; otherwise
/// `./focusflow.toml` is used when present, else the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<ClientConfig, LoadError> {
    match config_path(path) {
        Some(path) => parse_config(&read_text(&path)?),
        None => Ok(ClientConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = parse_config(
            r#"[ui]
mention_color = "magenta"

[board]
columns = ["inProgress", "completed"]
"#,
        )
        .unwrap();
        assert_eq!(config.ui.mention_color, "magenta");
        assert_eq!(config.ui.emphasis_color, "yellow");
        assert_eq!(config.ui.max_suggestions, 8);
        assert!(config.ui.color);
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.board.columns, vec!["inProgress", "completed"]);
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn explicit_path_is_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ff.toml");
        fs::write(&path, "[log]\nlevel = \"debug\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(Some(&tmp.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, LoadError::ReadError { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn explicit_config_path_is_kept_even_when_missing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.toml");
        assert_eq!(config_path(Some(&path)), Some(path.clone()));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = parse_config("[ui\ncolor = ").unwrap_err();
        assert!(matches!(err, LoadError::ConfigParseError(_)));
    }
}
