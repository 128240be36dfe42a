use std::path::Path;

use super::config_io::{LoadError, read_text};
use crate::model::{Activity, Notification, Task};
use crate::parse::wire;

fn decode<T>(path: &Path, parse: fn(&str) -> Result<T, serde_json::Error>) -> Result<T, LoadError> {
    let text = read_text(path)?;
    parse(&text).map_err(|e| LoadError::JsonError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read a single task exported from the API (bare or enveloped)
pub fn read_task(path: &Path) -> Result<Task, LoadError> {
    decode(path, wire::parse_task)
}

pub fn read_tasks(path: &Path) -> Result<Vec<Task>, LoadError> {
    decode(path, wire::parse_tasks)
}

pub fn read_notifications(path: &Path) -> Result<Vec<Notification>, LoadError> {
    decode(path, wire::parse_notifications)
}

pub fn read_activities(path: &Path) -> Result<Vec<Activity>, LoadError> {
    decode(path, wire::parse_activities)
}
