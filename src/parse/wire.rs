use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::{Activity, Notification, Task};

/// Peel a `{ "data": ... }`-style envelope if one of `keys` is present.
fn unwrap_envelope(value: Value, keys: &[&str]) -> Value {
    if let Value::Object(mut map) = value {
        for key in keys {
            if let Some(inner) = map.remove(*key) {
                return inner;
            }
        }
        Value::Object(map)
    } else {
        value
    }
}

fn parse_list<T: DeserializeOwned>(json: &str, keys: &[&str]) -> Result<Vec<T>, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    serde_json::from_value(unwrap_envelope(value, keys))
}

/// Parse a single task, as returned by `GET /tasks/:id`
pub fn parse_task(json: &str) -> Result<Task, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    let is_bare = value.get("_id").is_some() || value.get("id").is_some();
    let value = if is_bare {
        value
    } else {
        unwrap_envelope(value, &["data", "task"])
    };
    serde_json::from_value(value)
}

/// Parse the task list from `GET /tasks`
pub fn parse_tasks(json: &str) -> Result<Vec<Task>, serde_json::Error> {
    parse_list(json, &["data", "tasks"])
}

pub fn parse_notifications(json: &str) -> Result<Vec<Notification>, serde_json::Error> {
    parse_list(json, &["data", "notifications"])
}

pub fn parse_activities(json: &str) -> Result<Vec<Activity>, serde_json::Error> {
    parse_list(json, &["data", "activities"])
}
