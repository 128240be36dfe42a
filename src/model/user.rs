use serde::{Deserialize, Serialize};

use crate::parse::lenient;

/// A person who can own, be assigned to, or be mentioned on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// Opaque identifier from the API (`_id`)
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient::id")]
    pub id: String,
    /// Display handle, assumed unique among a task's participants
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub username: Option<String>,
    /// Secondary lookup key for mentions
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(
        default,
        alias = "avatarUrl",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
}

impl UserRef {
    pub fn new(id: impl Into<String>, username: impl Into<String>, email: impl Into<String>) -> Self {
        UserRef {
            id: id.into(),
            username: Some(username.into()),
            email: Some(email.into()),
            avatar: None,
        }
    }

    /// Best available label: username, then email, then the raw id
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}
