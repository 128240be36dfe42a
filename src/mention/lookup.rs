use std::collections::HashMap;

use crate::model::{Task, UserRef};

/// Normalized handle (lowercased email or username) to canonical username.
///
/// Rebuilt from scratch whenever the task's participants change; never
/// mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionLookup {
    entries: HashMap<String, String>,
}

/// Build the lookup from a task's owner and assignees.
///
/// Every participant with both an email and a username registers two keys,
/// both mapping to the username. Participants missing either are skipped.
/// When two participants normalize to the same key the later one wins.
pub fn build_lookup(owner: Option<&UserRef>, assigned: &[UserRef]) -> MentionLookup {
    let mut entries = HashMap::new();
    for user in owner.into_iter().chain(assigned.iter()) {
        let (Some(username), Some(email)) = (&user.username, &user.email) else {
            tracing::debug!(user = %user.id, "participant lacks username or email; not mentionable");
            continue;
        };
        entries.insert(email.to_lowercase(), username.clone());
        entries.insert(username.to_lowercase(), username.clone());
    }
    MentionLookup { entries }
}

impl MentionLookup {
    pub fn for_task(task: &Task) -> Self {
        build_lookup(task.owner.as_ref(), &task.assigned_to)
    }

    /// Resolve a handle as typed after `@`. Surrounding whitespace is
    /// ignored and matching is case-insensitive.
    pub fn resolve(&self, handle: &str) -> Option<&str> {
        self.entries
            .get(&handle.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, username: &str, email: &str) -> UserRef {
        UserRef::new(id, username, email)
    }

    #[test]
    fn registers_email_and_username() {
        let owner = user("1", "Alice", "Alice@Example.com");
        let lookup = build_lookup(Some(&owner), &[]);
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.resolve("alice"), Some("Alice"));
        assert_eq!(lookup.resolve("ALICE@example.COM"), Some("Alice"));
    }

    #[test]
    fn empty_inputs_give_empty_lookup() {
        let lookup = build_lookup(None, &[]);
        assert!(lookup.is_empty());
        assert_eq!(lookup, MentionLookup::default());
    }

    #[test]
    fn incomplete_participants_are_skipped() {
        let mut no_email = user("1", "carol", "x");
        no_email.email = None;
        let mut no_name = user("2", "y", "dave@x.com");
        no_name.username = None;
        let lookup = build_lookup(None, &[no_email, no_name]);
        assert!(lookup.is_empty());
    }

    #[test]
    fn colliding_keys_last_write_wins() {
        // Same handle differing only by case: the later assignee takes the key.
        let first = user("1", "Sam", "sam1@x.com");
        let second = user("2", "sam", "sam2@x.com");
        let lookup = build_lookup(Some(&first), &[second]);
        assert_eq!(lookup.resolve("sam"), Some("sam"));
        assert_eq!(lookup.resolve("sam1@x.com"), Some("Sam"));
        assert_eq!(lookup.len(), 3);
    }

    #[test]
    fn resolve_trims_whitespace() {
        let lookup = build_lookup(None, &[user("1", "bob", "bob@x.com")]);
        assert_eq!(lookup.resolve(" bob \n"), Some("bob"));
        assert_eq!(lookup.resolve("bobby"), None);
    }
}
