use std::collections::HashSet;
use std::time::Duration;

use crate::model::Notification;

/// How often the client re-fetches notifications
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Error type for notification operations
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification not found: {0}")]
    NotFound(String),
}

/// Read flags captured before an optimistic update, used to undo it if the
/// server call fails
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "keep the rollback until the server confirms the change"]
pub struct Rollback {
    previous: Vec<(String, bool)>,
}

/// Local notification list with optimistic read-state updates
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(items: Vec<Notification>) -> Self {
        NotificationCenter { items }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Mark one notification read ahead of the server call
    pub fn mark_read(&mut self, id: &str) -> Result<Rollback, NotificationError> {
        let item = self
            .items
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| NotificationError::NotFound(id.to_string()))?;
        let previous = vec![(item.id.clone(), item.read)];
        item.read = true;
        Ok(Rollback { previous })
    }

    /// Mark everything read ahead of the server call
    pub fn mark_all_read(&mut self) -> Rollback {
        let previous = self
            .items
            .iter_mut()
            .map(|n| {
                let was = n.read;
                n.read = true;
                (n.id.clone(), was)
            })
            .collect();
        Rollback { previous }
    }

    /// Undo an optimistic update. Notifications that disappeared since (a
    /// poll replaced the list) are ignored.
    pub fn rollback(&mut self, rollback: Rollback) {
        tracing::warn!(count = rollback.previous.len(), "rolling back notification read state");
        for (id, read) in rollback.previous {
            if let Some(n) = self.items.iter_mut().find(|n| n.id == id) {
                n.read = read;
            }
        }
    }

    /// Remove a notification locally after a delete
    pub fn remove(&mut self, id: &str) -> Result<Notification, NotificationError> {
        let idx = self
            .items
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| NotificationError::NotFound(id.to_string()))?;
        Ok(self.items.remove(idx))
    }

    /// Install a fresh poll result. Returns the notifications that are
    /// unread now but were not unread before, so each is announced once.
    pub fn replace_all(&mut self, fresh: Vec<Notification>) -> Vec<Notification> {
        let previously_unread: HashSet<&str> = self
            .items
            .iter()
            .filter(|n| !n.read)
            .map(|n| n.id.as_str())
            .collect();
        let announced: Vec<Notification> = fresh
            .iter()
            .filter(|n| !n.read && !previously_unread.contains(n.id.as_str()))
            .cloned()
            .collect();
        self.items = fresh;
        announced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notif(id: &str, read: bool) -> Notification {
        Notification {
            id: id.into(),
            message: format!("message {id}"),
            read,
            created_at: None,
            task: None,
            actor: None,
        }
    }

    fn center() -> NotificationCenter {
        NotificationCenter::new(vec![notif("a", false), notif("b", true), notif("c", false)])
    }

    #[test]
    fn mark_read_and_rollback() {
        let mut nc = center();
        let rb = nc.mark_read("a").unwrap();
        assert_eq!(nc.unread_count(), 1);
        nc.rollback(rb);
        assert_eq!(nc.unread_count(), 2);
    }

    #[test]
    fn mark_all_and_rollback_restores_each_flag() {
        let mut nc = center();
        let rb = nc.mark_all_read();
        assert_eq!(nc.unread_count(), 0);
        nc.rollback(rb);
        let flags: Vec<bool> = nc.items().iter().map(|n| n.read).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn unknown_ids() {
        let mut nc = center();
        assert!(matches!(nc.mark_read("zz"), Err(NotificationError::NotFound(_))));
        assert!(nc.remove("zz").is_err());
        assert_eq!(nc.remove("b").unwrap().id, "b");
        assert_eq!(nc.items().len(), 2);
    }

    #[test]
    fn poll_announces_only_new_unread() {
        let mut nc = center();
        let fresh = vec![notif("a", false), notif("b", false), notif("d", false), notif("c", true)];
        let announced: Vec<String> = nc.replace_all(fresh).into_iter().map(|n| n.id).collect();
        assert_eq!(announced, vec!["b", "d"]);
        assert_eq!(nc.unread_count(), 3);
    }

    #[test]
    fn first_poll_announces_all_unread() {
        let mut nc = NotificationCenter::default();
        assert_eq!(nc.replace_all(vec![notif("x", false), notif("y", true)]).len(), 1);
    }
}
