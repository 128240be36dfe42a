use std::collections::HashSet;

use crate::model::UserRef;

/// Which text box on the task detail view is being typed into
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TextboxId {
    /// The new-comment box
    Comment,
    /// The reply box under the comment with this id
    Reply(String),
}

/// Suggestion popup state for the whole task detail view. At most one text
/// box owns the popup at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AutocompleteState {
    #[default]
    Idle,
    Suggesting {
        textbox: TextboxId,
        /// Lowercased text after the `@`
        query: String,
        candidates: Vec<UserRef>,
        /// Highlighted candidate index (meaningless when `candidates` is empty)
        selected: usize,
    },
}

impl AutocompleteState {
    pub fn is_open(&self) -> bool {
        matches!(self, AutocompleteState::Suggesting { .. })
    }

    pub fn active_textbox(&self) -> Option<&TextboxId> {
        match self {
            AutocompleteState::Suggesting { textbox, .. } => Some(textbox),
            AutocompleteState::Idle => None,
        }
    }

    pub fn candidates(&self) -> &[UserRef] {
        match self {
            AutocompleteState::Suggesting { candidates, .. } => candidates,
            AutocompleteState::Idle => &[],
        }
    }

    pub fn selected_candidate(&self) -> Option<&UserRef> {
        match self {
            AutocompleteState::Suggesting {
                candidates, selected, ..
            } => candidates.get(*selected),
            AutocompleteState::Idle => None,
        }
    }
}

/// The partial mention being typed at the end of `text`, lowercased and
/// without its `@`. `None` once the last token is finished (text ends in
/// whitespace) or does not start with `@`. A bare `@` yields `Some("")`.
pub fn active_query(text: &str) -> Option<String> {
    if text.is_empty() || text.ends_with(char::is_whitespace) {
        return None;
    }
    let last = text.split_whitespace().next_back()?;
    last.strip_prefix('@').map(str::to_lowercase)
}

/// Participants whose username contains `query` (case-insensitive), in
/// participant order, each person at most once. People are told apart by
/// id, or by lowercased username when the id is missing. An empty query
/// matches everyone with a username.
pub fn filter_candidates<'a, I>(participants: I, query: &str) -> Vec<UserRef>
where
    I: IntoIterator<Item = &'a UserRef>,
{
    let query = query.to_lowercase();
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for user in participants {
        let Some(username) = &user.username else {
            continue;
        };
        if !username.to_lowercase().contains(&query) {
            continue;
        }
        let key = if user.id.is_empty() {
            username.to_lowercase()
        } else {
            user.id.clone()
        };
        if seen.insert(key) {
            out.push(user.clone());
        }
    }
    out
}

/// Replace everything from the last `@` to the end of `text` with
/// `@username ` (a trailing space closes the token). Text with no `@` gets
/// the mention appended.
pub fn splice_mention(text: &str, username: &str) -> String {
    let head = match text.rfind('@') {
        Some(at) => &text[..at],
        None => text,
    };
    format!("{head}@{username} ")
}

/// Drives the suggestion popup from keystrokes. Candidate filtering is
/// purely local over the task's already-loaded participants.
#[derive(Debug, Clone, Default)]
pub struct AutocompleteController {
    state: AutocompleteState,
}

impl AutocompleteController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AutocompleteState {
        &self.state
    }

    /// Recompute suggestions after `text` changed in `textbox`. Opening for
    /// one box closes whatever other box held the popup.
    pub fn on_input<'a, I>(&mut self, textbox: TextboxId, text: &str, participants: I) -> &AutocompleteState
    where
        I: IntoIterator<Item = &'a UserRef>,
    {
        self.state = match active_query(text) {
            Some(query) => {
                let candidates = filter_candidates(participants, &query);
                tracing::debug!(?textbox, %query, matches = candidates.len(), "mention suggestions");
                AutocompleteState::Suggesting {
                    textbox,
                    query,
                    candidates,
                    selected: 0,
                }
            }
            None => AutocompleteState::Idle,
        };
        &self.state
    }

    /// Splice `user` into `text` and close the popup
    pub fn select(&mut self, text: &str, user: &UserRef) -> String {
        self.state = AutocompleteState::Idle;
        match &user.username {
            Some(username) => splice_mention(text, username),
            None => text.to_string(),
        }
    }

    /// Accept the highlighted candidate. `None` (and the popup closes) when
    /// there is nothing to accept.
    pub fn accept(&mut self, text: &str) -> Option<String> {
        let user = self.state.selected_candidate().cloned();
        match user {
            Some(user) => Some(self.select(text, &user)),
            None => {
                self.reset();
                None
            }
        }
    }

    pub fn select_next(&mut self) {
        if let AutocompleteState::Suggesting {
            candidates, selected, ..
        } = &mut self.state
            && !candidates.is_empty()
        {
            *selected = (*selected + 1) % candidates.len();
        }
    }

    pub fn select_prev(&mut self) {
        if let AutocompleteState::Suggesting {
            candidates, selected, ..
        } = &mut self.state
            && !candidates.is_empty()
        {
            *selected = (*selected + candidates.len() - 1) % candidates.len();
        }
    }

    /// Close the popup (tab switch, modal close, submit)
    pub fn reset(&mut self) {
        self.state = AutocompleteState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn people() -> Vec<UserRef> {
        vec![
            UserRef::new("1", "alice", "alice@x.com"),
            UserRef::new("2", "albert", "albert@x.com"),
            UserRef::new("3", "bob", "bob@x.com"),
        ]
    }

    fn names(state: &AutocompleteState) -> Vec<&str> {
        state
            .candidates()
            .iter()
            .filter_map(|u| u.username.as_deref())
            .collect()
    }

    #[test]
    fn filters_by_partial_in_order() {
        let people = people();
        let mut ac = AutocompleteController::new();
        let state = ac.on_input(TextboxId::Comment, "@al", &people);
        assert_eq!(names(state), vec!["alice", "albert"]);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let people = people();
        let mut ac = AutocompleteController::new();
        ac.on_input(TextboxId::Comment, "hey @BER", &people);
        assert_eq!(names(ac.state()), vec!["albert"]);
    }

    #[test]
    fn bare_at_offers_everyone() {
        let people = people();
        let mut ac = AutocompleteController::new();
        ac.on_input(TextboxId::Comment, "thanks @", &people);
        assert_eq!(names(ac.state()), vec!["alice", "albert", "bob"]);
    }

    #[test]
    fn no_match_stays_open() {
        let people = people();
        let mut ac = AutocompleteController::new();
        ac.on_input(TextboxId::Comment, "@zed", &people);
        assert!(ac.state().is_open());
        assert!(ac.state().candidates().is_empty());
    }

    #[test]
    fn closes_when_token_finished_or_removed() {
        let people = people();
        let mut ac = AutocompleteController::new();
        ac.on_input(TextboxId::Comment, "hey @al", &people);
        assert!(ac.state().is_open());
        ac.on_input(TextboxId::Comment, "hey @al ", &people);
        assert_eq!(ac.state(), &AutocompleteState::Idle);
        ac.on_input(TextboxId::Comment, "hey @al", &people);
        ac.on_input(TextboxId::Comment, "hey al", &people);
        assert!(!ac.state().is_open());
    }

    #[test]
    fn duplicate_participants_listed_once() {
        let alice = UserRef::new("1", "alice", "alice@x.com");
        let participants = [&alice, &alice];
        let candidates = filter_candidates(participants, "a");
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn participants_without_username_are_not_candidates() {
        let mut anon = UserRef::new("9", "x", "anon@x.com");
        anon.username = None;
        assert!(filter_candidates([&anon], "").is_empty());
    }

    #[test]
    fn id_less_participants_kept_apart_by_username() {
        let task = crate::parse::parse_task(
            r#"{"_id":"t1","assignedTo":[{"username":"alice"},{"username":"albert"},{"username":"bob"},{"username":"ALICE"}]}"#,
        )
        .unwrap();
        let mut ac = AutocompleteController::new();
        ac.on_input(TextboxId::Comment, "@al", task.participants());
        assert_eq!(names(ac.state()), vec!["alice", "albert"]);
    }

    #[test]
    fn selection_splices_and_closes() {
        let people = people();
        let mut ac = AutocompleteController::new();
        ac.on_input(TextboxId::Comment, "hey @al", &people);
        let albert = people[1].clone();
        let text = ac.select("hey @al", &albert);
        assert_eq!(text, "hey @albert ");
        assert!(!ac.state().is_open());
    }

    #[test]
    fn one_popup_across_textboxes() {
        let people = people();
        let mut ac = AutocompleteController::new();
        ac.on_input(TextboxId::Comment, "@a", &people);
        ac.on_input(TextboxId::Reply("c1".into()), "@bo", &people);
        assert_eq!(ac.state().active_textbox(), Some(&TextboxId::Reply("c1".into())));
        assert_eq!(names(ac.state()), vec!["bob"]);
    }

    #[test]
    fn keyboard_navigation_and_accept() {
        let people = people();
        let mut ac = AutocompleteController::new();
        ac.on_input(TextboxId::Comment, "@al", &people);
        ac.select_next();
        assert_eq!(ac.state().selected_candidate().unwrap().id, "2");
        ac.select_next();
        assert_eq!(ac.state().selected_candidate().unwrap().id, "1");
        ac.select_prev();
        assert_eq!(ac.accept("@al").as_deref(), Some("@albert "));
        assert_eq!(ac.accept("@al"), None);
    }

    #[test]
    fn splice_without_at_appends() {
        assert_eq!(splice_mention("hello ", "bob"), "hello @bob ");
        assert_eq!(splice_mention("a@b @c", "dan"), "a@b @dan ");
    }

    #[test]
    fn active_query_rules() {
        assert_eq!(active_query(""), None);
        assert_eq!(active_query("@"), Some(String::new()));
        assert_eq!(active_query("hi @Al"), Some("al".into()));
        assert_eq!(active_query("hi @al\n"), None);
        assert_eq!(active_query("hi al"), None);
    }
}
