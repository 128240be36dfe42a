//! Mention-aware text handling for comment threads.
//!
//! Comments travel to and from the API as plain text; a mention is nothing
//! more than an `@username` run inside that text. This module resolves those
//! runs against the task's participants for display, and drives the
//! suggestion popup while a mention is being typed.

pub mod autocomplete;
pub mod lookup;
pub mod tokenize;

pub use autocomplete::{AutocompleteController, AutocompleteState, TextboxId};
pub use lookup::{MentionLookup, build_lookup};
pub use tokenize::{TextSegment, mentioned_usernames, source_of, tokenize, tokenize_opt};
