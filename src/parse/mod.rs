pub mod comment_tree;
pub mod lenient;
pub mod wire;

pub use comment_tree::comment_tree;
pub use wire::{parse_activities, parse_notifications, parse_task, parse_tasks};
