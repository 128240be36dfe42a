pub mod activity_format;
pub mod board_ops;
pub mod comment_ops;
pub mod invitation_ops;
pub mod notification_ops;
pub mod task_ops;
