pub mod comment;
pub mod config;
pub mod notification;
pub mod task;
pub mod user;

pub use comment::*;
pub use config::*;
pub use notification::*;
pub use task::*;
pub use user::*;
