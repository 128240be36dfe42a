pub mod avatar;
pub mod time;
pub mod unicode;
