pub mod config_io;
pub mod json_io;

pub use config_io::{LoadError, config_path, load_config};
