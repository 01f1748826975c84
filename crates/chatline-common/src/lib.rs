pub mod errors;

pub use errors::{ChatlineError, ConfigError};

pub type Result<T> = std::result::Result<T, ChatlineError>;
