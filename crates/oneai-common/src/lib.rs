pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, OneAiError};
pub use id::{new_correlation_id, prefixed_id};
pub use types::Rect;

pub type Result<T> = std::result::Result<T, OneAiError>;
