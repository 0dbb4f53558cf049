mod config;
mod error;
mod types;

pub use config::*;
pub use error::{Error, UnknownActionError};
pub use types::*;

pub type Result<T> = std::result::Result<T, Error>;
