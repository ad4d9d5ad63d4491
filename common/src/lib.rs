pub mod error;
pub mod format;
pub mod models;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
