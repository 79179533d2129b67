pub mod message;
pub mod session;
pub mod protocol;
pub mod config;
pub mod error;


pub use error::WidgetError;
pub type Result<T> = std::result::Result<T, WidgetError>;
