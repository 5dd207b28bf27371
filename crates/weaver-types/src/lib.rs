pub mod message;
pub mod project;
pub mod session;
pub mod config;
pub mod event;
pub mod error;

#[cfg(test)]
mod tests;

pub use error::WeaverError;
pub type Result<T> = std::result::Result<T, WeaverError>;
