//! Hibiki Core Library
//!
//! This crate provides the domain models, error types, configuration, and input
//! validation shared by the storage, database, and HTTP crates.

pub mod config;
pub mod error;
pub mod models;
pub mod notice;
pub mod short_code;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{AudioFile, ShortUrl};
pub use notice::{Notice, NoticeLevel};
