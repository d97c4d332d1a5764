//! Hibiki Storage Library
//!
//! This crate provides the file store for uploaded audio: the `Storage` trait and
//! its local filesystem implementation.
//!
//! # Stored filename format
//!
//! Files live in a single flat directory. A stored filename is derived from the
//! uploaded name as `{sanitized stem}_{unix seconds}{ext}`, with `_{n}` appended
//! after the timestamp when that name is already taken. Keys must not contain path
//! separators or `..`.

pub mod local;
pub mod naming;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use naming::sanitize_filename;
pub use traits::{ByteStream, DeleteOutcome, Storage, StorageError, StorageResult};
