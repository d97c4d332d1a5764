//! Hibiki database layer
//!
//! SQLite-backed repositories for the two record kinds: uploaded audio files and
//! short URLs. The schema is created on startup by `db::schema::ensure_schema`.

pub mod db;

pub use db::{ensure_schema, AudioFileRepository, ShortUrlRepository};
