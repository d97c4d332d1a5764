//! Database repositories for data access layer
//!
//! One repository per table. Both tables are independent: no foreign keys and no
//! transaction spans the two.
//
// Table creation
pub mod schema;
//
// Audio file metadata
pub mod audio;
//
// Short URL mappings and code allocation
pub mod short_url;

pub use audio::AudioFileRepository;
pub use schema::ensure_schema;
pub use short_url::{ShortUrlRepository, MAX_INSERT_ATTEMPTS};

#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    // A memory database lives as long as its connection, so pin the pool to one.
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    ensure_schema(&pool).await.expect("Failed to create schema");
    pool
}
