//! Application state shared by all handlers.
//!
//! Built once in `setup::initialize_app` and handed to the router behind an `Arc`.
//! Holds nothing request-scoped: the pool, the two repositories, the file store and
//! immutable configuration.

use crate::flash::FlashCookies;
use hibiki_core::Config;
use hibiki_db::{AudioFileRepository, ShortUrlRepository};
use hibiki_storage::Storage;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub audio_files: AudioFileRepository,
    pub short_urls: ShortUrlRepository,
    pub storage: Arc<dyn Storage>,
    pub flash: FlashCookies,
}

impl AppState {
    pub fn new(config: Config, pool: SqlitePool, storage: Arc<dyn Storage>) -> Self {
        let flash = FlashCookies::new(config.secret_key.clone(), config.is_production());
        Self {
            audio_files: AudioFileRepository::new(pool.clone()),
            short_urls: ShortUrlRepository::new(pool.clone()),
            config,
            pool,
            storage,
            flash,
        }
    }
}
