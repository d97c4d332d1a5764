//! Table creation. Idempotent; there is no migration history.

use hibiki_core::AppError;
use sqlx::SqlitePool;

const CREATE_AUDIO_FILES: &str = r#"
    CREATE TABLE IF NOT EXISTS audio_files (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        filename VARCHAR(255) NOT NULL UNIQUE,
        display_name VARCHAR(255) NOT NULL,
        upload_date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_SHORT_URLS: &str = r#"
    CREATE TABLE IF NOT EXISTS short_urls (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        original_url VARCHAR(500) NOT NULL,
        short_code VARCHAR(10) NOT NULL UNIQUE,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Create the `audio_files` and `short_urls` tables if they do not exist yet.
#[tracing::instrument(skip(pool))]
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), AppError> {
    for statement in [CREATE_AUDIO_FILES, CREATE_SHORT_URLS] {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::debug!("Database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let pool = test_pool().await;
        ensure_schema(&pool).await.unwrap();
        ensure_schema(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('audio_files', 'short_urls') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, vec!["audio_files", "short_urls"]);
    }
}
