//! Short URL repository: CRUD for the short_urls table plus code allocation.

use chrono::Utc;
use hibiki_core::models::ShortUrl;
use hibiki_core::{short_code, AppError};
use sqlx::SqlitePool;

/// Draw-and-insert rounds before a `short_code` conflict is given up on.
pub const MAX_INSERT_ATTEMPTS: u32 = 5;

#[derive(Clone)]
pub struct ShortUrlRepository {
    pool: SqlitePool,
}

impl ShortUrlRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All short URLs, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "short_urls", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<ShortUrl>, AppError> {
        let urls = sqlx::query_as::<_, ShortUrl>(
            r#"
            SELECT id, original_url, short_code, created_at
            FROM short_urls
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(urls)
    }

    #[tracing::instrument(skip(self), fields(db.table = "short_urls", db.operation = "insert"))]
    pub async fn create(&self, original_url: &str, short_code: &str) -> Result<ShortUrl, AppError> {
        let url = sqlx::query_as::<_, ShortUrl>(
            r#"
            INSERT INTO short_urls (original_url, short_code, created_at)
            VALUES (?, ?, ?)
            RETURNING id, original_url, short_code, created_at
            "#,
        )
        .bind(original_url)
        .bind(short_code)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(url)
    }

    #[tracing::instrument(skip(self), fields(db.table = "short_urls", db.record_id = id))]
    pub async fn get(&self, id: i64) -> Result<Option<ShortUrl>, AppError> {
        let url = sqlx::query_as::<_, ShortUrl>(
            "SELECT id, original_url, short_code, created_at FROM short_urls WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(url)
    }

    #[tracing::instrument(skip(self), fields(db.table = "short_urls"))]
    pub async fn get_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        let url = sqlx::query_as::<_, ShortUrl>(
            "SELECT id, original_url, short_code, created_at FROM short_urls WHERE short_code = ?",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(url)
    }

    #[tracing::instrument(skip(self), fields(db.table = "short_urls"))]
    pub async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM short_urls WHERE short_code = ?")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Allocate a fresh short code for `original_url` and insert the mapping.
    ///
    /// A code is drawn until one is not already stored. If the insert still hits
    /// `UNIQUE(short_code)` because another request took the code in between, the
    /// draw and insert are repeated, up to `MAX_INSERT_ATTEMPTS` times.
    #[tracing::instrument(skip(self), fields(db.table = "short_urls", db.operation = "insert"))]
    pub async fn create_with_generated_code(&self, original_url: &str) -> Result<ShortUrl, AppError> {
        self.create_with_codes(original_url, short_code::generate)
            .await
    }

    pub(crate) async fn create_with_codes(
        &self,
        original_url: &str,
        next_code: impl FnMut() -> String,
    ) -> Result<ShortUrl, AppError> {
        self.insert_retrying(original_url, next_code, true).await
    }

    /// With `skip_taken` off every drawn code goes straight to the insert, which is
    /// what a request losing the race between lookup and insert sees.
    async fn insert_retrying(
        &self,
        original_url: &str,
        mut next_code: impl FnMut() -> String,
        skip_taken: bool,
    ) -> Result<ShortUrl, AppError> {
        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let code = if skip_taken {
                self.unused_code(&mut next_code).await?
            } else {
                next_code()
            };

            match self.create(original_url, &code).await {
                Ok(url) => {
                    tracing::debug!(short_code = %url.short_code, attempt, "Short URL created");
                    return Ok(url);
                }
                Err(AppError::Database(sqlx::Error::Database(db_err)))
                    if db_err.is_unique_violation() =>
                {
                    tracing::warn!(
                        short_code = %code,
                        attempt,
                        max_attempts = MAX_INSERT_ATTEMPTS,
                        "Short code taken concurrently, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::Internal(format!(
            "Could not allocate a unique short code after {} attempts",
            MAX_INSERT_ATTEMPTS
        )))
    }

    async fn unused_code(&self, next_code: &mut impl FnMut() -> String) -> Result<String, AppError> {
        loop {
            let code = next_code();
            if !self.code_exists(&code).await? {
                return Ok(code);
            }
            tracing::debug!(short_code = %code, "Short code already in use, drawing again");
        }
    }

    /// Delete a mapping. Returns whether a row was removed.
    #[tracing::instrument(skip(self), fields(db.table = "short_urls", db.operation = "delete", db.record_id = id))]
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM short_urls WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = ShortUrlRepository::new(test_pool().await);

        let created = repo.create("https://example.com", "aB3xY9").await.unwrap();
        assert_eq!(created.original_url, "https://example.com");
        assert_eq!(created.short_code, "aB3xY9");

        assert_eq!(repo.get(created.id).await.unwrap().unwrap(), created);
        assert_eq!(repo.get_by_code("aB3xY9").await.unwrap().unwrap(), created);
        assert!(repo.get_by_code("zzzzzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_code_lookup_is_case_sensitive() {
        let repo = ShortUrlRepository::new(test_pool().await);

        repo.create("https://example.com", "abcdef").await.unwrap();
        assert!(repo.code_exists("abcdef").await.unwrap());
        assert!(!repo.code_exists("ABCDEF").await.unwrap());
        assert!(repo.get_by_code("ABCDEF").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_code_is_rejected_by_constraint() {
        let repo = ShortUrlRepository::new(test_pool().await);

        repo.create("https://a.example", "dup123").await.unwrap();
        let err = repo.create("https://b.example", "dup123").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Database(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation()
        ));
    }

    #[tokio::test]
    async fn test_generated_code_has_expected_shape() {
        let repo = ShortUrlRepository::new(test_pool().await);

        let url = repo
            .create_with_generated_code("https://example.com")
            .await
            .unwrap();
        assert!(short_code::is_valid(&url.short_code));
        assert_eq!(url.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_taken_codes_are_skipped() {
        let repo = ShortUrlRepository::new(test_pool().await);
        repo.create("https://taken.example", "AAAAAA").await.unwrap();

        let mut candidates = vec!["BBBBBB".to_string(), "AAAAAA".to_string()];
        let url = repo
            .create_with_codes("https://new.example", || candidates.pop().unwrap())
            .await
            .unwrap();

        assert_eq!(url.short_code, "BBBBBB");
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_insert_conflict_is_retried_with_new_code() {
        let repo = ShortUrlRepository::new(test_pool().await);
        repo.create("https://taken.example", "AAAAAA").await.unwrap();

        let mut candidates = vec!["BBBBBB".to_string(), "AAAAAA".to_string()];
        let url = repo
            .insert_retrying("https://new.example", || candidates.pop().unwrap(), false)
            .await
            .unwrap();

        assert_eq!(url.short_code, "BBBBBB");
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_insert_conflicts_give_up_after_max_attempts() {
        let repo = ShortUrlRepository::new(test_pool().await);
        repo.create("https://taken.example", "AAAAAA").await.unwrap();

        let mut draws = 0;
        let err = repo
            .insert_retrying(
                "https://new.example",
                || {
                    draws += 1;
                    "AAAAAA".to_string()
                },
                false,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(draws, MAX_INSERT_ATTEMPTS);
        let urls = repo.list().await.unwrap();
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].original_url, "https://taken.example");
    }

    #[tokio::test]
    async fn test_many_generated_codes_are_distinct() {
        let repo = ShortUrlRepository::new(test_pool().await);

        for i in 0..50 {
            repo.create_with_generated_code(&format!("https://example.com/{}", i))
                .await
                .unwrap();
        }

        let urls = repo.list().await.unwrap();
        let codes: std::collections::HashSet<_> = urls.iter().map(|u| &u.short_code).collect();
        assert_eq!(urls.len(), 50);
        assert_eq!(codes.len(), 50);
        assert_eq!(urls[0].original_url, "https://example.com/49");
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let repo = ShortUrlRepository::new(test_pool().await);

        let url = repo.create("https://example.com", "del123").await.unwrap();
        assert!(repo.delete(url.id).await.unwrap());
        assert!(!repo.delete(url.id).await.unwrap());
        assert!(repo.get_by_code("del123").await.unwrap().is_none());
    }
}
