//! Audio file repository: CRUD for the audio_files table.

use chrono::Utc;
use hibiki_core::models::AudioFile;
use hibiki_core::AppError;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AudioFileRepository {
    pool: SqlitePool,
}

impl AudioFileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All audio files, newest upload first.
    #[tracing::instrument(skip(self), fields(db.table = "audio_files", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<AudioFile>, AppError> {
        let files = sqlx::query_as::<_, AudioFile>(
            r#"
            SELECT id, filename, display_name, upload_date
            FROM audio_files
            ORDER BY upload_date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(files)
    }

    /// Insert a record for a file already persisted under `filename`.
    #[tracing::instrument(skip(self), fields(db.table = "audio_files", db.operation = "insert"))]
    pub async fn create(&self, filename: &str, display_name: &str) -> Result<AudioFile, AppError> {
        let file = sqlx::query_as::<_, AudioFile>(
            r#"
            INSERT INTO audio_files (filename, display_name, upload_date)
            VALUES (?, ?, ?)
            RETURNING id, filename, display_name, upload_date
            "#,
        )
        .bind(filename)
        .bind(display_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(audio_id = file.id, "Audio file record created");
        Ok(file)
    }

    #[tracing::instrument(skip(self), fields(db.table = "audio_files", db.record_id = id))]
    pub async fn get(&self, id: i64) -> Result<Option<AudioFile>, AppError> {
        let file = sqlx::query_as::<_, AudioFile>(
            "SELECT id, filename, display_name, upload_date FROM audio_files WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(file)
    }

    /// Delete a record. Returns whether a row was removed.
    #[tracing::instrument(skip(self), fields(db.table = "audio_files", db.operation = "delete", db.record_id = id))]
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM audio_files WHERE id = ?")
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
    async fn test_create_and_get() {
        let repo = AudioFileRepository::new(test_pool().await);

        let created = repo.create("song_1700000000.mp3", "my song.mp3").await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.filename, "song_1700000000.mp3");
        assert_eq!(created.display_name, "my song.mp3");

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(repo.get(created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = AudioFileRepository::new(test_pool().await);

        let first = repo.create("a_1.mp3", "a.mp3").await.unwrap();
        let second = repo.create("b_2.mp3", "b.mp3").await.unwrap();
        let third = repo.create("c_3.mp3", "c.mp3").await.unwrap();

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn test_duplicate_filename_is_rejected() {
        let repo = AudioFileRepository::new(test_pool().await);

        repo.create("same_1.mp3", "same.mp3").await.unwrap();
        let err = repo.create("same_1.mp3", "same.mp3").await.unwrap_err();
        match err {
            AppError::Database(sqlx::Error::Database(db_err)) => {
                assert!(db_err.is_unique_violation())
            }
            other => panic!("Expected unique violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let repo = AudioFileRepository::new(test_pool().await);

        let file = repo.create("gone_1.mp3", "gone.mp3").await.unwrap();
        assert!(repo.delete(file.id).await.unwrap());
        assert!(!repo.delete(file.id).await.unwrap());
        assert!(repo.get(file.id).await.unwrap().is_none());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = AudioFileRepository::new(test_pool().await);

        let first = repo.create("x_1.mp3", "x.mp3").await.unwrap();
        repo.delete(first.id).await.unwrap();
        let second = repo.create("x_2.mp3", "x.mp3").await.unwrap();
        assert!(second.id > first.id);
    }
}
