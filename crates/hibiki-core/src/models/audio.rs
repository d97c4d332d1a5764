use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// MIME type served for stored audio. Only `.mp3` uploads are accepted.
pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Metadata row for an uploaded audio file.
///
/// `filename` is the File Store key (sanitized and uniquified); `display_name` is
/// the name the client uploaded and the only one shown to users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AudioFile {
    pub id: i64,
    pub filename: String,
    pub display_name: String,
    pub upload_date: DateTime<Utc>,
}

impl AudioFile {
    pub fn play_path(&self) -> String {
        format!("/play/{}", self.id)
    }

    pub fn download_path(&self) -> String {
        format!("/download/{}", self.id)
    }

    pub fn delete_path(&self) -> String {
        format!("/delete/{}", self.id)
    }
}
