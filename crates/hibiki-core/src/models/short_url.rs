use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ShortUrl {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

impl ShortUrl {
    /// Path that redirects to `original_url`
    pub fn redirect_path(&self) -> String {
        format!("/r/{}", self.short_code)
    }

    pub fn delete_path(&self) -> String {
        format!("/delete_url/{}", self.id)
    }
}
