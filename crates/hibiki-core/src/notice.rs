//! One-time user-facing notices shown on the next rendered page.
//!
//! Messages are Japanese, matching the listing page.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn uploaded() -> Self {
        Self::success("アップロードが完了しました")
    }

    pub fn shortened() -> Self {
        Self::success("URLを短縮しました")
    }

    pub fn audio_deleted() -> Self {
        Self::success("削除しました")
    }

    pub fn url_deleted() -> Self {
        Self::success("URLを削除しました")
    }

    /// Failure while removing an audio file; `detail` is appended after the prefix.
    pub fn delete_failed(detail: &str) -> Self {
        Self::error(format!("エラーが発生しました: {}", detail))
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
