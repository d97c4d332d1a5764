//! Input validation for uploads and URL shortening.
//!
//! Validation produces tagged results: the accepted value, or an enumerated error
//! kind that the HTTP layer turns into a flash notice.

use crate::notice::Notice;

/// Only files with this extension (case-insensitive) are accepted.
pub const AUDIO_EXTENSION: &str = ".mp3";

/// Longest destination URL the `short_urls` table stores.
pub const MAX_URL_LENGTH: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadValidationError {
    #[error("no file part in request")]
    MissingFile,

    #[error("no file selected")]
    NoFileSelected,

    #[error("not an mp3 file: {0}")]
    NotMp3(String),
}

impl UploadValidationError {
    pub fn notice(&self) -> Notice {
        match self {
            UploadValidationError::MissingFile => Notice::error("ファイルがありません"),
            UploadValidationError::NoFileSelected => Notice::error("ファイルが選択されていません"),
            UploadValidationError::NotMp3(_) => Notice::error("MP3ファイルのみアップロード可能です"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("url is empty")]
    Empty,

    #[error("url is {len} characters long (max: {max})")]
    TooLong { len: usize, max: usize },
}

impl UrlValidationError {
    pub fn notice(&self) -> Notice {
        match self {
            UrlValidationError::Empty => Notice::error("URLを入力してください"),
            UrlValidationError::TooLong { .. } => Notice::error("URLが長すぎます"),
        }
    }
}

/// Check the client-supplied filename of an audio upload.
pub fn validate_audio_filename(filename: &str) -> Result<(), UploadValidationError> {
    if filename.is_empty() {
        return Err(UploadValidationError::NoFileSelected);
    }
    if !has_audio_extension(filename) {
        return Err(UploadValidationError::NotMp3(filename.to_string()));
    }
    Ok(())
}

fn has_audio_extension(filename: &str) -> bool {
    filename.to_lowercase().ends_with(AUDIO_EXTENSION)
}

/// Normalize a destination URL: trim, reject empty input, and prepend `https://`
/// unless the input already starts with `http://` or `https://` (any case).
pub fn normalize_url(raw: &str) -> Result<String, UrlValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let lower = trimmed.to_lowercase();
    let url = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let len = url.chars().count();
    if len > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong {
            len,
            max: MAX_URL_LENGTH,
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_audio_filename_accepts_mp3_any_case() {
        assert!(validate_audio_filename("song.mp3").is_ok());
        assert!(validate_audio_filename("SONG.MP3").is_ok());
        assert!(validate_audio_filename("mix.Mp3").is_ok());
        assert!(validate_audio_filename("曲.mp3").is_ok());
    }

    #[test]
    fn test_validate_audio_filename_rejects_other_extensions() {
        assert_eq!(
            validate_audio_filename("song.wav"),
            Err(UploadValidationError::NotMp3("song.wav".to_string()))
        );
        assert!(validate_audio_filename("song.mp3.exe").is_err());
        assert!(validate_audio_filename("mp3").is_err());
    }

    #[test]
    fn test_validate_audio_filename_rejects_empty() {
        assert_eq!(
            validate_audio_filename(""),
            Err(UploadValidationError::NoFileSelected)
        );
    }

    #[test]
    fn test_upload_errors_map_to_error_notices() {
        let notice = UploadValidationError::NotMp3("a.wav".to_string()).notice();
        assert!(notice.is_error());
        assert_eq!(notice.message, "MP3ファイルのみアップロード可能です");
        assert_eq!(
            UploadValidationError::MissingFile.notice().message,
            "ファイルがありません"
        );
    }

    #[test]
    fn test_normalize_url_prepends_https() {
        assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
        assert_eq!(
            normalize_url("  example.com/path?q=1 ").unwrap(),
            "https://example.com/path?q=1"
        );
    }

    #[test]
    fn test_normalize_url_keeps_explicit_scheme() {
        assert_eq!(normalize_url("http://example.com").unwrap(), "http://example.com");
        assert_eq!(normalize_url("https://example.com").unwrap(), "https://example.com");
        assert_eq!(normalize_url("HTTPS://Example.com").unwrap(), "HTTPS://Example.com");
    }

    #[test]
    fn test_normalize_url_rejects_empty() {
        assert_eq!(normalize_url(""), Err(UrlValidationError::Empty));
        assert_eq!(normalize_url("   "), Err(UrlValidationError::Empty));
    }

    #[test]
    fn test_normalize_url_rejects_overlong() {
        let long = format!("example.com/{}", "a".repeat(MAX_URL_LENGTH));
        match normalize_url(&long) {
            Err(UrlValidationError::TooLong { max, .. }) => assert_eq!(max, MAX_URL_LENGTH),
            other => panic!("Expected TooLong, got {:?}", other),
        }
    }
}
