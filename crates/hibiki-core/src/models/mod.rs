pub mod audio;
pub mod short_url;

pub use audio::{AudioFile, AUDIO_CONTENT_TYPE};
pub use short_url::ShortUrl;
