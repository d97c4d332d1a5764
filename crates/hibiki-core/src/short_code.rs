//! Short code generation.
//!
//! Codes are drawn uniformly with replacement from the 62-character alphanumeric
//! alphabet. Uniqueness against stored codes is the caller's concern
//! (see `ShortUrlRepository::create_with_generated_code` in `hibiki-db`).

use rand::distr::Alphanumeric;
use rand::Rng;

pub const SHORT_CODE_LENGTH: usize = 6;

/// The alphabet codes are drawn from: `a-z`, `A-Z`, `0-9`.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Draw a random candidate code.
pub fn generate() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SHORT_CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Whether `code` has the shape of a generated short code.
pub fn is_valid(code: &str) -> bool {
    code.len() == SHORT_CODE_LENGTH && code.chars().all(|c| c.is_ascii_alphanumeric())
}
