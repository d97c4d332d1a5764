//! Hibiki API Library
//!
//! This crate provides the HTTP handlers, page rendering, flash notices, and
//! application setup for the audio library and URL shortener.

// Module declarations
mod handlers;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod flash;
pub mod setup;
pub mod state;
pub mod views;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use flash::{FlashCookies, FlashRedirect, FLASH_COOKIE};
pub use state::AppState;
