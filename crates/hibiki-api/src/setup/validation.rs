//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use hibiki_core::Config;

/// Validate critical configuration values
///
/// Fails fast on settings that would break the server at runtime or sign flash
/// cookies with a publicly known key in production.
pub fn validate_config(config: &Config) -> Result<()> {
    let is_production = config.is_production();

    // Validate database connection settings
    if config.db_max_connections == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if config.max_content_length == 0 {
        return Err(anyhow::anyhow!("MAX_CONTENT_LENGTH cannot be 0"));
    }

    if config.upload_folder.as_os_str().is_empty() {
        return Err(anyhow::anyhow!("UPLOAD_FOLDER cannot be empty"));
    }

    if config.uses_default_secret() {
        if is_production {
            return Err(anyhow::anyhow!(
                "SECRET_KEY is not set - flash cookies would be signed with the public default key"
            ));
        }
        tracing::warn!("Using the default SECRET_KEY - set SECRET_KEY before deploying");
    } else if is_production && config.secret_key.len() < 32 {
        tracing::warn!(
            "SECRET_KEY is shorter than 32 characters - consider using a longer, more secure secret"
        );
    }

    Ok(())
}
