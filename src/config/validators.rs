//! Startup validation of the static configuration

use super::StaticConfig;
use crate::errors::{Result, TextCopyError};

const LOG_FORMATS: &[&str] = &["text", "json"];

impl StaticConfig {
    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(TextCopyError::config("server.port must be between 1 and 65535"));
        }
        if self.server.cpu_count == 0 {
            return Err(TextCopyError::config("server.cpu_count must be at least 1"));
        }
        if self.store.ttl_secs == 0 {
            return Err(TextCopyError::config("store.ttl_secs must be greater than 0"));
        }
        if self.store.sweep_interval_secs == 0 {
            return Err(TextCopyError::config(
                "store.sweep_interval_secs must be greater than 0",
            ));
        }
        validate_api_prefix(&self.frontend.api_prefix)?;
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(TextCopyError::config(format!(
                "logging.format must be one of {:?}, got '{}'",
                LOG_FORMATS, self.logging.format
            )));
        }
        Ok(())
    }
}

fn validate_api_prefix(prefix: &str) -> Result<()> {
    if !prefix.starts_with('/') {
        return Err(TextCopyError::config(format!(
            "frontend.api_prefix must start with '/', got '{}'",
            prefix
        )));
    }
    if prefix.len() > 1 && prefix.ends_with('/') {
        return Err(TextCopyError::config(format!(
            "frontend.api_prefix must not end with '/', got '{}'",
            prefix
        )));
    }
    Ok(())
}
