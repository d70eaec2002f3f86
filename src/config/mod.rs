//! Configuration loading and types for articlefmt.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Loading configs from files and the environment (`load`)

mod load;
mod types;

// Re-export all types for convenient access
pub use load::DEFAULT_CONFIG_FILE;
pub use types::{
    AppConfig, HighlightConfig, ID_PLACEHOLDER, MarkdownConfig, RevalidateConfig, ServerConfig,
};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] ::config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("{0}")]
    Validation(String),
}

impl AppConfig {
    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let revalidate = &self.revalidate;
        for (field, template) in [
            ("revalidate.content_path", &revalidate.content_path),
            ("revalidate.tag_path", &revalidate.tag_path),
        ] {
            if !template.starts_with('/') || !template.contains(ID_PLACEHOLDER) {
                return Err(ConfigError::Validation(format!(
                    "invalid config: '{field}' must start with '/' and contain '{ID_PLACEHOLDER}' (got '{template}')"
                )));
            }
        }

        if let Some(path) = revalidate.static_paths.iter().find(|p| !p.starts_with('/')) {
            return Err(ConfigError::Validation(format!(
                "invalid config: 'revalidate.static_paths' entries must start with '/' (got '{path}')"
            )));
        }

        Ok(())
    }
}
