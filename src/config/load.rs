//! Configuration loading from files and the environment.
//!
//! Values come from an optional YAML file, overridden by environment
//! variables such as `ARTICLEFMT_REVALIDATE__SECRET`.

use std::path::Path;

use ::config::{Config, Environment, File};

use super::{AppConfig, ConfigError};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "articlefmt.yaml";

const ENV_PREFIX: &str = "ARTICLEFMT";

impl AppConfig {
    /// Load the config from the command line argument, defaulting to
    /// `articlefmt.yaml`.
    ///
    /// An explicitly given file must exist; the default file is optional.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let required = config_file.is_some();
        let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        Self::load_from_file(&config_file, required)
    }

    /// Load the config from a file path, layering environment overrides on top.
    pub(crate) fn load_from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).required(required))
            .add_source(env_source())
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_missing_optional_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from_file(&dir.path().join("absent.yaml"), false).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.highlight.theme, "dracula");
        assert_eq!(config.revalidate.content_path, "/articles/{id}");
    }

    #[test]
    fn test_missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from_file(&dir.path().join("absent.yaml"), true);
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "server:\n  port: 8080\nhighlight:\n  theme: nord\nrevalidate:\n  secret: hunter2\n  content_path: /posts/{{id}}\n"
        )
        .unwrap();

        let config = AppConfig::load_from_file(file.path(), true).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.highlight.theme, "nord");
        assert_eq!(config.revalidate.secret.as_deref(), Some("hunter2"));
        assert_eq!(config.revalidate.content_page("x"), "/posts/x");
        assert_eq!(config.revalidate.tag_page("y"), "/tags/y");
    }

    #[test]
    fn test_invalid_file_fails_validation() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "revalidate:\n  tag_path: /tags\n").unwrap();

        let result = AppConfig::load_from_file(file.path(), true);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
