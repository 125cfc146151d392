//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a TOML file without semantic checks.
pub fn read_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    resolve_config(Some(path), None)
}

/// Build the startup config: file (or defaults), then the bind override,
/// then a single validation of the result.
pub fn resolve_config(
    path: Option<&Path>,
    bind_override: Option<&str>,
) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = bind_override {
        config.listener.bind_address = bind.to_string();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_valid_file() {
        let file = write_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [upstream]
            user_agent = "test-agent/1.0"
            "#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.upstream.user_agent, "test-agent/1.0");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/frame-proxy.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let file = write_config("[listener\nbind_address = ");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn semantic_problems_are_reported() {
        let file = write_config("[upstream]\ntimeout_secs = 0\n");
        let err = load_config(file.path()).unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors[0].field, "upstream.timeout_secs");
            }
            other => panic!("expected validation error, got {other}"),
        }
        assert!(load_config(file.path())
            .unwrap_err()
            .to_string()
            .starts_with("Validation failed: upstream.timeout_secs"));
    }

    #[test]
    fn bind_override_replaces_invalid_file_value() {
        let file = write_config("[listener]\nbind_address = \"not-an-addr\"\n");
        assert!(matches!(load_config(file.path()), Err(ConfigError::Validation(_))));

        let config = resolve_config(Some(file.path()), Some("127.0.0.1:7001")).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:7001");
    }

    #[test]
    fn bad_bind_override_is_reported_once() {
        let err = resolve_config(None, Some("nowhere")).unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "listener.bind_address");
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn read_config_skips_semantic_checks() {
        let file = write_config("[upstream]\ntimeout_secs = 0\n");
        let config = read_config(file.path()).unwrap();
        assert_eq!(config.upstream.timeout_secs, 0);
    }
}
