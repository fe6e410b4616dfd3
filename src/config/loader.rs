//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::MonitorAppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading and settings updates.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_violations(.0))]
    Validation(Vec<ValidationError>),
}

fn format_violations(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<MonitorAppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: MonitorAppConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "request-monitor-test-{}.toml",
            uuid::Uuid::new_v4()
        ));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_valid_config() {
        let path = write_temp(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [tracking.parallel]
            barrier = 10
            "#,
        );
        let config = load_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.tracking.parallel.barrier, 10);
    }

    #[test]
    fn test_load_rejects_invalid_settings() {
        let path = write_temp(
            r#"
            [tracking.long_running]
            threshold_ms = 0
            "#,
        );
        let result = load_config(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let path = write_temp("[tracking\nbroken");
        let result = load_config(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
