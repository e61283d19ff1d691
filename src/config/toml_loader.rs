//! TOML configuration file parsing.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Load and deserialize a TOML config file.
///
/// A missing file deserializes as empty TOML, so every optional key takes
/// its default.
///
/// # Type Parameters
///
/// - `T`: Target type to deserialize into (must implement `DeserializeOwned`)
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file exists but cannot be read, and
/// [`ConfigError::InvalidSyntax`] if it cannot be parsed into `T`.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = if path.exists() {
        std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?
    } else {
        String::new()
    };

    toml::from_str(&content).map_err(|e| ConfigError::InvalidSyntax {
        file: path.display().to_string(),
        message: e.message().to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::RawParams;
    use crate::config::test_helpers::write_temp_toml;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let raw: RawParams = load_config(&dir.path().join("nonexistent.toml")).unwrap();
        assert_eq!(raw, RawParams::default());
    }

    #[test]
    fn empty_file_yields_defaults() {
        let (_dir, path) = write_temp_toml("");
        let raw: RawParams = load_config(&path).unwrap();
        assert_eq!(raw, RawParams::default());
    }

    #[test]
    fn type_error_reports_file() {
        let (_dir, path) = write_temp_toml("manage_user = \"yes\"\n");
        let err = load_config::<RawParams>(&path).unwrap_err();
        assert!(
            matches!(&err, ConfigError::InvalidSyntax { file, .. } if file.ends_with("config.toml")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn directory_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config::<RawParams>(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
