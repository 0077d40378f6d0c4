//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use storyline::{StorylineError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for StorylineError {
    fn from(err: ConfigError) -> Self {
        StorylineError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (storyline/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or holds invalid style values
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, StorylineError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("storyline/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("org", "storyline", "storyline") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, StorylineError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;

    Ok(config)
}

/// Rejects style values that would only fail later, at render time.
fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let style = config.style();
    style.background_color().map_err(ConfigError::Validation)?;
    style.palette().map_err(ConfigError::Validation)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use storyline::layout::GapPolicy;
    use tempfile::NamedTempFile;

    use super::*;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_explicit_path_is_loaded() {
        let file = config_file("[layout]\nmax_passes = 3\ngaps = \"reserve\"\n");

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.layout().max_passes(), 3);
        assert_eq!(config.layout().gaps(), GapPolicy::Reserve);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let result = load_config(Some("/nonexistent/storyline.toml"));
        assert!(matches!(result, Err(StorylineError::Config(_))));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let file = config_file("[layout\n");

        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(StorylineError::Config(_))));
    }

    #[test]
    fn test_invalid_palette_fails_validation() {
        let file = config_file("[style]\npalette = [\"#zzzzzz\"]\n");

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Validation error"));
    }
}
