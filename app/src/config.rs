use directories::ProjectDirs;
use log::{error, info, warn};
use node_editor::EditorSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub window_size: [f32; 2],
    pub editor: EditorSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_size: [1280.0, 720.0],
            editor: EditorSettings::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

fn get_config_path() -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from("me", "liesegang", "transition_editor")?;
    let config_dir = proj_dirs.config_dir();
    if !config_dir.exists() {
        if let Err(e) = fs::create_dir_all(config_dir) {
            error!("Failed to create config directory: {}", e);
            return None;
        }
    }
    Some(config_dir.join("config.toml"))
}

/// Reads a config file. Unusable editor values fall back to the defaults.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let toml_str = fs::read_to_string(path)?;
    let mut config: AppConfig = toml::from_str(&toml_str)?;
    config.editor = config.editor.validated();
    Ok(config)
}

pub fn write_config(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let toml_str = toml::to_string_pretty(config)?;
    fs::write(path, toml_str)?;
    Ok(())
}

pub fn save_config(config: &AppConfig) {
    let Some(path) = get_config_path() else {
        return;
    };
    match write_config(&path, config) {
        Ok(()) => info!("Settings saved to {}", path.display()),
        Err(e) => error!("{}", e),
    }
}

/// Loads the settings file, falling back to defaults when it is missing or
/// broken.
pub fn load_config() -> AppConfig {
    if let Some(path) = get_config_path() {
        if path.exists() {
            match read_config(&path) {
                Ok(config) => return config,
                Err(e) => warn!("{}, using defaults", e),
            }
        }
    }
    AppConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_survives_toml() {
        let mut config = AppConfig::default();
        config.window_size = [800.0, 600.0];
        config.editor.show_grid = false;
        config.editor.max_zoom = 4.0;

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: AppConfig = toml::from_str("[editor]\ngrid_spacing = 25.0\n").unwrap();
        assert_eq!(parsed.window_size, [1280.0, 720.0]);
        assert_eq!(parsed.editor.grid_spacing, 25.0);
        assert_eq!(parsed.editor.min_zoom, EditorSettings::default().min_zoom);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("transition_editor_missing_config.toml");
        let _ = fs::remove_file(&path);
        assert!(matches!(read_config(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_write_then_read() {
        let path = std::env::temp_dir().join(format!(
            "transition_editor_config_{}.toml",
            std::process::id()
        ));
        let config = AppConfig::default();
        write_config(&path, &config).unwrap();
        assert_eq!(read_config(&path).unwrap(), config);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_read_replaces_nan_and_zero_zoom_limits() {
        let path = std::env::temp_dir().join(format!(
            "transition_editor_bad_zoom_{}.toml",
            std::process::id()
        ));
        fs::write(&path, "[editor]\nmin_zoom = 0.0\nmax_zoom = nan\n").unwrap();
        let config = read_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        let defaults = EditorSettings::default();
        assert_eq!(config.editor.min_zoom, defaults.min_zoom);
        assert_eq!(config.editor.max_zoom, defaults.max_zoom);
    }
}
