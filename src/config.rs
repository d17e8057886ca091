//! UI Configuration
//!
//! Fonts, menu size and palette for the skin, loaded from JSON. Everything
//! has a default, so a config file only needs the fields it changes:
//!
//! ```json
//! {
//!     "title_font": { "path": "assets/fonts/title.ttf", "size": 96 },
//!     "style": { "menu_width": 1100, "colour_title_bar": [0.8, 0.2, 0.1, 0.9] }
//! }
//! ```
//!
//! Lookup order for [`Config::load_or_default`]: the explicit path, then the
//! per-user override file, then built-in defaults.

use crate::error::UiError;
use crate::host::ColorF;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One font the host should register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    /// TrueType/OpenType file loaded into imgui's font atlas; `None` uses
    /// imgui's built-in face
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Pixel size at 1080p before the per-frame font scale
    pub size: f32,
}

impl FontConfig {
    pub fn builtin(size: f32) -> Self {
        FontConfig { path: None, size }
    }
}

/// Menu dimensions (virtual units) and palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Menu box width on the 1920x1080 virtual canvas
    pub menu_width: i32,

    /// Menu box height on the 1920x1080 virtual canvas
    pub menu_height: i32,

    pub colour_text: ColorF,
    pub colour_disabled_text: ColorF,

    /// Window background when no backdrop texture is drawn
    pub colour_untextured_window: ColorF,

    /// Tint for the backdrop texture; zero alpha disables the backdrop
    pub colour_textured_window: ColorF,

    /// Title bar fill; zero alpha disables the bar
    pub colour_title_bar: ColorF,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            menu_width: 1000,
            menu_height: 600,
            colour_text: ColorF::new(1.0, 1.0, 1.0, 1.0),
            colour_disabled_text: ColorF::new(0.27, 0.27, 0.27, 1.0),
            colour_untextured_window: ColorF::new(0.11, 0.11, 0.13, 0.94),
            colour_textured_window: ColorF::new(1.0, 1.0, 1.0, 0.6),
            colour_title_bar: ColorF::new(1.0, 0.39, 0.0, 0.8),
        }
    }
}

/// Everything the skin needs at init time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title_font: FontConfig,
    pub item_font: FontConfig,
    pub small_item_font: FontConfig,
    pub style: StyleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            title_font: FontConfig::builtin(96.0),
            item_font: FontConfig::builtin(64.0),
            small_item_font: FontConfig::builtin(48.0),
            style: StyleConfig::default(),
        }
    }
}

impl Config {
    /// Reads a JSON config file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, UiError> {
        let json = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Writes the config as pretty JSON, creating parent directories
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), UiError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Per-user override location, e.g. `~/.config/game_ui/config.json`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("game_ui").join("config.json"))
    }

    /// Loads `path` if it exists, else the user override, else defaults
    ///
    /// A file that exists but fails to parse is an error; missing files are not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, UiError> {
        let candidates = path
            .map(Path::to_path_buf)
            .into_iter()
            .chain(Self::user_config_path());

        for candidate in candidates {
            if candidate.is_file() {
                log::info!("Loading UI config from {}", candidate.display());
                return Self::load_from_file(&candidate);
            }
            log::debug!("No UI config at {}", candidate.display());
        }

        log::info!("Using built-in UI config");
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.style.menu_width, 1000);
        assert_eq!(config.style.menu_height, 600);
        assert!(config.title_font.path.is_none());
        assert!(config.title_font.size > config.small_item_font.size);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "item_font": { "size": 40 },
            "style": { "menu_width": 1200, "colour_title_bar": [0.0, 0.0, 0.0, 0.0] }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.item_font, FontConfig::builtin(40.0));
        assert_eq!(config.style.menu_width, 1200);
        assert_eq!(config.style.menu_height, 600);
        assert_eq!(config.style.colour_title_bar.a, 0.0);
        assert_eq!(config.title_font, Config::default().title_font);
    }

    #[test]
    fn test_bad_color_is_config_error() {
        let json = r#"{ "style": { "colour_text": [1.0, 1.0] } }"#;
        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("game_ui_config_test_{}", std::process::id()));
        let path = dir.join("nested").join("config.json");

        let mut config = Config::default();
        config.style.menu_height = 720;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);

        let picked = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(picked.style.menu_height, 720);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/config/game_ui.json");
        let config = Config::load_from_file(path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Config::load_from_file("/definitely/not/here/config.json");
        assert!(matches!(result, Err(UiError::Io(_))));
    }
}
