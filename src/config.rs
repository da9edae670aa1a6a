//! Configuration and color scheme management for tosh.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.tosh/config.toml`
//! - Built-in color schemes for window borders and the status bar
//!
//! # Configuration File
//!
//! ```toml
//! # Color scheme: default, nord, gruvbox-dark, tokyo-night
//! color_scheme = "nord"
//!
//! # Log filter (overridden by RUST_LOG and --log)
//! log_level = "debug"
//!
//! [shell]
//! prompt = "> "
//! priority = 5
//!
//! [pong]
//! priority = 5
//! frame_ms = 80
//!
//! [window]
//! x = 10
//! y = 3
//! width = 50
//! height = 17
//! cascade = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::session::ShellOptions;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color scheme name
    pub color_scheme: String,
    /// Default log filter
    pub log_level: String,
    /// Shell settings
    pub shell: ShellConfig,
    /// Pong demo settings
    pub pong: PongConfig,
    /// Window placement
    pub window: WindowConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_scheme: "default".to_string(),
            log_level: "info".to_string(),
            shell: ShellConfig::default(),
            pong: PongConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

/// Shell settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub prompt: String,
    pub priority: u8,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            priority: 5,
        }
    }
}

/// Pong demo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongConfig {
    pub priority: u8,
    /// Delay between frames in milliseconds
    pub frame_ms: u64,
}

impl Default for PongConfig {
    fn default() -> Self {
        Self {
            priority: 5,
            frame_ms: 80,
        }
    }
}

/// Where shell windows open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    /// Offset each new window so earlier ones stay visible
    pub cascade: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            x: 10,
            y: 3,
            width: 50,
            height: 17,
            cascade: true,
        }
    }
}

impl Config {
    /// Load configuration from the default file, falling back to defaults
    pub fn load() -> Self {
        match Self::get_config_path() {
            Some(path) if path.exists() => Self::load_or_default(&path),
            _ => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults with a warning
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    /// Load configuration from `path`
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Get config file path
    fn get_config_path() -> Option<PathBuf> {
        tosh_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get the color scheme
    pub fn get_color_scheme(&self) -> ColorScheme {
        ColorScheme::by_name(&self.color_scheme)
    }

    /// Settings handed to every shell session
    pub fn shell_options(&self) -> ShellOptions {
        ShellOptions {
            prompt: self.shell.prompt.clone(),
            shell_priority: self.shell.priority,
            pong_priority: self.pong.priority,
        }
    }
}

/// Color definition (RGB)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to crossterm Color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Color scheme definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub name: String,

    // Window colors
    pub window_border: Color,
    pub window_border_active: Color,
    pub title_active_fg: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_scheme()
    }
}

impl ColorScheme {
    /// Default color scheme
    pub fn default_scheme() -> Self {
        Self {
            name: "default".to_string(),

            window_border: Color::new(80, 80, 80),
            window_border_active: Color::new(100, 150, 255),
            title_active_fg: Color::new(255, 255, 255),

            status_bar_bg: Color::new(0, 100, 0),
            status_bar_fg: Color::new(255, 255, 255),
        }
    }

    /// Nord scheme
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),

            window_border: Color::new(59, 66, 82),
            window_border_active: Color::new(136, 192, 208),
            title_active_fg: Color::new(236, 239, 244),

            status_bar_bg: Color::new(59, 66, 82),
            status_bar_fg: Color::new(216, 222, 233),
        }
    }

    /// Gruvbox Dark scheme
    pub fn gruvbox_dark() -> Self {
        Self {
            name: "gruvbox-dark".to_string(),

            window_border: Color::new(60, 56, 54),
            window_border_active: Color::new(215, 153, 33),
            title_active_fg: Color::new(235, 219, 178),

            status_bar_bg: Color::new(60, 56, 54),
            status_bar_fg: Color::new(235, 219, 178),
        }
    }

    /// Tokyo Night scheme
    pub fn tokyo_night() -> Self {
        Self {
            name: "tokyo-night".to_string(),

            window_border: Color::new(41, 46, 66),
            window_border_active: Color::new(122, 162, 247),
            title_active_fg: Color::new(192, 202, 245),

            status_bar_bg: Color::new(36, 40, 59),
            status_bar_fg: Color::new(169, 177, 214),
        }
    }

    /// Get scheme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "nord" => Self::nord(),
            "gruvbox-dark" | "gruvbox_dark" | "gruvbox" => Self::gruvbox_dark(),
            "tokyo-night" | "tokyo_night" | "tokyonight" => Self::tokyo_night(),
            _ => Self::default_scheme(),
        }
    }

    /// List available schemes
    pub fn list() -> Vec<&'static str> {
        vec!["default", "nord", "gruvbox-dark", "tokyo-night"]
    }
}

/// `~/.tosh`, created on first use
pub fn tosh_dir() -> Option<PathBuf> {
    let home = home_dir()?;
    let dir = home.join(".tosh");
    if !dir.exists() {
        let _ = fs::create_dir_all(&dir);
    }
    Some(dir)
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.shell_options(), ShellOptions::default());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml_str(
            r#"
            color_scheme = "nord"

            [shell]
            prompt = "tos$ "

            [window]
            width = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.get_color_scheme().name, "nord");
        assert_eq!(config.shell.prompt, "tos$ ");
        assert_eq!(config.shell.priority, 5);
        assert_eq!(config.window.width, 60);
        assert_eq!(config.window.height, 17);
        assert_eq!(config.pong.frame_ms, 80);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let err = Config::from_toml_str("shell = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_scheme_falls_back() {
        assert_eq!(ColorScheme::by_name("nope").name, "default");
        for name in ColorScheme::list() {
            assert_eq!(ColorScheme::by_name(name).name, name);
        }
    }
}
