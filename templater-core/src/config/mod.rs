pub mod keys;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub use keys::{Command, KeyMap, KeysConfig};

pub const APP_NAME: &str = "templater";

fn config_dir() -> Option<PathBuf> {
    // Use ~/.config on both Linux and macOS (not ~/Library/Application Support)
    #[cfg(unix)]
    {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.is_empty()
        {
            return Some(PathBuf::from(xdg_config_home).join(APP_NAME));
        }
        dirs::home_dir().map(|home| home.join(".config").join(APP_NAME))
    }
    #[cfg(windows)]
    {
        dirs::config_dir().map(|dir| dir.join(APP_NAME))
    }
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Color theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Key binding configuration, one table per layer:
    /// ```toml
    /// [keys.editor]
    /// "C-x" = "save"
    /// "C-s" = "noop"
    /// ```
    /// To unbind an inherited key mapping, assign it to `noop`.
    #[serde(default)]
    pub keys: KeysConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Primary accent color (default: "magenta").
    #[serde(
        default = "ThemeConfig::default_accent",
        deserialize_with = "deserialize_color"
    )]
    pub accent: ThemeColor,
    /// Secondary accent color (default: "cyan").
    #[serde(
        default = "ThemeConfig::default_secondary",
        deserialize_with = "deserialize_color"
    )]
    pub secondary: ThemeColor,
    /// Success/positive color (default: "green").
    #[serde(
        default = "ThemeConfig::default_success",
        deserialize_with = "deserialize_color"
    )]
    pub success: ThemeColor,
    /// Error color (default: "red").
    #[serde(
        default = "ThemeConfig::default_error",
        deserialize_with = "deserialize_color"
    )]
    pub error: ThemeColor,
    /// Warning color (default: "yellow").
    #[serde(
        default = "ThemeConfig::default_warning",
        deserialize_with = "deserialize_color"
    )]
    pub warning: ThemeColor,
    /// Muted/dim text color (default: "gray").
    #[serde(
        default = "ThemeConfig::default_muted",
        deserialize_with = "deserialize_color"
    )]
    pub muted: ThemeColor,
    /// Border color (default: "gray").
    #[serde(
        default = "ThemeConfig::default_border",
        deserialize_with = "deserialize_color"
    )]
    pub border: ThemeColor,
    /// Title color (default: "blue").
    #[serde(
        default = "ThemeConfig::default_title",
        deserialize_with = "deserialize_color"
    )]
    pub title: ThemeColor,
    /// Hint/key binding color (default: "blue").
    #[serde(
        default = "ThemeConfig::default_hint",
        deserialize_with = "deserialize_color"
    )]
    pub hint: ThemeColor,
    /// Foreground color for highlighted/selected items (default: "white").
    #[serde(
        default = "ThemeConfig::default_highlight_fg",
        deserialize_with = "deserialize_color"
    )]
    pub highlight_fg: ThemeColor,
    /// Branches like `main`, `master` and `production` (default: "red").
    #[serde(
        default = "ThemeConfig::default_branch_production",
        deserialize_with = "deserialize_color"
    )]
    pub branch_production: ThemeColor,
    /// Branches like `develop`, `dev` and `staging` (default: "yellow").
    #[serde(
        default = "ThemeConfig::default_branch_stable",
        deserialize_with = "deserialize_color"
    )]
    pub branch_stable: ThemeColor,
    /// Branches prefixed with `feature/`, `fix/` and similar (default: "green").
    #[serde(
        default = "ThemeConfig::default_branch_feature",
        deserialize_with = "deserialize_color"
    )]
    pub branch_feature: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: Self::default_accent(),
            secondary: Self::default_secondary(),
            success: Self::default_success(),
            error: Self::default_error(),
            warning: Self::default_warning(),
            muted: Self::default_muted(),
            border: Self::default_border(),
            title: Self::default_title(),
            hint: Self::default_hint(),
            highlight_fg: Self::default_highlight_fg(),
            branch_production: Self::default_branch_production(),
            branch_stable: Self::default_branch_stable(),
            branch_feature: Self::default_branch_feature(),
        }
    }
}

impl ThemeConfig {
    fn default_accent() -> ThemeColor {
        ThemeColor::Named(NamedColor::Magenta)
    }
    fn default_secondary() -> ThemeColor {
        ThemeColor::Named(NamedColor::Cyan)
    }
    fn default_success() -> ThemeColor {
        ThemeColor::Named(NamedColor::Green)
    }
    fn default_error() -> ThemeColor {
        ThemeColor::Named(NamedColor::Red)
    }
    fn default_warning() -> ThemeColor {
        ThemeColor::Named(NamedColor::Yellow)
    }
    fn default_muted() -> ThemeColor {
        ThemeColor::Named(NamedColor::Gray)
    }
    fn default_border() -> ThemeColor {
        ThemeColor::Named(NamedColor::Gray)
    }
    fn default_title() -> ThemeColor {
        ThemeColor::Named(NamedColor::Blue)
    }
    fn default_hint() -> ThemeColor {
        ThemeColor::Named(NamedColor::Blue)
    }
    fn default_highlight_fg() -> ThemeColor {
        ThemeColor::Named(NamedColor::White)
    }
    fn default_branch_production() -> ThemeColor {
        ThemeColor::Named(NamedColor::Red)
    }
    fn default_branch_stable() -> ThemeColor {
        ThemeColor::Named(NamedColor::Yellow)
    }
    fn default_branch_feature() -> ThemeColor {
        ThemeColor::Named(NamedColor::Green)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl ThemeColor {
    /// `#rrggbb`, or one of the nine terminal colour names (`grey` is accepted
    /// for `gray`), case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some(Self::Rgb(channel(0)?, channel(2)?, channel(4)?));
        }
        let named = match s.to_ascii_lowercase().as_str() {
            "black" => NamedColor::Black,
            "red" => NamedColor::Red,
            "green" => NamedColor::Green,
            "yellow" => NamedColor::Yellow,
            "blue" => NamedColor::Blue,
            "magenta" => NamedColor::Magenta,
            "cyan" => NamedColor::Cyan,
            "white" => NamedColor::White,
            "gray" | "grey" => NamedColor::Gray,
            _ => return None,
        };
        Some(Self::Named(named))
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<ThemeColor, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ThemeColor::parse(&s).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid color '{s}': expected a named color (black, red, green, yellow, blue, magenta, cyan, white, gray/grey) or hex (#rrggbb)"
        ))
    })
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    Ok(config)
}

/// Load `config.toml` from the user config directory. The file is optional.
pub fn load_config() -> Result<Config> {
    match config_file() {
        Some(path) => read_config_file(&path),
        None => Ok(Config::default()),
    }
}

/// Defaults when `path` does not exist; an unreadable or invalid file is an error
/// naming the path.
fn read_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        log::debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    load_config_from_str(&contents).with_context(|| format!("Invalid config at {}", path.display()))
}
