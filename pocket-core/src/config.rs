use anyhow::Result;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const APP_NAME: &str = "pocket";

fn config_dir() -> PathBuf {
    // Use ~/.config on both Linux and macOS (not ~/Library/Application Support)
    #[cfg(unix)]
    {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.is_empty()
        {
            return PathBuf::from(xdg_config_home).join(APP_NAME);
        }
        dirs::home_dir()
            .expect("Unable to find home directory")
            .join(".config")
            .join(APP_NAME)
    }
    #[cfg(windows)]
    {
        dirs::config_dir()
            .expect("Unable to find config directory")
            .join(APP_NAME)
    }
}

fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub display: DisplayConfig,
    pub input: InputConfig,
    pub audio: AudioConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct DisplayConfig {
    /// Menu rows shown below the title.
    pub visible_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            visible_rows: crate::navigator::DEFAULT_VISIBLE_ROWS,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct InputConfig {
    /// Idle sleep between input polls in the menu loop.
    pub poll_interval_ms: u64,
}

impl InputConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct AudioConfig {
    /// Startup attenuation in tenths of a dB (0 = full scale).
    pub volume: i16,
    /// Whether background tracks loop.
    pub repeat: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: -100,
            repeat: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Title row color (default: "green").
    #[serde(
        default = "ThemeConfig::default_title",
        deserialize_with = "deserialize_color"
    )]
    pub title: ThemeColor,
    /// Item text color (default: "yellow").
    #[serde(
        default = "ThemeConfig::default_text",
        deserialize_with = "deserialize_color"
    )]
    pub text: ThemeColor,
    /// Foreground of the highlighted row (default: "yellow").
    #[serde(
        default = "ThemeConfig::default_highlight_fg",
        deserialize_with = "deserialize_color"
    )]
    pub highlight_fg: ThemeColor,
    /// Background of the highlighted row (default: "blue").
    #[serde(
        default = "ThemeConfig::default_highlight_bg",
        deserialize_with = "deserialize_color"
    )]
    pub highlight_bg: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            text: Self::default_text(),
            highlight_fg: Self::default_highlight_fg(),
            highlight_bg: Self::default_highlight_bg(),
        }
    }
}

impl ThemeConfig {
    fn default_title() -> ThemeColor {
        ThemeColor::Named(NamedColor::Green)
    }
    fn default_text() -> ThemeColor {
        ThemeColor::Named(NamedColor::Yellow)
    }
    fn default_highlight_fg() -> ThemeColor {
        ThemeColor::Named(NamedColor::Yellow)
    }
    fn default_highlight_bg() -> ThemeColor {
        ThemeColor::Named(NamedColor::Blue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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
    DarkGray,
}

impl NamedColor {
    /// All named colours in alphabetical order, as accepted by the config parser.
    pub const fn all() -> &'static [(&'static str, NamedColor)] {
        &[
            ("black", NamedColor::Black),
            ("blue", NamedColor::Blue),
            ("cyan", NamedColor::Cyan),
            ("darkgray", NamedColor::DarkGray),
            ("gray", NamedColor::Gray),
            ("green", NamedColor::Green),
            ("magenta", NamedColor::Magenta),
            ("red", NamedColor::Red),
            ("white", NamedColor::White),
            ("yellow", NamedColor::Yellow),
        ]
    }
}

impl ThemeColor {
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#')
            && hex.len() == 6
        {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Self::Rgb(r, g, b));
        }
        let lower = s.to_lowercase();
        // Handle aliases not in the canonical list
        let lookup = match lower.as_str() {
            "grey" => "gray",
            "darkgrey" => "darkgray",
            other => other,
        };
        NamedColor::all()
            .iter()
            .find(|(name, _)| *name == lookup)
            .map(|(_, color)| Self::Named(*color))
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<ThemeColor, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ThemeColor::parse(&s).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid color '{s}': expected a named color (black, red, green, yellow, blue, magenta, cyan, white, gray/grey, darkgray) or hex (#rrggbb)"
        ))
    })
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    Ok(config)
}

/// Load the configuration.
///
/// Every field has a sensible default, so a missing file at the standard
/// location yields `Config::default()`. An explicit `--config` override must
/// exist, and a malformed file is always an error.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let config_file = match config_override {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let path = config_file();
            if !path.exists() {
                return Ok(Config::default());
            }
            path
        }
    };
    let contents = fs::read_to_string(&config_file)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.display.visible_rows, 7);
        assert_eq!(config.input.poll_interval_ms, 10);
        assert_eq!(config.audio.volume, -100);
        assert!(config.audio.repeat);
    }

    #[test]
    fn test_full_config() {
        let config = load_config_from_str(
            r#"
[display]
visible_rows = 5

[input]
poll_interval_ms = 25

[audio]
volume = -40
repeat = false
"#,
        )
        .unwrap();
        assert_eq!(config.display.visible_rows, 5);
        assert_eq!(config.input.poll_interval(), Duration::from_millis(25));
        assert_eq!(config.audio.volume, -40);
        assert!(!config.audio.repeat);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = load_config_from_str("unknown_field = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_section_field_rejected() {
        let result = load_config_from_str(
            r#"
[display]
rows = 5
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_theme_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.theme.title, ThemeColor::Named(NamedColor::Green));
        assert_eq!(config.theme.text, ThemeColor::Named(NamedColor::Yellow));
        assert_eq!(
            config.theme.highlight_fg,
            ThemeColor::Named(NamedColor::Yellow)
        );
        assert_eq!(
            config.theme.highlight_bg,
            ThemeColor::Named(NamedColor::Blue)
        );
    }

    #[test]
    fn test_theme_custom() {
        let config = load_config_from_str(
            r##"
[theme]
title = "cyan"
highlight_bg = "#102040"
"##,
        )
        .unwrap();
        assert_eq!(config.theme.title, ThemeColor::Named(NamedColor::Cyan));
        assert_eq!(config.theme.highlight_bg, ThemeColor::Rgb(16, 32, 64));
        assert_eq!(config.theme.text, ThemeColor::Named(NamedColor::Yellow));
    }

    #[test]
    fn test_theme_invalid_color_rejected() {
        let result = load_config_from_str(
            r#"
[theme]
title = "notacolor"
"#,
        );
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid color"), "Error was: {err}");
    }

    #[test]
    fn test_theme_color_parse() {
        assert_eq!(
            ThemeColor::parse("green"),
            Some(ThemeColor::Named(NamedColor::Green))
        );
        assert_eq!(
            ThemeColor::parse("YELLOW"),
            Some(ThemeColor::Named(NamedColor::Yellow))
        );
        assert_eq!(
            ThemeColor::parse("grey"),
            Some(ThemeColor::Named(NamedColor::Gray))
        );
        assert_eq!(
            ThemeColor::parse("#ff0000"),
            Some(ThemeColor::Rgb(255, 0, 0))
        );
        assert_eq!(ThemeColor::parse("notacolor"), None);
        assert_eq!(ThemeColor::parse("#fff"), None);
        assert_eq!(ThemeColor::parse("#zzzzzz"), None);
    }

    #[test]
    fn test_load_missing_override_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display]\nvisible_rows = 3\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.display.visible_rows, 3);
    }

    #[test]
    fn test_load_malformed_override_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "display = 3").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
