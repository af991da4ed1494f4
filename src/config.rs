use crate::formatting::BoxChars;
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use xdg::BaseDirectories;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// Backend base URL; the RINKSIDE_API_URL env var still wins.
    pub api_base_url: Option<String>,
    /// Poll interval for the single-game view, in seconds.
    pub live_refresh_interval: u32,
    /// Poll interval for the schedule view, in seconds.
    pub schedule_refresh_interval: u32,
    pub time_format: String,
    pub use_unicode: bool,
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub live_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub intermission_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub scheduled_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub final_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub error_fg: Color,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            api_base_url: None,
            live_refresh_interval: 10,
            schedule_refresh_interval: 30,
            time_format: "%H:%M:%S".to_string(),
            use_unicode: true,
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            live_fg: Color::Red,
            intermission_fg: Color::Magenta,
            scheduled_fg: Color::Blue,
            final_fg: Color::DarkGray,
            error_fg: Color::Red,
        }
    }
}

/// Resolved rendering settings handed to widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub use_unicode: bool,
    pub box_chars: BoxChars,
    pub selection_fg: Color,
    pub live_fg: Color,
    pub intermission_fg: Color,
    pub scheduled_fg: Color,
    pub final_fg: Color,
    pub error_fg: Color,
}

impl Config {
    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            use_unicode: self.use_unicode,
            box_chars: BoxChars::from_use_unicode(self.use_unicode),
            selection_fg: self.theme.selection_fg,
            live_fg: self.theme.live_fg,
            intermission_fg: self.theme.intermission_fg,
            scheduled_fg: self.theme.scheduled_fg,
            final_fg: self.theme.final_fg,
            error_fg: self.theme.error_fg,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Config::default().display()
    }
}

/// Deserialize a color from a string (supports named colors, RGB hex, or RGB tuple)
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: "red", "blue", "cyan", "orange", etc.
/// - Hex colors: "#FF6600", "#f60"
/// - RGB tuples: "255,165,0"
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "black" => return Some(Color::Black),
        "red" => return Some(Color::Red),
        "green" => return Some(Color::Green),
        "yellow" => return Some(Color::Yellow),
        "blue" => return Some(Color::Blue),
        "magenta" => return Some(Color::Magenta),
        "cyan" => return Some(Color::Cyan),
        "gray" | "grey" => return Some(Color::Gray),
        "darkgray" | "darkgrey" => return Some(Color::DarkGray),
        "lightred" => return Some(Color::LightRed),
        "lightgreen" => return Some(Color::LightGreen),
        "lightyellow" => return Some(Color::LightYellow),
        "lightblue" => return Some(Color::LightBlue),
        "lightmagenta" => return Some(Color::LightMagenta),
        "lightcyan" => return Some(Color::LightCyan),
        "white" => return Some(Color::White),
        "orange" => return Some(Color::Rgb(255, 165, 0)),
        _ => {}
    }

    // Hex colors (#FF6600 or #f60)
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        } else if hex.len() == 3 {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    // RGB tuples "255,165,0"
    if s.contains(',') {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() == 3 {
            let r = parts[0].trim().parse::<u8>().ok()?;
            let g = parts[1].trim().parse::<u8>().ok()?;
            let b = parts[2].trim().parse::<u8>().ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    None
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };

    toml::from_str(&content).unwrap_or_else(|_| Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_named() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("blue"), Some(Color::Blue));
        assert_eq!(parse_color("orange"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(parse_color("darkgrey"), Some(Color::DarkGray));
    }

    #[test]
    fn test_parse_color_case_insensitive() {
        assert_eq!(parse_color("RED"), Some(Color::Red));
        assert_eq!(parse_color("Magenta"), Some(Color::Magenta));
    }

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(parse_color("#FF6600"), Some(Color::Rgb(255, 102, 0)));
        assert_eq!(parse_color("#f60"), Some(Color::Rgb(255, 102, 0)));
    }

    #[test]
    fn test_parse_color_rgb_tuple() {
        assert_eq!(parse_color("255,165,0"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(parse_color("255, 102, 0"), Some(Color::Rgb(255, 102, 0)));
    }

    #[test]
    fn test_parse_color_invalid() {
        assert_eq!(parse_color("invalid"), None);
        assert_eq!(parse_color("#ZZZ"), None);
        assert_eq!(parse_color("256,0,0"), None);
    }

    #[test]
    fn test_default_intervals_match_views() {
        let config = Config::default();
        assert_eq!(config.live_refresh_interval, 10);
        assert_eq!(config.schedule_refresh_interval, 30);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r##"
log_level = "debug"
live_refresh_interval = 5
schedule_refresh_interval = 45
api_base_url = "http://scores.example.net"

[theme]
live_fg = "#FF0000"
selection_fg = "cyan"
        "##;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.live_refresh_interval, 5);
        assert_eq!(config.schedule_refresh_interval, 45);
        assert_eq!(config.api_base_url.as_deref(), Some("http://scores.example.net"));
        assert_eq!(config.theme.live_fg, Color::Rgb(255, 0, 0));
        assert_eq!(config.theme.selection_fg, Color::Cyan);
        // Untouched keys keep their defaults.
        assert_eq!(config.theme.intermission_fg, Color::Magenta);
        assert_eq!(config.time_format, "%H:%M:%S");
    }

    #[test]
    fn test_display_config_uses_theme() {
        let config = Config::default();
        let display = config.display();
        assert!(display.use_unicode);
        assert_eq!(display.box_chars.top_left, "╭");
        assert_eq!(display.live_fg, Color::Red);
    }
}
