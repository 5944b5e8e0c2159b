use crossterm::style::Color;
use pocket_core::config::{NamedColor, ThemeColor, ThemeConfig};

/// Resolved colors for the terminal screen.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub title: Color,
    pub text: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            title: to_crossterm_color(config.title),
            text: to_crossterm_color(config.text),
            highlight_fg: to_crossterm_color(config.highlight_fg),
            highlight_bg: to_crossterm_color(config.highlight_bg),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

fn to_crossterm_color(color: ThemeColor) -> Color {
    match color {
        ThemeColor::Rgb(r, g, b) => Color::Rgb { r, g, b },
        ThemeColor::Named(named) => match named {
            NamedColor::Black => Color::Black,
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Blue => Color::Blue,
            NamedColor::Magenta => Color::Magenta,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::White => Color::White,
            NamedColor::Gray => Color::Grey,
            NamedColor::DarkGray => Color::DarkGrey,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocket_core::config::load_config_from_str;

    #[test]
    fn test_theme_defaults_match_the_display_palette() {
        let theme = Theme::default();
        assert_eq!(theme.title, Color::Green);
        assert_eq!(theme.text, Color::Yellow);
        assert_eq!(theme.highlight_fg, Color::Yellow);
        assert_eq!(theme.highlight_bg, Color::Blue);
    }

    #[test]
    fn test_theme_custom() {
        let config = load_config_from_str(
            r##"
[theme]
title = "white"
highlight_bg = "#203040"
"##,
        )
        .unwrap();
        let theme = Theme::from_config(&config.theme);
        assert_eq!(theme.title, Color::White);
        assert_eq!(
            theme.highlight_bg,
            Color::Rgb {
                r: 32,
                g: 48,
                b: 64
            }
        );
        assert_eq!(theme.text, Color::Yellow); // default
    }
}
