use ratatui::style::Color;
use serde::Deserialize;

/// Semantic color slots for the LiftLog UI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    pub accent: Color,
    pub secondary: Color,
    pub text: Color,
    pub text_muted: Color,
    pub surface: Color,
    pub selection_bg: Color,
    /// Background of a toggle row that is switched on.
    pub toggle_on_bg: Color,

    pub success: Color,
    pub error: Color,
    pub warning: Color,
}

pub const THEME_NAMES: &[&str] = &["ember", "one-dark", "dracula"];

impl Theme {
    /// Unknown names fall back to `ember`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "one-dark" => one_dark(),
            "dracula" => dracula(),
            _ => ember(),
        }
    }
}

pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// `[colors]` table from the config file; each entry is a `#rrggbb` string.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ThemeOverrides {
    pub accent: Option<String>,
    pub secondary: Option<String>,
    pub text: Option<String>,
    pub text_muted: Option<String>,
    pub surface: Option<String>,
    pub selection_bg: Option<String>,
    pub toggle_on_bg: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
    pub warning: Option<String>,
}

/// Apply overrides; invalid hex strings are ignored.
pub fn apply_overrides(theme: &mut Theme, overrides: &ThemeOverrides) {
    macro_rules! apply {
        ($field:ident) => {
            if let Some(c) = overrides.$field.as_deref().and_then(parse_hex_color) {
                theme.$field = c;
            }
        };
    }
    apply!(accent);
    apply!(secondary);
    apply!(text);
    apply!(text_muted);
    apply!(surface);
    apply!(selection_bg);
    apply!(toggle_on_bg);
    apply!(success);
    apply!(error);
    apply!(warning);
}

fn ember() -> Theme {
    Theme {
        name: "ember".to_string(),
        accent: Color::Rgb(255, 149, 0),
        secondary: Color::Rgb(255, 69, 58),
        text: Color::Rgb(230, 230, 230),
        text_muted: Color::Rgb(142, 142, 147),
        surface: Color::Rgb(28, 28, 30),
        selection_bg: Color::Rgb(58, 58, 60),
        toggle_on_bg: Color::Rgb(120, 66, 0),
        success: Color::Rgb(52, 199, 89),
        error: Color::Rgb(255, 59, 48),
        warning: Color::Rgb(255, 204, 0),
    }
}

fn one_dark() -> Theme {
    Theme {
        name: "one-dark".to_string(),
        accent: Color::Rgb(97, 175, 239),
        secondary: Color::Rgb(198, 120, 221),
        text: Color::Rgb(171, 178, 191),
        text_muted: Color::Rgb(92, 99, 112),
        surface: Color::Rgb(40, 44, 52),
        selection_bg: Color::Rgb(62, 68, 81),
        toggle_on_bg: Color::Rgb(44, 74, 100),
        success: Color::Rgb(152, 195, 121),
        error: Color::Rgb(224, 108, 117),
        warning: Color::Rgb(229, 192, 123),
    }
}

fn dracula() -> Theme {
    Theme {
        name: "dracula".to_string(),
        accent: Color::Rgb(189, 147, 249),
        secondary: Color::Rgb(255, 121, 198),
        text: Color::Rgb(248, 248, 242),
        text_muted: Color::Rgb(98, 114, 164),
        surface: Color::Rgb(40, 42, 54),
        selection_bg: Color::Rgb(68, 71, 90),
        toggle_on_bg: Color::Rgb(80, 60, 120),
        success: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
        warning: Color::Rgb(241, 250, 140),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_fallback() {
        assert_eq!(Theme::from_name("dracula").name, "dracula");
        assert_eq!(Theme::from_name("neon").name, "ember");
        for name in THEME_NAMES {
            assert_eq!(Theme::from_name(name).name, *name);
        }
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff9500"), Some(Color::Rgb(255, 149, 0)));
        assert_eq!(parse_hex_color("000000"), Some(Color::Rgb(0, 0, 0)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }

    #[test]
    fn test_apply_overrides_skips_invalid() {
        let mut theme = Theme::from_name("ember");
        let before_text = theme.text;
        apply_overrides(
            &mut theme,
            &ThemeOverrides {
                accent: Some("#010203".to_string()),
                text: Some("nope".to_string()),
                ..ThemeOverrides::default()
            },
        );
        assert_eq!(theme.accent, Color::Rgb(1, 2, 3));
        assert_eq!(theme.text, before_text);
    }
}
