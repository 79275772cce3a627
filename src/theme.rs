//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use crate::game::WasteColor;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Container colours and UI colours loaded from a theme file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Container colours, indexed by `WasteColor::index`: red, blue, yellow.
    pub waste: [Color; 3],
    /// Playfield background.
    pub bg: Color,
    /// Grid / border.
    pub div_line: Color,
    /// Text (score, lines).
    pub main_fg: Color,
    /// Highlight / titles.
    pub title: Color,
    /// Secondary text and empty grid dots.
    pub inactive_fg: Color,
    /// Fading rows alternate between these two.
    pub fade_lit: Color,
    pub fade_dim: Color,
    /// Countdown banner once two matching containers touch.
    pub danger: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

// One Dark values from onedark.theme.
const ONEDARK_RED: Color = Color::Rgb(0xE0, 0x6C, 0x75);
const ONEDARK_BLUE: Color = Color::Rgb(0x61, 0xAF, 0xEF);
const ONEDARK_YELLOW: Color = Color::Rgb(0xE5, 0xC0, 0x7B);
const ONEDARK_BG: Color = Color::Rgb(0x31, 0x35, 0x3F);
const ONEDARK_DIV: Color = Color::Rgb(0x3F, 0x44, 0x4F);
const ONEDARK_FG: Color = Color::Rgb(0xAB, 0xB2, 0xBF);
const ONEDARK_INACTIVE: Color = Color::Rgb(0x5C, 0x63, 0x70);
const ONEDARK_HI: Color = Color::Rgb(0xFF, 0xFF, 0xFF);

impl Default for Theme {
    fn default() -> Self {
        Self::onedark_default()
    }
}

impl Theme {
    pub const fn onedark_default() -> Self {
        Self {
            waste: [ONEDARK_RED, ONEDARK_BLUE, ONEDARK_YELLOW],
            bg: ONEDARK_BG,
            div_line: ONEDARK_DIV,
            main_fg: ONEDARK_FG,
            title: ONEDARK_YELLOW,
            inactive_fg: ONEDARK_INACTIVE,
            fade_lit: ONEDARK_HI,
            fade_dim: ONEDARK_INACTIVE,
            danger: ONEDARK_RED,
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Falls back to One Dark defaults if path is None or the file is missing.
    /// `palette` selects the container colour variant.
    pub fn load(path: Option<&Path>, palette: crate::Palette) -> Result<Self, ThemeError> {
        let mut theme = match path {
            Some(p) if p.exists() => Self::from_map(&parse_theme_file(&std::fs::read_to_string(p)?)),
            _ => Self::onedark_default(),
        };
        theme.apply_palette(palette);
        Ok(theme)
    }

    /// Override container colours for high-contrast or colorblind play.
    pub fn apply_palette(&mut self, palette: crate::Palette) {
        match palette {
            crate::Palette::Normal => {}
            crate::Palette::HighContrast => {
                self.waste = [
                    Color::Rgb(0xFF, 0x00, 0x00),
                    Color::Rgb(0x00, 0x88, 0xFF),
                    Color::Rgb(0xFF, 0xFF, 0x00),
                ];
            }
            crate::Palette::Colorblind => {
                // Tol's vibrant scheme: vermilion, blue, yellow stay apart under deuteranopia.
                self.waste = [
                    Color::Rgb(0xEE, 0x77, 0x33),
                    Color::Rgb(0x00, 0x77, 0xBB),
                    Color::Rgb(0xBB, 0xBB, 0x00),
                ];
            }
        }
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).and_then(|v| parse_hex(v).ok());
        let base = Self::onedark_default();
        Self {
            waste: [
                get("cpu_end").or_else(|| get("temp_end")).unwrap_or(base.waste[0]),
                get("cpu_box").unwrap_or(base.waste[1]),
                get("cpu_mid").or_else(|| get("title")).unwrap_or(base.waste[2]),
            ],
            bg: get("meter_bg").unwrap_or(base.bg),
            div_line: get("div_line").unwrap_or(base.div_line),
            main_fg: get("main_fg").unwrap_or(base.main_fg),
            title: get("title").unwrap_or(base.title),
            inactive_fg: get("inactive_fg").unwrap_or(base.inactive_fg),
            fade_lit: get("hi_fg").unwrap_or(base.fade_lit),
            fade_dim: get("inactive_fg").unwrap_or(base.fade_dim),
            danger: get("temp_end").or_else(|| get("cpu_end")).unwrap_or(base.danger),
        }
    }

    #[inline]
    pub const fn waste_color(&self, color: WasteColor) -> Color {
        self.waste[color.index()]
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some((key, rest)) = stripped.split_once(']') else {
            continue;
        };
        let Some((_, value)) = rest.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').trim_matches('\'');
        if !value.is_empty() {
            map.insert(key.trim().to_string(), value.to_string());
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let digits = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|d| u8::from_str_radix(d, 16).ok())
            .ok_or_else(invalid)
    };
    match digits.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Palette;

    #[test]
    fn test_parse_hex_6() {
        let c = parse_hex("#E06C75").unwrap();
        assert!(matches!(c, Color::Rgb(0xE0, 0x6C, 0x75)));
    }

    #[test]
    fn test_parse_hex_3() {
        let c = parse_hex("#FFF").unwrap();
        assert!(matches!(c, Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#GGGGGG").is_err());
        assert!(parse_hex("").is_err());
    }

    #[test]
    fn test_parse_theme_line() {
        let map = parse_theme_file(
            r##"
            # comment
            theme[meter_bg]="#31353F"
            theme[cpu_box]='#0000FF'
            theme[empty]=""
            not a theme line
            "##,
        );
        assert_eq!(map.get("meter_bg"), Some(&"#31353F".to_string()));
        assert_eq!(map.get("cpu_box"), Some(&"#0000FF".to_string()));
        assert!(!map.contains_key("empty"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_theme_keys_map_to_containers() {
        let map = parse_theme_file(
            r##"theme[cpu_end]="#FF0000"
theme[cpu_box]="#0000FF"
theme[cpu_mid]="#FFFF00""##,
        );
        let theme = Theme::from_map(&map);
        assert_eq!(theme.waste_color(WasteColor::Red), Color::Rgb(255, 0, 0));
        assert_eq!(theme.waste_color(WasteColor::Blue), Color::Rgb(0, 0, 255));
        assert_eq!(theme.waste_color(WasteColor::Yellow), Color::Rgb(255, 255, 0));
        assert_eq!(theme.bg, Theme::default().bg);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let theme = Theme::load(Some(Path::new("/nonexistent/wastedump.theme")), Palette::Normal).unwrap();
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn test_palettes_keep_colours_distinct() {
        for palette in [Palette::Normal, Palette::HighContrast, Palette::Colorblind] {
            let theme = Theme::load(None, palette).unwrap();
            let [a, b, c] = theme.waste;
            assert!(a != b && b != c && a != c, "{palette:?}");
        }
    }
}
