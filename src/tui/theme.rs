use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub selection_bg: Color,
    pub badge: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
    pub tag: Color,
    /// Line color for the hero banner field.
    pub hero_line: Color,
    /// Line color for the section divider field.
    pub break_line: Color,
    /// Brightness multipliers applied on top of segment fade.
    pub hero_line_alpha: f64,
    pub break_line_alpha: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x06, 0x09, 0x12),
            text: Color::Rgb(0xB4, 0xBE, 0xD2),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x5C, 0x68, 0x80),
            highlight: Color::Rgb(0x30, 0x60, 0xFF),
            selection_bg: Color::Rgb(0x12, 0x20, 0x42),
            badge: Color::Rgb(0x7F, 0xB0, 0xFF),
            green: Color::Rgb(0x3F, 0xD6, 0x8A),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            red: Color::Rgb(0xFF, 0x54, 0x54),
            tag: Color::Rgb(0x4E, 0xC5, 0xE0),
            hero_line: Color::Rgb(0x30, 0x60, 0xFF),
            break_line: Color::Rgb(0x30, 0x60, 0xFF),
            hero_line_alpha: 1.0,
            break_line_alpha: 1.0,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color.
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the UI config, falling back to defaults.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "dim" => theme.dim = color,
                    "highlight" => theme.highlight = color,
                    "selection_bg" => theme.selection_bg = color,
                    "badge" => theme.badge = color,
                    "green" => theme.green = color,
                    "yellow" => theme.yellow = color,
                    "red" => theme.red = color,
                    "tag" => theme.tag = color,
                    "hero_line" => theme.hero_line = color,
                    "break_line" => theme.break_line = color,
                    _ => {}
                }
            }
        }

        theme.hero_line_alpha = ui.hero_line_alpha.clamp(0.0, 1.0);
        theme.break_line_alpha = ui.break_line_alpha.clamp(0.0, 1.0);
        theme
    }

    /// Terminal cells have no alpha channel, so fading segments mix
    /// their color toward the background instead.
    pub fn fade(&self, color: Color, alpha: f64) -> Color {
        let a = alpha.clamp(0.0, 1.0);
        match (color, self.background) {
            (Color::Rgb(r, g, b), Color::Rgb(br, bg_, bb)) => {
                let mix = |fg: u8, bg: u8| -> u8 {
                    (bg as f64 + (fg as f64 - bg as f64) * a).round() as u8
                };
                Color::Rgb(mix(r, br), mix(g, bg_), mix(b, bb))
            }
            _ => color,
        }
    }
}
