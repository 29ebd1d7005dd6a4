// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-GILC-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of GILC and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};

use crate::error::ConfigError;

pub const PALETTE_ENV: &str = "GILC_PALETTE";

/// Styles for the document view. Without a palette the terminal's own colours are used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTheme {
    palette: Option<Palette>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    heading: Color,
    accent: Color,
    math: Color,
    muted: Color,
    error: Color,
}

impl Palette {
    const ROLES: [&'static str; 5] = ["heading", "accent", "math", "muted", "error"];

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != Self::ROLES.len() {
            return Err(format!(
                "expected {} comma-separated colors ({}), got {}",
                Self::ROLES.len(),
                Self::ROLES.join(","),
                parts.len()
            ));
        }
        Ok(Self {
            heading: parse_color(parts[0])?,
            accent: parse_color(parts[1])?,
            math: parse_color(parts[2])?,
            muted: parse_color(parts[3])?,
            error: parse_color(parts[4])?,
        })
    }
}

impl DocumentTheme {
    /// Read `GILC_PALETTE`; unset or blank keeps the default theme.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(PALETTE_ENV) {
            Ok(value) => Self::from_palette_csv(&value),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnv {
                name: PALETTE_ENV.to_owned(),
                value: "<non-unicode>".to_owned(),
                reason: "expected comma-separated colors".to_owned(),
            }),
        }
    }

    pub fn from_palette_csv(value: &str) -> Result<Self, ConfigError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let palette = Palette::parse_csv(trimmed).map_err(|reason| ConfigError::InvalidEnv {
            name: PALETTE_ENV.to_owned(),
            value: trimmed.to_owned(),
            reason,
        })?;
        Ok(Self { palette: Some(palette) })
    }

    fn pick(&self, role: impl Fn(&Palette) -> Color, fallback: Color) -> Color {
        self.palette.as_ref().map_or(fallback, role)
    }

    pub fn heading_style(&self, level: u8) -> Style {
        let style = Style::default()
            .fg(self.pick(|p| p.heading, Color::Cyan))
            .add_modifier(Modifier::BOLD);
        if level <= 1 {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default()
    }

    pub fn math_style(&self) -> Style {
        Style::default().fg(self.pick(|p| p.math, Color::Magenta))
    }

    pub fn code_style(&self) -> Style {
        Style::default().fg(self.pick(|p| p.accent, Color::Green))
    }

    pub fn marker_style(&self) -> Style {
        Style::default().fg(self.pick(|p| p.accent, Color::Yellow))
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.pick(|p| p.muted, Color::DarkGray))
    }

    pub fn quote_style(&self) -> Style {
        self.muted_style().add_modifier(Modifier::ITALIC)
    }

    pub fn table_header_style(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn diagram_style(&self) -> Style {
        Style::default().fg(self.pick(|p| p.heading, Color::Cyan))
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.pick(|p| p.error, Color::Red))
    }
}

/// `#RRGGBB`, `0xRRGGBB` or X11 `rgb:RR/GG/BB` (2 or 4 hex digits per channel).
fn parse_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("rgb:") {
        let channels = rest.split('/').map(parse_channel).collect::<Result<Vec<_>, _>>()?;
        let [r, g, b] = channels.as_slice() else {
            return Err(format!("invalid rgb: value: {trimmed}"));
        };
        return Ok(Color::Rgb(*r, *g, *b));
    }

    let hex = lower.strip_prefix('#').or_else(|| lower.strip_prefix("0x")).unwrap_or(&lower);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    Ok(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

fn parse_channel(value: &str) -> Result<u8, String> {
    let value = value.trim();
    let parsed = match value.len() {
        2 => u8::from_str_radix(value, 16).ok(),
        4 => u16::from_str_radix(value, 16).ok().map(|wide| (wide >> 8) as u8),
        _ => None,
    };
    parsed.ok_or_else(|| format!("invalid rgb: component {value} (expected 2 or 4 hex digits)"))
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::{parse_color, DocumentTheme};
    use crate::error::ConfigError;

    #[test]
    fn palette_csv_overrides_roles() {
        let theme =
            DocumentTheme::from_palette_csv("#112233, #00ff00, rgb:ff/00/ff, 0x808080, #ff0000")
                .expect("palette");
        assert_eq!(theme.heading_style(2).fg, Some(Color::Rgb(0x11, 0x22, 0x33)));
        assert_eq!(theme.math_style().fg, Some(Color::Rgb(0xff, 0, 0xff)));
        assert_eq!(theme.error_style().fg, Some(Color::Rgb(0xff, 0, 0)));
    }

    #[test]
    fn blank_palette_keeps_defaults() {
        assert_eq!(DocumentTheme::from_palette_csv("  "), Ok(DocumentTheme::default()));
        assert_eq!(DocumentTheme::default().error_style().fg, Some(Color::Red));
    }

    #[test]
    fn wrong_arity_is_a_config_error() {
        let err = DocumentTheme::from_palette_csv("#000000").expect_err("arity");
        assert!(matches!(err, ConfigError::InvalidEnv { ref name, .. } if name == "GILC_PALETTE"));
    }

    #[test]
    fn parses_color_notations() {
        assert_eq!(parse_color("#0A0b0C"), Ok(Color::Rgb(0x0a, 0x0b, 0x0c)));
        assert_eq!(parse_color("rgb:ffff/8000/0000"), Ok(Color::Rgb(0xff, 0x80, 0)));
        assert!(parse_color("rgb:ff/00").is_err());
        assert!(parse_color("teal").is_err());
    }
}
