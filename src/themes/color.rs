use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::error::{Error, KoalaResult};

/// RGBA color with 8-bit components
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Color {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

fn parse_hex_component(hex: &str, original: &str) -> KoalaResult<u8> {
    u8::from_str_radix(hex, 16).map_err(|_| Error::InvalidHexColor {
        value: original.to_string(),
        reason: format!("invalid hex component '{}'", hex),
    })
}

impl Color {
    pub(crate) const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    /// Outputs the hex value for that colour.
    #[inline]
    pub fn as_hex(&self) -> String {
        if self.a < 255 {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        } else {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        }
    }

    #[inline]
    pub(crate) fn as_css_color_property(&self) -> String {
        format!("color: {};", self.as_hex())
    }

    #[inline]
    pub(crate) fn as_css_bg_color_property(&self) -> String {
        format!("background-color: {};", self.as_hex())
    }

    /// Appends the truecolor SGR parameters for this colour as a foreground.
    /// Alpha is ignored, terminals have no notion of it.
    pub(crate) fn as_ansi_fg(&self, out: &mut String) {
        let _ = write!(out, "38;2;{};{};{}", self.r, self.g, self.b);
    }

    pub(crate) fn as_ansi_bg(&self, out: &mut String) {
        let _ = write!(out, "48;2;{};{};{}", self.r, self.g, self.b);
    }

    /// Creates a Color from a hex string, with or without the leading `#`
    /// as editor themes write both.
    ///
    /// Errors if the string is not a valid hex colour.
    pub fn from_hex(hex: &str) -> KoalaResult<Self> {
        let original = hex;
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(Error::InvalidHexColor {
                value: original.to_string(),
                reason: "non-ASCII characters".to_owned(),
            });
        }

        match hex.len() {
            // #RGB, each digit doubled
            3 => {
                let r = parse_hex_component(&hex[0..1], original)?;
                let g = parse_hex_component(&hex[1..2], original)?;
                let b = parse_hex_component(&hex[2..3], original)?;
                Ok(Color::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = parse_hex_component(&hex[0..2], original)?;
                let g = parse_hex_component(&hex[2..4], original)?;
                let b = parse_hex_component(&hex[4..6], original)?;
                Ok(Color::rgb(r, g, b))
            }
            8 => {
                let r = parse_hex_component(&hex[0..2], original)?;
                let g = parse_hex_component(&hex[2..4], original)?;
                let b = parse_hex_component(&hex[4..6], original)?;
                let a = parse_hex_component(&hex[6..8], original)?;
                Ok(Color { r, g, b, a })
            }
            _ => Err(Error::InvalidHexColor {
                value: original.to_string(),
                reason: format!("invalid length {}", hex.len()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_parse_theme_colors() {
        let inputs = [
            ("ff9d00", Color::rgb(255, 157, 0)),
            ("#1e1e1e", Color::rgb(30, 30, 30)),
            ("#FFD700", Color::rgb(255, 215, 0)),
            ("#fff", Color::rgb(255, 255, 255)),
            ("5c6370", Color::rgb(92, 99, 112)),
            (
                "#00000080",
                Color {
                    r: 0,
                    g: 0,
                    b: 0,
                    a: 128,
                },
            ),
        ];

        for (input, expected) in inputs {
            assert_eq!(Color::from_hex(input).unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn error_on_invalid_format() {
        assert!(Color::from_hex("#FF").is_err());
        assert!(Color::from_hex("#FFFFF").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("#ééé").is_err());
        assert!(Color::from_hex("white").is_err());
    }

    #[test]
    fn outputs() {
        let c = Color::from_hex("ff9d00").unwrap();
        assert_eq!(c.as_hex(), "#FF9D00");
        assert_eq!(c.as_css_color_property(), "color: #FF9D00;");
        let mut ansi = String::new();
        c.as_ansi_fg(&mut ansi);
        assert_eq!(ansi, "38;2;255;157;0");
    }
}
