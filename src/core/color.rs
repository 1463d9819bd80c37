use crate::{PrintError, Result};
use serde::{Deserialize, Serialize};

/// RGBA colour used for block backgrounds and overview outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#RGB`, `#RRGGBB`, `#RRGGBBAA` or a basic colour name.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let invalid = || PrintError::invalid_value("color", value);

        if let Some(hex) = value.strip_prefix('#') {
            let channel = |range: std::ops::Range<usize>| {
                hex.get(range)
                    .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                    .ok_or_else(invalid)
            };
            return match hex.len() {
                3 => {
                    let expand = |i: usize| channel(i..i + 1).map(|v| v * 17);
                    Ok(Color::rgb(expand(0)?, expand(1)?, expand(2)?))
                }
                6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
                8 => Ok(Color::new(
                    channel(0..2)?,
                    channel(2..4)?,
                    channel(4..6)?,
                    channel(6..8)?,
                )),
                _ => Err(invalid()),
            };
        }

        match value.to_ascii_lowercase().as_str() {
            "black" => Ok(Color::BLACK),
            "white" => Ok(Color::WHITE),
            "red" => Ok(Color::RED),
            "green" => Ok(Color::rgb(0, 255, 0)),
            "blue" => Ok(Color::rgb(0, 0, 255)),
            "gray" | "grey" => Ok(Color::rgb(128, 128, 128)),
            "lightgray" | "lightgrey" => Ok(Color::rgb(192, 192, 192)),
            "yellow" => Ok(Color::rgb(255, 255, 0)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors() {
        assert_eq!(Color::parse("#ff8000").unwrap(), Color::rgb(255, 128, 0));
        assert_eq!(Color::parse("#F80").unwrap(), Color::rgb(255, 136, 0));
        assert_eq!(Color::parse("#00000080").unwrap(), Color::new(0, 0, 0, 128));
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(Color::parse("White").unwrap(), Color::WHITE);
        assert!(Color::parse("chartreuse-ish").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#zzzzzz").is_err());
    }
}
