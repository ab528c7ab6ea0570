//! RGB colours for card borders.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::{CardError, Result};

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or `rgb(r, g, b)`.
    ///
    /// An alpha channel is accepted and dropped.
    pub fn parse(input: &str) -> Result<Self> {
        let s = input.trim();
        let invalid = || CardError::InvalidColor(input.to_string());

        if let Some(inner) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(invalid());
            }
            let channel = |p: &str| p.parse::<u8>().map_err(|_| invalid());
            return Ok(Self::new(
                channel(parts[0])?,
                channel(parts[1])?,
                channel(parts[2])?,
            ));
        }

        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let digit = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|d| d * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::new(digit(0)?, digit(1)?, digit(2)?))
            }
            6 | 8 => Ok(Self::new(pair(0)?, pair(2)?, pair(4)?)),
            _ => Err(invalid()),
        }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Component-wise average of several colours.
    ///
    /// Each channel is rounded to the nearest integer with exact halves
    /// rounding down, so black and white mix to `#7f7f7f`. Returns `None` for
    /// an empty slice.
    pub fn mix(colors: &[Rgb]) -> Option<Rgb> {
        if colors.is_empty() {
            return None;
        }
        let n = colors.len() as u32;
        let channel = |pick: fn(&Rgb) -> u8| {
            let sum: u32 = colors.iter().map(|c| u32::from(pick(c))).sum();
            // nearest, ties toward zero
            ((2 * sum + n - 1) / (2 * n)) as u8
        };
        Some(Rgb::new(channel(|c| c.r), channel(|c| c.g), channel(|c| c.b)))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_hex_forms() {
        assert_eq!(Rgb::parse("#ff69b4").unwrap(), Rgb::new(255, 105, 180));
        assert_eq!(Rgb::parse("#A500A5FF").unwrap(), Rgb::new(165, 0, 165));
        assert_eq!(Rgb::parse("#fff").unwrap(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn parse_rgb_function() {
        assert_eq!(Rgb::parse("rgb(58, 47, 47)").unwrap(), Rgb::new(58, 47, 47));
        assert!(Rgb::parse("rgb(300, 0, 0)").is_err());
        assert!(Rgb::parse("rgb(1, 2)").is_err());
    }

    #[test]
    fn reject_malformed() {
        assert!(Rgb::parse("ff69b4").is_err());
        assert!(Rgb::parse("#ff69b").is_err());
        assert!(Rgb::parse("#gg0000").is_err());
        assert!(Rgb::parse("").is_err());
    }

    #[test]
    fn mix_black_and_white() {
        let mixed = Rgb::mix(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
        assert_eq!(mixed.to_hex(), "#7f7f7f");
    }

    #[test]
    fn mix_rounds_to_nearest() {
        // 1/3 -> 0, 2/3 -> 1
        let mixed = Rgb::mix(&[Rgb::new(1, 2, 0), Rgb::new(0, 0, 0), Rgb::new(0, 0, 0)]).unwrap();
        assert_eq!(mixed, Rgb::new(0, 1, 0));
    }

    #[test]
    fn mix_single_and_empty() {
        let pink = Rgb::new(255, 105, 180);
        assert_eq!(Rgb::mix(&[pink]), Some(pink));
        assert_eq!(Rgb::mix(&[]), None);
    }
}
