use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("invalid color '{0}': expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidHex(String),
}

/// Straight (non-premultiplied) 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Composite `self` over `dst` (Porter-Duff source-over).
    pub fn over(self, dst: Rgba) -> Rgba {
        if self.a == 255 || dst.a == 0 {
            return self;
        }
        if self.a == 0 {
            return dst;
        }
        let sa = self.a as f32 / 255.0;
        let da = dst.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let channel = |s: u8, d: u8| {
            let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        Rgba {
            r: channel(self.r, dst.r),
            g: channel(self.g, dst.g),
            b: channel(self.b, dst.b),
            a: (out_a * 255.0).round() as u8,
        }
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || ColorError::InvalidHex(s.to_string());
        if !hex.is_ascii() {
            return Err(invalid());
        }

        // palette handles #rgb and #rrggbb; an eighth and ninth digit carry alpha
        let (rgb_part, alpha) = match hex.len() {
            3 | 6 => (hex, 255),
            8 => {
                let alpha = u8::from_str_radix(&hex[6..8], 16).map_err(|_| invalid())?;
                (&hex[..6], alpha)
            }
            _ => return Err(invalid()),
        };
        let rgb = Srgb::<u8>::from_str(rgb_part).map_err(|_| invalid())?;
        Ok(Rgba::new(rgb.red, rgb.green, rgb.blue, alpha))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl Serialize for Rgba {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rgba::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_six_digit_hex() {
        assert_eq!("#e74c3c".parse::<Rgba>(), Ok(Rgba::opaque(0xe7, 0x4c, 0x3c)));
        assert_eq!("27ae60".parse::<Rgba>(), Ok(Rgba::opaque(0x27, 0xae, 0x60)));
    }

    #[test]
    fn parse_short_and_alpha_hex() {
        assert_eq!("#fff".parse::<Rgba>(), Ok(Rgba::WHITE));
        assert_eq!("#0000ff1a".parse::<Rgba>(), Ok(Rgba::new(0, 0, 255, 0x1a)));
    }

    #[test]
    fn reject_garbage() {
        assert!("#12345".parse::<Rgba>().is_err());
        assert!("#gggggg".parse::<Rgba>().is_err());
        assert!("".parse::<Rgba>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for s in ["#2c3e50", "#0000ff1a"] {
            assert_eq!(s.parse::<Rgba>().map(|c| c.to_string()), Ok(s.to_string()));
        }
    }

    #[test]
    fn over_transparent_keeps_source() {
        let src = Rgba::new(0, 0, 255, 26);
        assert_eq!(src.over(Rgba::TRANSPARENT), src);
    }

    #[test]
    fn over_opaque_mixes() {
        let src = Rgba::new(0, 0, 255, 128);
        let out = src.over(Rgba::WHITE);
        assert_eq!(out.a, 255);
        assert_eq!(out.b, 255);
        assert!((out.r as i32 - 127).abs() <= 1);
    }
}
