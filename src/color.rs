//! RGBA colors with 8 bits per channel.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` (the `#` is optional, hex digits are
    /// case-insensitive). Six-digit input is opaque.
    pub fn from_hex(s: &str) -> Result<Self, RenderError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        let invalid = || RenderError::InvalidColor(s.to_string());

        if !digits.is_ascii() || !(digits.len() == 6 || digits.len() == 8) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Formats as `#RRGGBB` with uppercase digits. Alpha is not included.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Multiplies every color channel by `intensity`, saturating to 0..=255.
    /// Alpha is unchanged.
    #[inline]
    pub fn scale(&self, intensity: f32) -> Self {
        Self::new(
            scale_channel(self.r, intensity),
            scale_channel(self.g, intensity),
            scale_channel(self.b, intensity),
            self.a,
        )
    }

    /// Tints `self` by `tint / 255` and then scales by `intensity`.
    ///
    /// Used for textured fragments: `texel * (material / 255) * light`.
    #[inline]
    pub fn modulate(&self, tint: Rgba, intensity: f32) -> Self {
        let k = intensity / 255.0;
        Self::new(
            scale_channel(self.r, tint.r as f32 * k),
            scale_channel(self.g, tint.g as f32 * k),
            scale_channel(self.b, tint.b as f32 * k),
            self.a,
        )
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[inline]
fn scale_channel(c: u8, k: f32) -> u8 {
    // `as u8` saturates; NaN becomes 0.
    (c as f32 * k).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_red() {
        let red = Rgba::from_hex("#FF0000").unwrap();
        assert_eq!((red.r, red.g, red.b), (255, 0, 0));
        assert_eq!(red.a, 255);
    }

    #[test]
    fn hex_round_trip() {
        for s in ["#FF0000", "#00FF00", "#0A0B0C", "#C832C8", "#000000", "#FFFFFF"] {
            assert_eq!(Rgba::from_hex(s).unwrap().to_hex(), s);
        }
    }

    #[test]
    fn parses_lowercase_and_alpha() {
        assert_eq!(Rgba::from_hex("0a64c8").unwrap(), Rgba::rgb(10, 100, 200));
        assert_eq!(Rgba::from_hex("#01020380").unwrap(), Rgba::new(1, 2, 3, 128));
    }

    #[test]
    fn rejects_garbage() {
        for s in ["", "#FFF", "#GG0000", "#FF00000", "#ÿÿÿ"] {
            assert!(matches!(Rgba::from_hex(s), Err(RenderError::InvalidColor(_))));
        }
    }

    #[test]
    fn scale_saturates() {
        let c = Rgba::rgb(200, 100, 10);
        assert_eq!(c.scale(0.5), Rgba::rgb(100, 50, 5));
        assert_eq!(c.scale(2.0), Rgba::rgb(255, 200, 20));
        assert_eq!(c.scale(0.0), Rgba::rgb(0, 0, 0));
    }

    #[test]
    fn modulate_by_white_is_intensity_scale() {
        let texel = Rgba::new(100, 150, 200, 77);
        assert_eq!(texel.modulate(Rgba::WHITE, 1.0), texel);
        assert_eq!(texel.modulate(Rgba::WHITE, 0.5), Rgba::new(50, 75, 100, 77));
        assert_eq!(texel.modulate(Rgba::BLACK, 1.0), Rgba::new(0, 0, 0, 77));
    }
}
