// Author: Dustin Pilgrim
// License: MIT
//
// ARGB colour helpers. Format: 0xAARRGGBB

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour(pub u32);

impl Colour {
    pub const WHITE: Colour = Colour::rgb(0xFF_FFFF);
    pub const BLACK: Colour = Colour::rgb(0x00_0000);

    /// Opaque colour from 0xRRGGBB.
    pub const fn rgb(rgb: u32) -> Self {
        Colour(0xFF00_0000 | (rgb & 0x00FF_FFFF))
    }

    #[inline]
    pub fn a(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }
    #[inline]
    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }
    #[inline]
    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }
    #[inline]
    pub fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub fn with_alpha(self, alpha: u8) -> Self {
        Colour((self.0 & 0x00FF_FFFF) | ((alpha as u32) << 24))
    }

    /// Alpha from a 0.0..=1.0 opacity.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.with_alpha(a)
    }

    /// Parse `#RRGGBB` into an opaque colour.
    pub fn parse_hex(s: &str) -> Result<Colour, String> {
        let s = s.trim();
        let hex = s.strip_prefix('#').ok_or("colour must start with #")?;

        if hex.len() != 6 {
            return Err("colour must be 6 hex digits (RRGGBB)".into());
        }

        let rgb = u32::from_str_radix(hex, 16).map_err(|_| "invalid hex colour".to_string())?;
        Ok(Colour::rgb(rgb))
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }
}

/// Quick-pick colours offered by the pen editor.
pub const PALETTE: [(&str, Colour); 16] = [
    ("white", Colour::rgb(0xffffff)),
    ("gray", Colour::rgb(0xc0c0c0)),
    ("red", Colour::rgb(0xff0000)),
    ("yellow", Colour::rgb(0xffff00)),
    ("green", Colour::rgb(0x00ff00)),
    ("blue", Colour::rgb(0x0000ff)),
    ("pink", Colour::rgb(0xff00ff)),
    ("wathet", Colour::rgb(0x00ffff)),
    ("black", Colour::rgb(0x000000)),
    ("dark gray", Colour::rgb(0x808080)),
    ("dark red", Colour::rgb(0x800000)),
    ("dark yellow", Colour::rgb(0x808000)),
    ("dark green", Colour::rgb(0x008000)),
    ("dark blue", Colour::rgb(0x000080)),
    ("dark pink", Colour::rgb(0x800080)),
    ("dark wathet", Colour::rgb(0x008080)),
];

pub fn palette_colour(name: &str) -> Option<Colour> {
    PALETTE
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
        .map(|(_, c)| *c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_accepts_rrggbb() {
        let c = Colour::parse_hex(" #00ff00 ").unwrap();
        assert_eq!(c, Colour(0xFF00_FF00));
        assert_eq!(c.to_string(), "#00ff00");
    }

    #[test]
    fn parse_hex_rejects_bad_input() {
        assert!(Colour::parse_hex("00ff00").is_err());
        assert!(Colour::parse_hex("#0f0").is_err());
        assert!(Colour::parse_hex("#zzzzzz").is_err());
    }

    #[test]
    fn opacity_maps_to_alpha() {
        let c = Colour::BLACK.with_opacity(0.2);
        assert_eq!(c.a(), 51);
        assert_eq!((c.r(), c.g(), c.b()), (0, 0, 0));
    }

    #[test]
    fn palette_lookup_is_case_insensitive() {
        assert_eq!(palette_colour("Dark Blue"), Some(Colour::rgb(0x000080)));
        assert_eq!(palette_colour("mauve"), None);
    }
}
