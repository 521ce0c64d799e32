//! Color representation

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::key::KeyBuilder;

/// A concrete color: RGB, ARGB, or an entry in the legacy indexed palette.
///
/// Theme-based colors are deliberately not a variant here. A format may
/// carry an unresolved theme reference next to its color slot; resolving
/// that reference against theme data is the caller's job, and until it
/// happens the color slot simply stays empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// RGB color (no alpha)
    Rgb { r: u8, g: u8, b: u8 },

    /// ARGB color with alpha channel
    Argb { a: u8, r: u8, g: u8, b: u8 },

    /// Indexed color (legacy palette)
    Indexed(u8),
}

/// Error parsing a color from a hex string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color: {0:?}")]
pub struct ParseColorError(pub String);

impl Color {
    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create an ARGB color
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a, r, g, b }
    }

    /// Create from a hex string (e.g., "#FF0000" or "FF0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');

        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color::Rgb { r, g, b })
            }
            8 => {
                let a = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let r = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let g = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let b = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Color::Argb { a, r, g, b })
            }
            _ => None,
        }
    }

    /// Convert to ARGB hex string (8 characters, as written to style tables)
    ///
    /// Always returns an 8-character string with alpha, e.g., "FFFF0000" for
    /// opaque red.
    pub fn to_argb_hex(&self) -> String {
        match self {
            Color::Rgb { r, g, b } => format!("FF{:02X}{:02X}{:02X}", r, g, b),
            Color::Argb { a, r, g, b } => format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
            Color::Indexed(i) => {
                let (r, g, b) = Self::indexed_to_rgb(*i);
                format!("FF{:02X}{:02X}{:02X}", r, g, b)
            }
        }
    }

    /// Convert to RGB tuple
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Rgb { r, g, b } => (*r, *g, *b),
            Color::Argb { r, g, b, .. } => (*r, *g, *b),
            Color::Indexed(i) => Self::indexed_to_rgb(*i),
        }
    }

    /// Get RGB for indexed color
    fn indexed_to_rgb(index: u8) -> (u8, u8, u8) {
        // Standard Excel color palette (first 56 colors)
        const PALETTE: [(u8, u8, u8); 56] = [
            (0, 0, 0),       // 0: Black
            (255, 255, 255), // 1: White
            (255, 0, 0),     // 2: Red
            (0, 255, 0),     // 3: Bright Green
            (0, 0, 255),     // 4: Blue
            (255, 255, 0),   // 5: Yellow
            (255, 0, 255),   // 6: Pink
            (0, 255, 255),   // 7: Turquoise
            (0, 0, 0),       // 8: Black
            (255, 255, 255), // 9: White
            (255, 0, 0),     // 10: Red
            (0, 255, 0),     // 11: Bright Green
            (0, 0, 255),     // 12: Blue
            (255, 255, 0),   // 13: Yellow
            (255, 0, 255),   // 14: Pink
            (0, 255, 255),   // 15: Turquoise
            (128, 0, 0),     // 16: Dark Red
            (0, 128, 0),     // 17: Green
            (0, 0, 128),     // 18: Dark Blue
            (128, 128, 0),   // 19: Dark Yellow
            (128, 0, 128),   // 20: Violet
            (0, 128, 128),   // 21: Teal
            (192, 192, 192), // 22: 25% Gray
            (128, 128, 128), // 23: 50% Gray
            (153, 153, 255), // 24: Periwinkle
            (153, 51, 102),  // 25: Plum
            (255, 255, 204), // 26: Ivory
            (204, 255, 255), // 27: Light Turquoise
            (102, 0, 102),   // 28: Dark Purple
            (255, 128, 128), // 29: Coral
            (0, 102, 204),   // 30: Ocean Blue
            (204, 204, 255), // 31: Ice Blue
            (0, 0, 128),     // 32: Dark Blue
            (255, 0, 255),   // 33: Pink
            (255, 255, 0),   // 34: Yellow
            (0, 255, 255),   // 35: Turquoise
            (128, 0, 128),   // 36: Violet
            (128, 0, 0),     // 37: Dark Red
            (0, 128, 128),   // 38: Teal
            (0, 0, 255),     // 39: Blue
            (0, 204, 255),   // 40: Sky Blue
            (204, 255, 255), // 41: Light Turquoise
            (204, 255, 204), // 42: Light Green
            (255, 255, 153), // 43: Light Yellow
            (153, 204, 255), // 44: Pale Blue
            (255, 153, 204), // 45: Rose
            (204, 153, 255), // 46: Lavender
            (255, 204, 153), // 47: Tan
            (51, 102, 255),  // 48: Light Blue
            (51, 204, 204),  // 49: Aqua
            (153, 204, 0),   // 50: Lime
            (255, 204, 0),   // 51: Gold
            (255, 153, 0),   // 52: Light Orange
            (255, 102, 0),   // 53: Orange
            (102, 102, 153), // 54: Blue-Gray
            (150, 150, 150), // 55: 40% Gray
        ];

        if (index as usize) < PALETTE.len() {
            PALETTE[index as usize]
        } else {
            (0, 0, 0)
        }
    }

    /// Canonical-key encoding: tag byte plus payload.
    pub(crate) fn encode_key(&self, key: &mut KeyBuilder) {
        match self {
            Color::Rgb { r, g, b } => {
                key.push_u8(1);
                key.push_u8(*r);
                key.push_u8(*g);
                key.push_u8(*b);
            }
            Color::Argb { a, r, g, b } => {
                key.push_u8(2);
                key.push_u8(*a);
                key.push_u8(*r);
                key.push_u8(*g);
                key.push_u8(*b);
            }
            Color::Indexed(i) => {
                key.push_u8(3);
                key.push_u8(*i);
            }
        }
    }

    /// Canonical-key encoding of an optional color slot.
    pub(crate) fn encode_opt(color: Option<&Color>, key: &mut KeyBuilder) {
        match color {
            Some(c) => c.encode_key(key),
            None => key.push_u8(0),
        }
    }

    // Common colors
    pub const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const RED: Color = Color::Rgb { r: 255, g: 0, b: 0 };
    pub const GREEN: Color = Color::Rgb { r: 0, g: 255, b: 0 };
    pub const BLUE: Color = Color::Rgb { r: 0, g: 0, b: 255 };
    pub const YELLOW: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 0,
    };
    pub const CYAN: Color = Color::Rgb {
        r: 0,
        g: 255,
        b: 255,
    };
    pub const MAGENTA: Color = Color::Rgb {
        r: 255,
        g: 0,
        b: 255,
    };
    pub const GRAY: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb { r, g, b } => write!(f, "#{:02X}{:02X}{:02X}", r, g, b),
            Color::Argb { a, r, g, b } => write!(f, "#{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
            Color::Indexed(i) => write!(f, "indexed({})", i),
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s).ok_or_else(|| ParseColorError(s.to_string()))
    }
}
