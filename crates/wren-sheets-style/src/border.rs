//! Border attribute bundle

use crate::color::Color;
use crate::key::{FormatKey, KeyBuilder, KeyCache};

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BorderLineStyle {
    /// No border
    #[default]
    None = 0,
    /// Thin line
    Thin = 1,
    /// Medium line
    Medium = 2,
    /// Thick line
    Thick = 3,
    /// Dashed line
    Dashed = 4,
    /// Dotted line
    Dotted = 5,
    /// Double line
    Double = 6,
    /// Hair line (very thin)
    Hair = 7,
    /// Medium dashed
    MediumDashed = 8,
    /// Dash-dot
    DashDot = 9,
    /// Medium dash-dot
    MediumDashDot = 10,
    /// Dash-dot-dot
    DashDotDot = 11,
    /// Medium dash-dot-dot
    MediumDashDotDot = 12,
    /// Slant dash-dot
    SlantDashDot = 13,
}

/// Diagonal border direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum DiagonalDirection {
    /// No diagonal
    #[default]
    None = 0,
    /// Diagonal from top-left to bottom-right
    Down = 1,
    /// Diagonal from bottom-left to top-right
    Up = 2,
    /// Both diagonals
    Both = 3,
}

/// One border edge: line style plus optional color.
#[derive(Debug, Clone, Default)]
pub(crate) struct BorderEdge {
    pub style: BorderLineStyle,
    pub color: Option<Color>,
}

impl BorderEdge {
    fn encode_key(&self, key: &mut KeyBuilder) {
        key.push_u8(self.style as u8);
        Color::encode_opt(self.color.as_ref(), key);
    }
}

/// Border settings plus the bundle's key/index cache.
#[derive(Debug, Clone, Default)]
pub(crate) struct BorderData {
    pub left: BorderEdge,
    pub right: BorderEdge,
    pub top: BorderEdge,
    pub bottom: BorderEdge,
    pub diagonal: BorderEdge,
    pub diagonal_direction: DiagonalDirection,
    cache: KeyCache,
}

impl BorderData {
    pub(crate) fn mark_dirty(&self) {
        self.cache.mark_dirty();
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.cache.is_dirty()
    }

    /// Canonical sub-key for the border alone.
    pub(crate) fn key(&self) -> FormatKey {
        self.cache.key_with(|b| {
            self.left.encode_key(b);
            self.right.encode_key(b);
            self.top.encode_key(b);
            self.bottom.encode_key(b);
            self.diagonal.encode_key(b);
            b.push_u8(self.diagonal_direction as u8);
        })
    }

    pub(crate) fn index(&self) -> Option<u32> {
        self.cache.index()
    }

    pub(crate) fn set_index(&mut self, index: u32) {
        self.cache.set_index(index);
    }

    pub(crate) fn index_valid(&self) -> bool {
        self.cache.index_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_positional() {
        // A left border and an identical right border are different content.
        let mut left = BorderData::default();
        left.left = BorderEdge {
            style: BorderLineStyle::Thin,
            color: Some(Color::BLACK),
        };
        let mut right = BorderData::default();
        right.right = BorderEdge {
            style: BorderLineStyle::Thin,
            color: Some(Color::BLACK),
        };
        assert_ne!(left.key(), right.key());
    }

    #[test]
    fn test_diagonal_direction_in_key() {
        let mut down = BorderData::default();
        down.diagonal = BorderEdge {
            style: BorderLineStyle::Thin,
            color: None,
        };
        down.diagonal_direction = DiagonalDirection::Down;
        let mut up = down.clone();
        up.diagonal_direction = DiagonalDirection::Up;
        up.mark_dirty();
        assert_ne!(down.key(), up.key());
    }
}
