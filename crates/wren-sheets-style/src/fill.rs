//! Fill attribute bundle

use crate::color::Color;
use crate::key::{FormatKey, KeyCache};

/// Pattern fill types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum PatternType {
    /// No pattern
    #[default]
    None = 0,
    /// Solid (100% foreground)
    Solid = 1,
    /// 50% gray
    MediumGray = 2,
    /// 75% gray
    DarkGray = 3,
    /// 25% gray
    LightGray = 4,
    /// Horizontal stripe
    DarkHorizontal = 5,
    /// Vertical stripe
    DarkVertical = 6,
    /// Diagonal stripe (down)
    DarkDown = 7,
    /// Diagonal stripe (up)
    DarkUp = 8,
    /// Grid
    DarkGrid = 9,
    /// Trellis
    DarkTrellis = 10,
    /// Thin horizontal stripe
    LightHorizontal = 11,
    /// Thin vertical stripe
    LightVertical = 12,
    /// Thin diagonal stripe (down)
    LightDown = 13,
    /// Thin diagonal stripe (up)
    LightUp = 14,
    /// Thin grid
    LightGrid = 15,
    /// Thin trellis
    LightTrellis = 16,
    /// 12.5% gray
    Gray125 = 17,
    /// 6.25% gray
    Gray0625 = 18,
}

/// Fill settings plus the bundle's key/index cache.
#[derive(Debug, Clone, Default)]
pub(crate) struct FillData {
    pub pattern: PatternType,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    cache: KeyCache,
}

impl FillData {
    pub(crate) fn mark_dirty(&self) {
        self.cache.mark_dirty();
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.cache.is_dirty()
    }

    /// Setting a color while no pattern is active implies a solid fill.
    pub(crate) fn set_foreground(&mut self, color: Option<Color>) {
        if color.is_some() && self.pattern == PatternType::None {
            self.pattern = PatternType::Solid;
        }
        self.foreground = color;
        self.mark_dirty();
    }

    pub(crate) fn set_background(&mut self, color: Option<Color>) {
        if color.is_some() && self.pattern == PatternType::None {
            self.pattern = PatternType::Solid;
        }
        self.background = color;
        self.mark_dirty();
    }

    /// Canonical sub-key for the fill alone.
    pub(crate) fn key(&self) -> FormatKey {
        self.cache.key_with(|b| {
            b.push_u8(self.pattern as u8);
            Color::encode_opt(self.foreground.as_ref(), b);
            Color::encode_opt(self.background.as_ref(), b);
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
    fn test_color_promotes_pattern_to_solid() {
        let mut fill = FillData::default();
        fill.set_foreground(Some(Color::YELLOW));
        assert_eq!(fill.pattern, PatternType::Solid);

        // An explicit pattern is left alone.
        let mut striped = FillData::default();
        striped.pattern = PatternType::DarkHorizontal;
        striped.set_background(Some(Color::GRAY));
        assert_eq!(striped.pattern, PatternType::DarkHorizontal);
    }

    #[test]
    fn test_clearing_color_keeps_pattern() {
        let mut fill = FillData::default();
        fill.set_foreground(Some(Color::RED));
        fill.set_foreground(None);
        assert_eq!(fill.pattern, PatternType::Solid);
        assert_eq!(fill.foreground, None);
    }

    #[test]
    fn test_foreground_background_not_interchangeable() {
        let mut fg = FillData::default();
        fg.pattern = PatternType::LightGrid;
        fg.set_foreground(Some(Color::BLUE));
        let mut bg = FillData::default();
        bg.pattern = PatternType::LightGrid;
        bg.set_background(Some(Color::BLUE));
        assert_ne!(fg.key(), bg.key());
    }
}
