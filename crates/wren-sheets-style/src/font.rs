//! Font attribute bundle

use crate::color::Color;
use crate::key::{FormatKey, KeyCache};

/// Underline style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Underline {
    /// No underline
    #[default]
    None = 0,
    /// Single underline
    Single = 1,
    /// Double underline
    Double = 2,
    /// Single accounting underline (extends to cell width)
    SingleAccounting = 3,
    /// Double accounting underline
    DoubleAccounting = 4,
}

/// Superscript/subscript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum FontScript {
    /// Normal baseline
    #[default]
    Normal = 0,
    /// Superscript
    Super = 1,
    /// Subscript
    Sub = 2,
}

/// Font settings plus the bundle's key/index cache.
///
/// `theme_color` is a raw reference into the workbook theme. It is never
/// resolved here: while it is set and `color` is empty, color queries
/// report no concrete color and the caller resolves against theme data.
#[derive(Debug, Clone)]
pub(crate) struct FontData {
    pub name: String,
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub strike_out: bool,
    pub outline: bool,
    pub shadow: bool,
    pub underline: Underline,
    pub script: FontScript,
    pub color: Option<Color>,
    pub theme_color: Option<String>,
    pub family: u8,
    pub scheme: Option<String>,
    cache: KeyCache,
}

impl Default for FontData {
    fn default() -> Self {
        Self {
            name: "Calibri".to_string(),
            size: 11.0,
            bold: false,
            italic: false,
            strike_out: false,
            outline: false,
            shadow: false,
            underline: Underline::None,
            script: FontScript::Normal,
            color: None,
            theme_color: None,
            family: 2,
            scheme: None,
            cache: KeyCache::default(),
        }
    }
}

impl FontData {
    pub(crate) fn mark_dirty(&self) {
        self.cache.mark_dirty();
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.cache.is_dirty()
    }

    /// Canonical sub-key for the font alone. Recomputed lazily while the
    /// bundle is dirty; recomputation drops the cached index's validity.
    pub(crate) fn key(&self) -> FormatKey {
        self.cache.key_with(|b| {
            b.push_f64(self.size);
            b.push_bool(self.bold);
            b.push_bool(self.italic);
            b.push_bool(self.strike_out);
            b.push_bool(self.outline);
            b.push_bool(self.shadow);
            b.push_u8(self.underline as u8);
            b.push_u8(self.script as u8);
            Color::encode_opt(self.color.as_ref(), b);
            b.push_opt_str(self.theme_color.as_deref());
            b.push_u8(self.family);
            b.push_str(&self.name);
            b.push_opt_str(self.scheme.as_deref());
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
    fn test_key_stable_until_mutation() {
        let font = FontData::default();
        let key = font.key();
        assert_eq!(key, font.key());

        let mut bold = FontData::default();
        bold.bold = true;
        bold.mark_dirty();
        assert_ne!(key, bold.key());
    }

    #[test]
    fn test_index_invalid_while_dirty() {
        let mut font = FontData::default();
        font.key();
        font.set_index(4);
        assert!(font.index_valid());

        font.size = 14.0;
        font.mark_dirty();
        assert!(!font.index_valid());
        assert_eq!(font.index(), Some(4));

        // Recomputing the key clears the dirty flag but not the staleness.
        font.key();
        assert!(!font.index_valid());
        font.set_index(9);
        assert!(font.index_valid());
    }

    #[test]
    fn test_theme_color_is_key_content() {
        let plain = FontData::default();
        let mut themed = FontData::default();
        themed.theme_color = Some("1".to_string());
        assert_ne!(plain.key(), themed.key());
    }
}
