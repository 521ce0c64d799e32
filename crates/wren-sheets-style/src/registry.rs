//! Format registry: canonical-key interning and index assignment

use ahash::AHashMap;

use crate::format::Format;
use crate::key::FormatKey;
use crate::number_format::BUILTIN_FORMATS;

/// First id available for custom number formats; lower ids are reserved
/// for built-ins.
const FIRST_CUSTOM_NUM_FMT_ID: u32 = 164;

/// Deduplicating style registry.
///
/// Spreadsheet files store each unique style definition once and reference
/// it by index from cells. The registry interns formats by their canonical
/// keys: the whole value into the xf (cell format) or dxf (differential
/// format) table, and the font/border/fill bundles into their own tables.
/// Assigned indices are written back onto the [`Format`], which reports
/// them as valid until its content changes again.
///
/// Lookups are exact — the maps are keyed by the full canonical bytes, so
/// no post-lookup collision check is needed.
///
/// ```
/// use wren_sheets_style::{Color, Format, FormatRegistry};
///
/// let mut registry = FormatRegistry::new();
/// let mut a = Format::new();
/// a.set_font_bold(true);
/// let mut b = Format::new();
/// b.set_font_bold(true);
///
/// let idx = registry.add_format(&mut a);
/// assert_eq!(registry.add_format(&mut b), idx); // deduplicated
/// ```
#[derive(Debug)]
pub struct FormatRegistry {
    xf_formats: Vec<Format>,
    xf_indexes: AHashMap<FormatKey, u32>,
    dxf_formats: Vec<Format>,
    dxf_indexes: AHashMap<FormatKey, u32>,
    fonts: Vec<Format>,
    font_indexes: AHashMap<FormatKey, u32>,
    borders: Vec<Format>,
    border_indexes: AHashMap<FormatKey, u32>,
    fills: Vec<Format>,
    fill_indexes: AHashMap<FormatKey, u32>,
    builtin_num_fmts: AHashMap<&'static str, u32>,
    custom_num_fmts: AHashMap<String, u32>,
    custom_num_fmt_codes: Vec<(u32, String)>,
    next_custom_num_fmt_id: u32,
}

impl FormatRegistry {
    /// Create a registry seeded with the default format at xf index 0.
    pub fn new() -> Self {
        let mut registry = Self {
            xf_formats: Vec::with_capacity(16),
            xf_indexes: AHashMap::with_capacity(16),
            dxf_formats: Vec::new(),
            dxf_indexes: AHashMap::new(),
            fonts: Vec::with_capacity(4),
            font_indexes: AHashMap::with_capacity(4),
            borders: Vec::with_capacity(4),
            border_indexes: AHashMap::with_capacity(4),
            fills: Vec::with_capacity(4),
            fill_indexes: AHashMap::with_capacity(4),
            builtin_num_fmts: BUILTIN_FORMATS.iter().map(|&(id, code)| (code, id)).collect(),
            custom_num_fmts: AHashMap::new(),
            custom_num_fmt_codes: Vec::new(),
            next_custom_num_fmt_id: FIRST_CUSTOM_NUM_FMT_ID,
        };

        // Index 0 is always the default cell format.
        let mut default = Format::new();
        registry.add_format(&mut default);
        registry
    }

    /// Intern a cell format, returning its xf table index.
    ///
    /// Resolves a pending custom number format code first, then interns
    /// the font/border/fill bundles into their tables, then the whole
    /// value. All assigned indices are written back onto `format`; an
    /// identical format registered earlier reuses its indices. The stored
    /// snapshot is an O(1) clone — later mutations of `format` fork away
    /// from it and leave the table entry untouched.
    pub fn add_format(&mut self, format: &mut Format) -> u32 {
        self.resolve_number_format(format);

        if !format.font_index_valid() {
            let key = format.font_key();
            match self.font_indexes.get(&key) {
                Some(&index) => format.set_font_index(index),
                None => {
                    let index = self.fonts.len() as u32;
                    self.font_indexes.insert(key, index);
                    // Written back before storing, so the representative
                    // snapshot carries its own index.
                    format.set_font_index(index);
                    self.fonts.push(format.clone());
                }
            }
        }

        if !format.border_index_valid() {
            let key = format.border_key();
            match self.border_indexes.get(&key) {
                Some(&index) => format.set_border_index(index),
                None => {
                    let index = self.borders.len() as u32;
                    self.border_indexes.insert(key, index);
                    format.set_border_index(index);
                    self.borders.push(format.clone());
                }
            }
        }

        if !format.fill_index_valid() {
            let key = format.fill_key();
            match self.fill_indexes.get(&key) {
                Some(&index) => format.set_fill_index(index),
                None => {
                    let index = self.fills.len() as u32;
                    self.fill_indexes.insert(key, index);
                    format.set_fill_index(index);
                    self.fills.push(format.clone());
                }
            }
        }

        let key = format.format_key();
        if let Some(&index) = self.xf_indexes.get(&key) {
            format.set_xf_index(index);
            return index;
        }
        let index = self.xf_formats.len() as u32;
        self.xf_indexes.insert(key, index);
        format.set_xf_index(index);
        self.xf_formats.push(format.clone());
        index
    }

    /// Intern a differential (conditional-formatting) format, returning
    /// its dxf table index.
    ///
    /// Dxf records are stored whole; their font/border/fill bundles do not
    /// join the shared definition tables.
    pub fn add_dxf_format(&mut self, format: &mut Format) -> u32 {
        format.set_dxf_format(true);
        self.resolve_number_format(format);

        let key = format.format_key();
        if let Some(&index) = self.dxf_indexes.get(&key) {
            format.set_dxf_index(index);
            return index;
        }
        let index = self.dxf_formats.len() as u32;
        self.dxf_indexes.insert(key, index);
        format.set_dxf_index(index);
        self.dxf_formats.push(format.clone());
        index
    }

    /// Resolve a pending custom number format code to an id: reuse the
    /// built-in id when the code matches a built-in format, reuse an
    /// earlier custom assignment for the same code, else allocate the next
    /// custom id (starting at 164).
    fn resolve_number_format(&mut self, format: &mut Format) {
        if format.number_format_resolved() {
            return;
        }

        let code = format.number_format().to_string();
        let id = if let Some(&id) = self.builtin_num_fmts.get(code.as_str()) {
            id
        } else if let Some(&id) = self.custom_num_fmts.get(&code) {
            id
        } else {
            let id = self.next_custom_num_fmt_id;
            self.next_custom_num_fmt_id += 1;
            self.custom_num_fmts.insert(code.clone(), id);
            self.custom_num_fmt_codes.push((id, code.clone()));
            id
        };
        format.set_resolved_number_format(id, code);
    }

    /// All interned cell formats, in xf index order (0 is the default).
    pub fn xf_formats(&self) -> &[Format] {
        &self.xf_formats
    }

    /// All interned differential formats, in dxf index order.
    pub fn dxf_formats(&self) -> &[Format] {
        &self.dxf_formats
    }

    /// One representative format per font table entry, in index order.
    pub fn fonts(&self) -> &[Format] {
        &self.fonts
    }

    /// One representative format per border table entry, in index order.
    pub fn borders(&self) -> &[Format] {
        &self.borders
    }

    /// One representative format per fill table entry, in index order.
    pub fn fills(&self) -> &[Format] {
        &self.fills
    }

    /// Custom number formats assigned so far, as (id, code) pairs in
    /// assignment order.
    pub fn custom_number_formats(&self) -> &[(u32, String)] {
        &self.custom_num_fmt_codes
    }

    /// Look up an interned cell format by xf index.
    pub fn xf_format(&self, index: u32) -> Option<&Format> {
        self.xf_formats.get(index as usize)
    }

    /// Look up an interned differential format by dxf index.
    pub fn dxf_format(&self, index: u32) -> Option<&Format> {
        self.dxf_formats.get(index as usize)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
