//! Cell format value type with copy-on-write storage

use std::cell::{Cell, RefCell};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::alignment::{AlignmentData, HorizontalAlignment, VerticalAlignment};
use crate::border::{BorderData, BorderLineStyle, DiagonalDirection};
use crate::color::Color;
use crate::fill::{FillData, PatternType};
use crate::font::{FontData, FontScript, Underline};
use crate::key::{FormatKey, IndexSlot, KeyBuilder};
use crate::number_format::{looks_like_date_time, NumberFormatData};

/// Cell protection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Protection {
    pub locked: bool,
    pub hidden: bool,
}

impl Default for Protection {
    fn default() -> Self {
        // Cells are locked by default; locking only takes effect once the
        // sheet itself is protected.
        Self {
            locked: true,
            hidden: false,
        }
    }
}

/// The shared aggregate state behind a [`Format`] handle.
///
/// At most one handle owns it mutably at a time; all other handles see it
/// as an immutable snapshot until they fork their own copy. The lazy
/// caches (dirty flags, cached keys, index validity) sit behind
/// `Cell`/`RefCell` so key computation can run through `&self`.
#[derive(Debug, Clone)]
pub(crate) struct FormatState {
    number: NumberFormatData,
    font: FontData,
    alignment: AlignmentData,
    border: BorderData,
    fill: FillData,
    protection: Protection,
    dxf: bool,
    theme: i32,
    dirty: Cell<bool>,
    cached_key: RefCell<FormatKey>,
    xf: IndexSlot,
    dxf_slot: IndexSlot,
}

impl Default for FormatState {
    fn default() -> Self {
        Self {
            number: NumberFormatData::default(),
            font: FontData::default(),
            alignment: AlignmentData::default(),
            border: BorderData::default(),
            fill: FillData::default(),
            protection: Protection::default(),
            dxf: false,
            theme: 0,
            dirty: Cell::new(true),
            cached_key: RefCell::new(FormatKey::default()),
            xf: IndexSlot::default(),
            dxf_slot: IndexSlot::default(),
        }
    }
}

/// A cell format: number format, font, alignment, borders, fill and
/// protection, bundled into one value.
///
/// `Format` is a copy-on-write handle. Cloning is O(1) — clones share the
/// underlying state until one of them is mutated, at which point the
/// mutating handle forks a private copy and the others keep their
/// snapshot. Reads never fork.
///
/// Equality is defined by content: two formats are equal exactly when
/// their canonical keys ([`Format::format_key`]) are byte-identical,
/// regardless of how or in what order the attributes were assigned. The
/// same keys drive deduplication in
/// [`FormatRegistry`](crate::FormatRegistry), which assigns the
/// font/border/fill and xf/dxf table indices cached on the format. A
/// cached index is only trustworthy while the corresponding
/// `*_index_valid` reports true; any mutation invalidates it until the
/// registry assigns a fresh one.
///
/// Single-threaded value semantics: the reference count on the shared
/// state is non-atomic, so handles sharing state must not be mutated from
/// multiple threads.
///
/// ```
/// use wren_sheets_style::{Color, Format};
///
/// let mut header = Format::new();
/// header.set_font_bold(true);
/// header.set_font_color(Color::WHITE);
///
/// let mut footer = header.clone(); // O(1), shares storage
/// footer.set_font_bold(false);     // forks; `header` is unaffected
/// assert!(header.font_bold());
/// assert_ne!(header, footer);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Format {
    state: Rc<FormatState>,
}

impl Format {
    /// Create a format with all attributes at their defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fork-then-mutate access: clones the shared state first if any other
    /// handle still references it.
    fn state_mut(&mut self) -> &mut FormatState {
        Rc::make_mut(&mut self.state)
    }

    // === Number format ===

    /// The number format id. Authoritative only while
    /// [`Format::number_format_resolved`] is true.
    pub fn number_format_index(&self) -> u32 {
        self.state.number.format_index
    }

    /// Set the number format to a built-in (or previously resolved custom)
    /// format id.
    ///
    /// A custom code set earlier stays in place; the date/time heuristic
    /// keeps consulting it.
    pub fn set_number_format_index(&mut self, index: u32) {
        let state = self.state_mut();
        state.number.format_index = index;
        state.number.resolved = true;
        state.dirty.set(true);
    }

    /// The custom number format code. Empty for formats addressed purely
    /// by built-in id.
    pub fn number_format(&self) -> &str {
        &self.state.number.format_string
    }

    /// Set a custom number format code, e.g. `"yyyy-mm-dd"` or `"0.00%"`.
    ///
    /// The code must later be resolved to a format id by the registry.
    /// Setting an empty code is a no-op.
    pub fn set_number_format(&mut self, format: impl Into<String>) {
        let format = format.into();
        if format.is_empty() {
            return;
        }
        let state = self.state_mut();
        state.number.format_string = format;
        state.number.resolved = false;
        state.dirty.set(true);
    }

    /// Whether `number_format_index` is authoritative, i.e. the format
    /// string (if any) has been resolved to an id.
    pub fn number_format_resolved(&self) -> bool {
        self.state.number.resolved
    }

    /// Registry write-back: record the id a format code resolved to.
    ///
    /// Marks the index authoritative from here on. Does not touch the
    /// dirty flag — the registry resolves before it computes keys, and
    /// re-registering an unchanged format must not shift its key.
    pub fn set_resolved_number_format(&mut self, index: u32, format: impl Into<String>) {
        let state = self.state_mut();
        state.number.format_index = index;
        state.number.format_string = format.into();
        state.number.resolved = true;
    }

    /// Guess whether this format displays dates or times.
    ///
    /// This is a heuristic over the format id ranges and the characters of
    /// the format code, not a format-language parser; see the crate docs
    /// for the exact rule.
    pub fn is_date_time_format(&self) -> bool {
        looks_like_date_time(&self.state.number)
    }

    // === Font ===

    /// Font size in points.
    pub fn font_size(&self) -> f64 {
        self.state.font.size
    }

    pub fn set_font_size(&mut self, size: f64) {
        let state = self.state_mut();
        state.font.size = size;
        state.font.mark_dirty();
    }

    pub fn font_bold(&self) -> bool {
        self.state.font.bold
    }

    pub fn set_font_bold(&mut self, bold: bool) {
        let state = self.state_mut();
        state.font.bold = bold;
        state.font.mark_dirty();
    }

    pub fn font_italic(&self) -> bool {
        self.state.font.italic
    }

    pub fn set_font_italic(&mut self, italic: bool) {
        let state = self.state_mut();
        state.font.italic = italic;
        state.font.mark_dirty();
    }

    pub fn font_strike_out(&self) -> bool {
        self.state.font.strike_out
    }

    pub fn set_font_strike_out(&mut self, strike_out: bool) {
        let state = self.state_mut();
        state.font.strike_out = strike_out;
        state.font.mark_dirty();
    }

    pub fn font_outline(&self) -> bool {
        self.state.font.outline
    }

    pub fn set_font_outline(&mut self, outline: bool) {
        let state = self.state_mut();
        state.font.outline = outline;
        state.font.mark_dirty();
    }

    pub fn font_shadow(&self) -> bool {
        self.state.font.shadow
    }

    pub fn set_font_shadow(&mut self, shadow: bool) {
        let state = self.state_mut();
        state.font.shadow = shadow;
        state.font.mark_dirty();
    }

    pub fn font_underline(&self) -> Underline {
        self.state.font.underline
    }

    pub fn set_font_underline(&mut self, underline: Underline) {
        let state = self.state_mut();
        state.font.underline = underline;
        state.font.mark_dirty();
    }

    pub fn font_script(&self) -> FontScript {
        self.state.font.script
    }

    pub fn set_font_script(&mut self, script: FontScript) {
        let state = self.state_mut();
        state.font.script = script;
        state.font.mark_dirty();
    }

    /// The font color.
    ///
    /// Returns `None` when no concrete color is set — including the case
    /// where only a theme reference is present. Theme references are not
    /// resolved here; the caller resolves them against the workbook theme.
    pub fn font_color(&self) -> Option<Color> {
        self.state.font.color
    }

    /// Set (or with `None`, clear) the font color.
    pub fn set_font_color(&mut self, color: impl Into<Option<Color>>) {
        let state = self.state_mut();
        state.font.color = color.into();
        state.font.mark_dirty();
    }

    /// Raw theme color reference, if the font color comes from the theme.
    pub fn font_theme_color(&self) -> Option<&str> {
        self.state.font.theme_color.as_deref()
    }

    pub fn set_font_theme_color(&mut self, theme: Option<String>) {
        let state = self.state_mut();
        state.font.theme_color = theme;
        state.font.mark_dirty();
    }

    /// Font family name (e.g., "Calibri", "Arial").
    pub fn font_name(&self) -> &str {
        &self.state.font.name
    }

    pub fn set_font_name(&mut self, name: impl Into<String>) {
        let state = self.state_mut();
        state.font.name = name.into();
        state.font.mark_dirty();
    }

    /// Font family id (2 = swiss, the Calibri default).
    pub fn font_family(&self) -> u8 {
        self.state.font.family
    }

    pub fn set_font_family(&mut self, family: u8) {
        let state = self.state_mut();
        state.font.family = family;
        state.font.mark_dirty();
    }

    /// Font scheme name ("major"/"minor"), if any.
    pub fn font_scheme(&self) -> Option<&str> {
        self.state.font.scheme.as_deref()
    }

    pub fn set_font_scheme(&mut self, scheme: Option<String>) {
        let state = self.state_mut();
        state.font.scheme = scheme;
        state.font.mark_dirty();
    }

    /// Canonical sub-key for the font bundle alone, used by the registry
    /// to deduplicate font definitions.
    pub fn font_key(&self) -> FormatKey {
        if self.state.font.is_dirty() {
            // The whole-value key embeds this sub-key; make sure it gets
            // re-generated even though the font's own flag clears here.
            self.state.dirty.set(true);
        }
        self.state.font.key()
    }

    /// The font's slot in the registry's font table, as last assigned.
    pub fn font_index(&self) -> Option<u32> {
        self.state.font.index()
    }

    /// Registry write-back of the font table index.
    pub fn set_font_index(&mut self, index: u32) {
        self.state_mut().font.set_index(index);
    }

    /// True while the cached font index can be trusted: an index was
    /// assigned and the font has not changed since.
    pub fn font_index_valid(&self) -> bool {
        self.state.font.index_valid()
    }

    // === Alignment ===

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.state.alignment.horizontal
    }

    /// Set the horizontal alignment.
    ///
    /// Incompatible indent/shrink-to-fit settings are normalized away; see
    /// [`HorizontalAlignment`] and the crate docs.
    pub fn set_horizontal_alignment(&mut self, align: HorizontalAlignment) {
        let state = self.state_mut();
        state.alignment.set_horizontal(align);
        state.dirty.set(true);
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.state.alignment.vertical
    }

    pub fn set_vertical_alignment(&mut self, align: VerticalAlignment) {
        let state = self.state_mut();
        state.alignment.set_vertical(align);
        state.dirty.set(true);
    }

    /// Whether cell text wraps.
    pub fn text_wrap(&self) -> bool {
        self.state.alignment.wrap
    }

    /// Enable text wrap. Wrapping and shrink-to-fit are mutually
    /// exclusive; enabling wrap clears shrink-to-fit.
    pub fn set_text_wrap(&mut self, wrap: bool) {
        let state = self.state_mut();
        state.alignment.set_wrap(wrap);
        state.dirty.set(true);
    }

    /// Text rotation in degrees: 0..=180, or 255 for vertical text.
    pub fn rotation(&self) -> u16 {
        self.state.alignment.rotation
    }

    /// Set the text rotation. Must be in [0, 180] or 255; out-of-range
    /// values are stored as given.
    pub fn set_rotation(&mut self, rotation: u16) {
        let state = self.state_mut();
        state.alignment.set_rotation(rotation);
        state.dirty.set(true);
    }

    /// Text indentation level (0..=15).
    pub fn indent(&self) -> u8 {
        self.state.alignment.indent
    }

    /// Set the indentation level. A non-zero indent forces the horizontal
    /// alignment to left unless it is general/left/right/justify.
    pub fn set_indent(&mut self, indent: u8) {
        let state = self.state_mut();
        state.alignment.set_indent(indent);
        state.dirty.set(true);
    }

    pub fn shrink_to_fit(&self) -> bool {
        self.state.alignment.shrink_to_fit
    }

    /// Turn shrink-to-fit on or off. Enabling it clears wrap and resets a
    /// fill/justify/distributed horizontal alignment to left.
    pub fn set_shrink_to_fit(&mut self, shrink: bool) {
        let state = self.state_mut();
        state.alignment.set_shrink_to_fit(shrink);
        state.dirty.set(true);
    }

    /// True when any alignment field differs from its default.
    ///
    /// Presentation query only (e.g. deciding whether an alignment record
    /// is worth writing) — the canonical key always includes alignment.
    pub fn has_alignment(&self) -> bool {
        !self.state.alignment.is_default()
    }

    // === Borders ===

    /// Set the same line style on the left, right, top and bottom borders.
    pub fn set_border_style(&mut self, style: BorderLineStyle) {
        self.set_left_border_style(style);
        self.set_right_border_style(style);
        self.set_top_border_style(style);
        self.set_bottom_border_style(style);
    }

    /// Set the same color on the left, right, top and bottom borders.
    pub fn set_border_color(&mut self, color: impl Into<Option<Color>>) {
        let color = color.into();
        self.set_left_border_color(color);
        self.set_right_border_color(color);
        self.set_top_border_color(color);
        self.set_bottom_border_color(color);
    }

    pub fn left_border_style(&self) -> BorderLineStyle {
        self.state.border.left.style
    }

    pub fn set_left_border_style(&mut self, style: BorderLineStyle) {
        let state = self.state_mut();
        state.border.left.style = style;
        state.border.mark_dirty();
    }

    pub fn left_border_color(&self) -> Option<Color> {
        self.state.border.left.color
    }

    pub fn set_left_border_color(&mut self, color: impl Into<Option<Color>>) {
        let state = self.state_mut();
        state.border.left.color = color.into();
        state.border.mark_dirty();
    }

    pub fn right_border_style(&self) -> BorderLineStyle {
        self.state.border.right.style
    }

    pub fn set_right_border_style(&mut self, style: BorderLineStyle) {
        let state = self.state_mut();
        state.border.right.style = style;
        state.border.mark_dirty();
    }

    pub fn right_border_color(&self) -> Option<Color> {
        self.state.border.right.color
    }

    pub fn set_right_border_color(&mut self, color: impl Into<Option<Color>>) {
        let state = self.state_mut();
        state.border.right.color = color.into();
        state.border.mark_dirty();
    }

    pub fn top_border_style(&self) -> BorderLineStyle {
        self.state.border.top.style
    }

    pub fn set_top_border_style(&mut self, style: BorderLineStyle) {
        let state = self.state_mut();
        state.border.top.style = style;
        state.border.mark_dirty();
    }

    pub fn top_border_color(&self) -> Option<Color> {
        self.state.border.top.color
    }

    pub fn set_top_border_color(&mut self, color: impl Into<Option<Color>>) {
        let state = self.state_mut();
        state.border.top.color = color.into();
        state.border.mark_dirty();
    }

    pub fn bottom_border_style(&self) -> BorderLineStyle {
        self.state.border.bottom.style
    }

    pub fn set_bottom_border_style(&mut self, style: BorderLineStyle) {
        let state = self.state_mut();
        state.border.bottom.style = style;
        state.border.mark_dirty();
    }

    pub fn bottom_border_color(&self) -> Option<Color> {
        self.state.border.bottom.color
    }

    pub fn set_bottom_border_color(&mut self, color: impl Into<Option<Color>>) {
        let state = self.state_mut();
        state.border.bottom.color = color.into();
        state.border.mark_dirty();
    }

    pub fn diagonal_border_style(&self) -> BorderLineStyle {
        self.state.border.diagonal.style
    }

    pub fn set_diagonal_border_style(&mut self, style: BorderLineStyle) {
        let state = self.state_mut();
        state.border.diagonal.style = style;
        state.border.mark_dirty();
    }

    pub fn diagonal_border_color(&self) -> Option<Color> {
        self.state.border.diagonal.color
    }

    pub fn set_diagonal_border_color(&mut self, color: impl Into<Option<Color>>) {
        let state = self.state_mut();
        state.border.diagonal.color = color.into();
        state.border.mark_dirty();
    }

    pub fn diagonal_direction(&self) -> DiagonalDirection {
        self.state.border.diagonal_direction
    }

    pub fn set_diagonal_direction(&mut self, direction: DiagonalDirection) {
        let state = self.state_mut();
        state.border.diagonal_direction = direction;
        state.border.mark_dirty();
    }

    /// Canonical sub-key for the border bundle alone.
    pub fn border_key(&self) -> FormatKey {
        if self.state.border.is_dirty() {
            self.state.dirty.set(true);
        }
        self.state.border.key()
    }

    pub fn border_index(&self) -> Option<u32> {
        self.state.border.index()
    }

    /// Registry write-back of the border table index.
    pub fn set_border_index(&mut self, index: u32) {
        self.state_mut().border.set_index(index);
    }

    pub fn border_index_valid(&self) -> bool {
        self.state.border.index_valid()
    }

    // === Fill ===

    pub fn fill_pattern(&self) -> PatternType {
        self.state.fill.pattern
    }

    pub fn set_fill_pattern(&mut self, pattern: PatternType) {
        let state = self.state_mut();
        state.fill.pattern = pattern;
        state.fill.mark_dirty();
    }

    pub fn pattern_foreground_color(&self) -> Option<Color> {
        self.state.fill.foreground
    }

    /// Set the pattern foreground color. Setting a color while no pattern
    /// is active implies a solid fill.
    pub fn set_pattern_foreground_color(&mut self, color: impl Into<Option<Color>>) {
        self.state_mut().fill.set_foreground(color.into());
    }

    pub fn pattern_background_color(&self) -> Option<Color> {
        self.state.fill.background
    }

    pub fn set_pattern_background_color(&mut self, color: impl Into<Option<Color>>) {
        self.state_mut().fill.set_background(color.into());
    }

    /// Canonical sub-key for the fill bundle alone.
    pub fn fill_key(&self) -> FormatKey {
        if self.state.fill.is_dirty() {
            self.state.dirty.set(true);
        }
        self.state.fill.key()
    }

    pub fn fill_index(&self) -> Option<u32> {
        self.state.fill.index()
    }

    /// Registry write-back of the fill table index.
    pub fn set_fill_index(&mut self, index: u32) {
        self.state_mut().fill.set_index(index);
    }

    pub fn fill_index_valid(&self) -> bool {
        self.state.fill.index_valid()
    }

    // === Protection ===

    /// Whether formulas are hidden while the sheet is protected.
    pub fn hidden(&self) -> bool {
        self.state.protection.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        let state = self.state_mut();
        state.protection.hidden = hidden;
        state.dirty.set(true);
    }

    /// Whether the cell is locked while the sheet is protected.
    pub fn locked(&self) -> bool {
        self.state.protection.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        let state = self.state_mut();
        state.protection.locked = locked;
        state.dirty.set(true);
    }

    // === Whole-value key and registry indices ===

    /// The whole-value canonical key: font, border and fill sub-keys
    /// followed by the number format id, alignment and protection, in a
    /// fixed byte layout.
    ///
    /// Recomputed lazily when this value or any of its bundles changed
    /// since the last computation; recomputation invalidates the cached
    /// xf/dxf indices, since they were assigned for the previous content.
    pub fn format_key(&self) -> FormatKey {
        let state = &*self.state;
        if state.dirty.get()
            || state.font.is_dirty()
            || state.border.is_dirty()
            || state.fill.is_dirty()
        {
            let mut builder = KeyBuilder::with_capacity(128);
            builder.push_key(&state.font.key());
            builder.push_key(&state.border.key());
            builder.push_key(&state.fill.key());
            builder.push_u32(state.number.format_index);
            state.alignment.encode_key(&mut builder);
            builder.push_bool(state.protection.hidden);
            builder.push_bool(state.protection.locked);
            *state.cached_key.borrow_mut() = builder.finish();
            state.dirty.set(false);
            state.xf.invalidate();
            state.dxf_slot.invalidate();
        }
        state.cached_key.borrow().clone()
    }

    /// The format's slot in the cell-format (xf) table, as last assigned.
    pub fn xf_index(&self) -> Option<u32> {
        self.state.xf.get()
    }

    /// Registry write-back of the xf table index.
    pub fn set_xf_index(&mut self, index: u32) {
        self.state_mut().xf.set(index);
    }

    /// True while the cached xf index can be trusted: an index was
    /// assigned and nothing has changed since.
    pub fn xf_index_valid(&self) -> bool {
        !self.state.dirty.get() && self.state.xf.is_valid()
    }

    /// The format's slot in the differential-format (dxf) table, as last
    /// assigned.
    pub fn dxf_index(&self) -> Option<u32> {
        self.state.dxf_slot.get()
    }

    /// Registry write-back of the dxf table index.
    pub fn set_dxf_index(&mut self, index: u32) {
        self.state_mut().dxf_slot.set(index);
    }

    pub fn dxf_index_valid(&self) -> bool {
        !self.state.dirty.get() && self.state.dxf_slot.is_valid()
    }

    /// Whether this is a differential format: a record describing only the
    /// changes applied under a condition (conditional formatting), rather
    /// than a complete cell style.
    pub fn is_dxf_format(&self) -> bool {
        self.state.dxf
    }

    /// Mark this format as a differential (dxf) record.
    ///
    /// The flag selects which registry table the record is filed under; it
    /// is not part of the canonical content and does not invalidate keys
    /// or cached indices.
    pub fn set_dxf_format(&mut self, dxf: bool) {
        self.state_mut().dxf = dxf;
    }

    /// Workbook theme id this format was defined against.
    pub fn theme(&self) -> i32 {
        self.state.theme
    }

    /// Set the theme id. Like the dxf flag, this is bookkeeping outside
    /// the canonical content.
    pub fn set_theme(&mut self, theme: i32) {
        self.state_mut().theme = theme;
    }
}

impl PartialEq for Format {
    fn eq(&self, other: &Self) -> bool {
        self.format_key() == other.format_key()
    }
}

impl Eq for Format {}

impl Hash for Format {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.format_key().hash(state);
    }
}
