//! # wren-sheets-style
//!
//! Cell format value types and style deduplication core for the
//! wren-sheets spreadsheet library.
//!
//! Spreadsheet files store each unique style once in a shared table and
//! reference it by index from millions of cells, so the heart of this
//! crate is not the attribute getters and setters — it is the machinery
//! that lets many logically identical [`Format`] values collapse to one
//! stored definition while their cached indices stay honest as values
//! mutate and get copied around:
//!
//! - [`Format`] — a copy-on-write handle over the aggregate style state.
//!   Cloning is O(1); the first mutation after a clone forks a private
//!   copy, so sibling handles keep their snapshot.
//! - Canonical keys ([`FormatKey`]) — a deterministic byte encoding of
//!   content, doubling as the equality witness and the deduplication
//!   lookup key. Sub-keys exist per font/border/fill bundle; recomputation
//!   is lazy, driven by cascading dirty flags.
//! - [`FormatRegistry`] — interns canonical keys into the xf/dxf and
//!   font/border/fill index tables and writes the assigned indices back
//!   onto the formats. Any later mutation reports those indices invalid
//!   until re-registration.
//!
//! ## Example
//!
//! ```rust
//! use wren_sheets_style::{Color, Format, FormatRegistry, HorizontalAlignment};
//!
//! let mut title = Format::new();
//! title.set_font_bold(true);
//! title.set_font_size(16.0);
//! title.set_horizontal_alignment(HorizontalAlignment::Center);
//! title.set_pattern_foreground_color(Color::from_hex("#DDEBF7").unwrap());
//!
//! let mut registry = FormatRegistry::new();
//! let xf = registry.add_format(&mut title);
//! assert!(title.xf_index_valid());
//!
//! // Content changes invalidate the cached index until re-registration.
//! title.set_font_size(18.0);
//! assert!(!title.xf_index_valid());
//! let xf2 = registry.add_format(&mut title);
//! assert_ne!(xf, xf2);
//! ```
//!
//! Theme-based colors are carried as unresolved references: resolving them
//! against workbook theme data is the caller's job, and until then color
//! queries report no concrete color.
//!
//! Values are single-threaded by design (non-atomic reference counts); use
//! external synchronization if handles sharing state must cross threads.

mod alignment;
mod border;
mod color;
mod fill;
mod font;
mod format;
mod key;
mod number_format;
mod registry;

pub use alignment::{HorizontalAlignment, VerticalAlignment};
pub use border::{BorderLineStyle, DiagonalDirection};
pub use color::{Color, ParseColorError};
pub use fill::PatternType;
pub use font::{FontScript, Underline};
pub use format::Format;
pub use key::{FormatKey, KeyBuilder};
pub use number_format::builtin_format_code;
pub use registry::FormatRegistry;
