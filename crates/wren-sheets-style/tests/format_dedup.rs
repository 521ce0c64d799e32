//! End-to-end tests for format value semantics and registry deduplication

use pretty_assertions::assert_eq;
use wren_sheets_style::{
    BorderLineStyle, Color, Format, FormatRegistry, HorizontalAlignment, Underline,
    VerticalAlignment,
};

fn report_header() -> Format {
    let mut format = Format::new();
    format.set_font_name("Arial");
    format.set_font_bold(true);
    format.set_font_underline(Underline::Single);
    format.set_font_color(Color::WHITE);
    format.set_pattern_foreground_color(Color::from_hex("#4472C4").unwrap());
    format.set_border_style(BorderLineStyle::Thin);
    format.set_border_color(Color::BLACK);
    format.set_horizontal_alignment(HorizontalAlignment::Center);
    format.set_vertical_alignment(VerticalAlignment::Center);
    format.set_text_wrap(true);
    format
}

#[test]
fn test_key_determinism_across_construction_order() {
    // The same attribute assignments in a different order must produce
    // byte-identical keys.
    let a = report_header();

    let mut b = Format::new();
    b.set_text_wrap(true);
    b.set_vertical_alignment(VerticalAlignment::Center);
    b.set_horizontal_alignment(HorizontalAlignment::Center);
    b.set_border_color(Color::BLACK);
    b.set_border_style(BorderLineStyle::Thin);
    b.set_pattern_foreground_color(Color::from_hex("#4472C4").unwrap());
    b.set_font_color(Color::WHITE);
    b.set_font_underline(Underline::Single);
    b.set_font_bold(true);
    b.set_font_name("Arial");

    assert_eq!(a.format_key(), b.format_key());
    assert_eq!(a, b);

    // Changing any single field breaks equality.
    let mut c = report_header();
    c.set_font_underline(Underline::Double);
    assert_ne!(a, c);
}

#[test]
fn test_fork_isolation() {
    let a = report_header();
    let key_before = a.format_key();
    let size_before = a.font_size();

    let mut b = a.clone();
    b.set_font_size(24.0);

    assert_eq!(a.font_size(), size_before);
    assert_eq!(a.format_key(), key_before);
    assert_eq!(b.font_size(), 24.0);
    assert_ne!(a, b);

    // The fork is per-write, not per-clone: further clones of `a` still
    // share until they mutate.
    let c = a.clone();
    assert_eq!(c, a);
}

#[test]
fn test_index_invalidation_cycle() {
    let mut registry = FormatRegistry::new();
    let mut format = report_header();

    registry.add_format(&mut format);
    assert!(format.xf_index_valid());
    assert!(format.font_index_valid());
    assert!(format.border_index_valid());
    assert!(format.fill_index_valid());

    // Any mutation drops the whole-value index; only the touched bundle
    // loses its sub-index.
    format.set_locked(false);
    assert!(!format.xf_index_valid());
    assert!(format.font_index_valid());

    let second = registry.add_format(&mut format);
    assert!(format.xf_index_valid());
    assert_eq!(format.xf_index(), Some(second));
}

#[test]
fn test_registry_collapses_identical_values() {
    let mut registry = FormatRegistry::new();

    let mut indices = Vec::new();
    for _ in 0..100 {
        let mut format = report_header();
        indices.push(registry.add_format(&mut format));
    }
    indices.dedup();
    assert_eq!(indices.len(), 1);
    // Default format plus the header.
    assert_eq!(registry.xf_formats().len(), 2);
    assert_eq!(registry.fonts().len(), 2);
}

#[test]
fn test_builtin_code_and_index_converge() {
    // A format addressed by built-in id and one addressed by the matching
    // code resolve to the same key, hence the same xf slot.
    let mut registry = FormatRegistry::new();

    let mut by_index = Format::new();
    by_index.set_number_format_index(10);
    let mut by_code = Format::new();
    by_code.set_number_format("0.00%");

    let ia = registry.add_format(&mut by_index);
    let ib = registry.add_format(&mut by_code);
    assert_eq!(ia, ib);
    assert_eq!(by_code.number_format_index(), 10);
}

#[test]
fn test_alignment_normalization_sequences() {
    // indent=3 with general, then horizontal=fill: indent resets.
    let mut a = Format::new();
    a.set_indent(3);
    assert_eq!(a.horizontal_alignment(), HorizontalAlignment::General);
    a.set_horizontal_alignment(HorizontalAlignment::Fill);
    assert_eq!(a.indent(), 0);

    // shrink-to-fit with justify: alignment resets to left, wrap stays off.
    let mut b = Format::new();
    b.set_horizontal_alignment(HorizontalAlignment::Justify);
    b.set_shrink_to_fit(true);
    assert_eq!(b.horizontal_alignment(), HorizontalAlignment::Left);
    assert!(!b.text_wrap());
    assert!(b.shrink_to_fit());
}

#[test]
fn test_date_time_heuristic() {
    let mut format = Format::new();
    format.set_number_format_index(16);
    assert!(format.is_date_time_format());

    format.set_number_format_index(14);
    assert!(!format.is_date_time_format());

    format.set_number_format("[Red]yyyy-mm-dd");
    assert!(format.is_date_time_format());

    let mut percent = Format::new();
    percent.set_number_format("0.00%");
    assert!(!percent.is_date_time_format());
}

#[test]
fn test_dxf_and_xf_spaces() {
    let mut registry = FormatRegistry::new();

    // Conditional-formatting rule: red text on light red fill.
    let mut rule = Format::new();
    rule.set_font_color(Color::from_hex("#9C0006").unwrap());
    rule.set_pattern_foreground_color(Color::from_hex("#FFC7CE").unwrap());
    let dxf = registry.add_dxf_format(&mut rule);
    assert_eq!(dxf, 0);
    assert!(rule.is_dxf_format());
    assert!(rule.dxf_index_valid());

    // The same appearance used as a plain cell style lives in the xf
    // space, unaffected by the dxf table.
    let mut cell = Format::new();
    cell.set_font_color(Color::from_hex("#9C0006").unwrap());
    cell.set_pattern_foreground_color(Color::from_hex("#FFC7CE").unwrap());
    let xf = registry.add_format(&mut cell);
    assert_eq!(xf, 1);
    assert_eq!(registry.dxf_formats().len(), 1);
}

#[test]
fn test_theme_reference_yields_no_concrete_color() {
    let mut format = Format::new();
    format.set_font_theme_color(Some("1".to_string()));
    // Resolution is deferred to the caller; the reference alone is not a
    // concrete color, but it is part of the canonical content.
    assert_eq!(format.font_color(), None);
    assert_ne!(format, Format::new());
}
