//! Number format state and built-in format table

use once_cell::sync::Lazy;
use regex::Regex;

/// Built-in number formats (id, format code).
///
/// Ids below 164 are reserved for built-ins; custom formats are assigned
/// ids from 164 upwards by the registry.
pub(crate) const BUILTIN_FORMATS: &[(u32, &str)] = &[
    (0, "General"),
    (1, "0"),
    (2, "0.00"),
    (3, "#,##0"),
    (4, "#,##0.00"),
    (5, "($#,##0_);($#,##0)"),
    (6, "($#,##0_);[Red]($#,##0)"),
    (7, "($#,##0.00_);($#,##0.00)"),
    (8, "($#,##0.00_);[Red]($#,##0.00)"),
    (9, "0%"),
    (10, "0.00%"),
    (11, "0.00E+00"),
    (12, "# ?/?"),
    (13, "# ??/??"),
    (14, "mm-dd-yy"),
    (15, "d-mmm-yy"),
    (16, "d-mmm"),
    (17, "mmm-yy"),
    (18, "h:mm AM/PM"),
    (19, "h:mm:ss AM/PM"),
    (20, "h:mm"),
    (21, "h:mm:ss"),
    (22, "m/d/yy h:mm"),
    (37, "#,##0 ;(#,##0)"),
    (38, "#,##0 ;[Red](#,##0)"),
    (39, "#,##0.00;(#,##0.00)"),
    (40, "#,##0.00;[Red](#,##0.00)"),
    (41, "_(* #,##0_);_(* (#,##0);_(* \"-\"_);_(@_)"),
    (42, "_($* #,##0_);_($* (#,##0);_($* \"-\"_);_(@_)"),
    (43, "_(* #,##0.00_);_(* (#,##0.00);_(* \"-\"??_);_(@_)"),
    (44, "_($* #,##0.00_);_($* (#,##0.00);_($* \"-\"??_);_(@_)"),
    (45, "mm:ss"),
    (46, "[h]:mm:ss"),
    (47, "mm:ss.0"),
    (48, "##0.0E+0"),
    (49, "@"),
];

/// Format code for a built-in number format id, if `id` is one.
pub fn builtin_format_code(id: u32) -> Option<&'static str> {
    BUILTIN_FORMATS
        .iter()
        .find(|(fmt_id, _)| *fmt_id == id)
        .map(|(_, code)| *code)
}

/// Number format state.
///
/// `resolved == true` means `format_index` is authoritative (a built-in id
/// or a previously resolved custom id). `resolved == false` means
/// `format_string` still has to be resolved to an index by the registry,
/// and implies the string is non-empty.
#[derive(Debug, Clone)]
pub(crate) struct NumberFormatData {
    pub format_index: u32,
    pub format_string: String,
    pub resolved: bool,
}

impl Default for NumberFormatData {
    fn default() -> Self {
        Self {
            format_index: 0,
            format_string: String::new(),
            resolved: true,
        }
    }
}

/// Guess whether a number format displays dates or times.
///
/// Heuristic, not a format-language parser. A resolved index with no custom
/// string is checked against the built-in date/time id ranges [15,22] and
/// [45,47]. Otherwise color directive tokens ([Green], [Red], ...) are
/// stripped from the format string and any remaining `d`, `m`, `h`, `y` or
/// `s` (case-sensitive) counts as a date/time code.
pub(crate) fn looks_like_date_time(data: &NumberFormatData) -> bool {
    static COLOR_TOKEN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\[(Green|White|Blue|Magenta|Yellow|Cyan|Red)\]").unwrap());
    static DATE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new("[dmhys]").unwrap());

    if data.resolved && data.format_string.is_empty() {
        let idx = data.format_index;
        (15..=22).contains(&idx) || (45..=47).contains(&idx)
    } else {
        let stripped = COLOR_TOKEN.replace_all(&data.format_string, "");
        DATE_CODE.is_match(&stripped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_index(index: u32) -> NumberFormatData {
        NumberFormatData {
            format_index: index,
            format_string: String::new(),
            resolved: true,
        }
    }

    fn by_string(code: &str) -> NumberFormatData {
        NumberFormatData {
            format_index: 0,
            format_string: code.to_string(),
            resolved: false,
        }
    }

    #[test]
    fn test_builtin_table_lookup() {
        assert_eq!(builtin_format_code(0), Some("General"));
        assert_eq!(builtin_format_code(22), Some("m/d/yy h:mm"));
        assert_eq!(builtin_format_code(49), Some("@"));
        assert_eq!(builtin_format_code(23), None);
        assert_eq!(builtin_format_code(164), None);
    }

    #[test]
    fn test_builtin_date_ranges() {
        // 14 sits outside the checked range; the heuristic keeps that quirk.
        assert!(!looks_like_date_time(&by_index(14)));
        assert!(looks_like_date_time(&by_index(15)));
        assert!(looks_like_date_time(&by_index(16)));
        assert!(looks_like_date_time(&by_index(22)));
        assert!(!looks_like_date_time(&by_index(23)));
        assert!(looks_like_date_time(&by_index(45)));
        assert!(looks_like_date_time(&by_index(47)));
        assert!(!looks_like_date_time(&by_index(48)));
        assert!(!looks_like_date_time(&by_index(0)));
    }

    #[test]
    fn test_custom_string_heuristic() {
        assert!(looks_like_date_time(&by_string("[Red]yyyy-mm-dd")));
        assert!(looks_like_date_time(&by_string("hh:mm:ss")));
        assert!(!looks_like_date_time(&by_string("0.00%")));
        // Color token letters themselves must not trigger the check:
        // stripping "[Red]" leaves "0.00" with no date codes.
        assert!(!looks_like_date_time(&by_string("[Red]0.00")));
        // ... but an unlisted color token is not stripped, so its letters
        // still count ("Gold" contains a 'd').
        assert!(looks_like_date_time(&by_string("[Gold]0.00")));
    }

    #[test]
    fn test_case_sensitivity() {
        // Uppercase codes are not date codes to this heuristic.
        assert!(!looks_like_date_time(&by_string("YYYY-MM-DD")));
    }
}
