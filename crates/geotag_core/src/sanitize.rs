//! Value normalizers for geo metadata.
//!
//! # Responsibility
//! - Normalize raw stored values into bounded, well-typed values.
//! - Provide the same normalization as write-time hooks for the meta store.
//!
//! # Invariants
//! - No function here fails; malformed input degrades to absent/false.
//! - Each sanitizer is idempotent on its own output.
//! - A coordinate of zero is absent.

use crate::model::meta_value::MetaValue;
use once_cell::sync::Lazy;
use regex::Regex;

/// Decimal places kept for coordinates (about 1.1 cm at the equator).
pub const COORDINATE_PRECISION: i32 = 7;

static SCRIPT_STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)[^>]*?>.*?</(script|style)>").expect("valid script regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static OCTET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("valid octet regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Visibility flag: `true` iff the raw value reads as a positive integer.
pub fn sanitize_public_flag(raw: &MetaValue) -> bool {
    raw.to_non_negative_int() != 0
}

/// Coordinate normalizer.
///
/// Returns `None` for falsy input and for input without a numeric reading.
/// Otherwise rounds to [`COORDINATE_PRECISION`] places; a result that is
/// zero or not finite is also `None`.
pub fn sanitize_coordinate(raw: &MetaValue) -> Option<f64> {
    if !raw.is_truthy() {
        return None;
    }
    let rounded = round_to_precision(raw.as_number()?, COORDINATE_PRECISION);
    if !rounded.is_finite() || rounded == 0.0 {
        return None;
    }
    Some(rounded)
}

/// Free-text normalizer used for address labels on the write path.
///
/// Drops script/style blocks and markup, percent-encoded octets and
/// line breaks, then collapses whitespace.
pub fn sanitize_text_field(raw: &str) -> String {
    let without_blocks = SCRIPT_STYLE_RE.replace_all(raw, "");
    let without_tags = TAG_RE.replace_all(&without_blocks, "");
    let without_octets = OCTET_RE.replace_all(&without_tags, "");
    WHITESPACE_RE
        .replace_all(&without_octets, " ")
        .trim()
        .to_string()
}

/// Write hook for the public flag: stores `1` or `0`.
pub fn sanitize_public_meta(raw: &MetaValue) -> MetaValue {
    MetaValue::Integer(i64::from(sanitize_public_flag(raw)))
}

/// Write hook for coordinates: stores the rounded value or null.
pub fn sanitize_coordinate_meta(raw: &MetaValue) -> MetaValue {
    MetaValue::from(sanitize_coordinate(raw))
}

/// Write hook for free text.
pub fn sanitize_text_meta(raw: &MetaValue) -> MetaValue {
    MetaValue::Text(sanitize_text_field(&raw.to_text()))
}

fn round_to_precision(value: f64, places: i32) -> f64 {
    // Past 2^53 / 10^places there are no fractional digits left to round.
    if value.abs() >= 1e15 {
        return value;
    }
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::{
        sanitize_coordinate, sanitize_coordinate_meta, sanitize_public_flag,
        sanitize_public_meta, sanitize_text_field, sanitize_text_meta,
    };
    use crate::model::meta_value::MetaValue;

    fn text(value: &str) -> MetaValue {
        MetaValue::from(value)
    }

    #[test]
    fn public_flag_follows_non_negative_integer_reading() {
        assert!(sanitize_public_flag(&text("1")));
        assert!(sanitize_public_flag(&text("42")));
        assert!(sanitize_public_flag(&MetaValue::Integer(1)));
        assert!(sanitize_public_flag(&MetaValue::Bool(true)));
        assert!(!sanitize_public_flag(&text("0")));
        assert!(!sanitize_public_flag(&text("")));
        assert!(!sanitize_public_flag(&text("-5")));
        assert!(!sanitize_public_flag(&text("yes")));
        assert!(!sanitize_public_flag(&MetaValue::Null));
    }

    #[test]
    fn coordinate_rounds_to_seven_places() {
        assert_eq!(
            sanitize_coordinate(&text("45.1234567891")),
            Some(45.1234568)
        );
        assert_eq!(sanitize_coordinate(&text("-93")), Some(-93.0));
        assert_eq!(sanitize_coordinate(&MetaValue::Real(12.5)), Some(12.5));
        assert_eq!(sanitize_coordinate(&text("1e305")), Some(1e305));
        assert_eq!(sanitize_coordinate(&MetaValue::Real(-1e300)), Some(-1e300));
    }

    #[test]
    fn falsy_coordinates_are_absent() {
        assert_eq!(sanitize_coordinate(&text("0")), None);
        assert_eq!(sanitize_coordinate(&text("")), None);
        assert_eq!(sanitize_coordinate(&MetaValue::Null), None);
        assert_eq!(sanitize_coordinate(&MetaValue::Bool(false)), None);
        assert_eq!(sanitize_coordinate(&MetaValue::Integer(0)), None);
    }

    #[test]
    fn zero_valued_and_non_numeric_coordinates_are_absent() {
        assert_eq!(sanitize_coordinate(&text("0.0")), None);
        assert_eq!(sanitize_coordinate(&text("0.00000001")), None);
        assert_eq!(sanitize_coordinate(&text("north")), None);
        assert_eq!(sanitize_coordinate(&MetaValue::Real(f64::NAN)), None);
        assert_eq!(sanitize_coordinate(&MetaValue::Real(f64::INFINITY)), None);
    }

    #[test]
    fn write_hooks_are_idempotent() {
        let inputs = [
            text("45.1234567891"),
            text("-93"),
            text("0"),
            text("junk"),
            MetaValue::Real(0.12345678),
        ];
        for input in inputs {
            let once = sanitize_coordinate_meta(&input);
            assert_eq!(sanitize_coordinate_meta(&once), once, "{input:?}");

            let flag = sanitize_public_meta(&input);
            assert_eq!(sanitize_public_meta(&flag), flag, "{input:?}");
        }
    }

    #[test]
    fn public_write_hook_stores_integer_flag() {
        assert_eq!(sanitize_public_meta(&text("1")), MetaValue::Integer(1));
        assert_eq!(sanitize_public_meta(&text("on")), MetaValue::Integer(0));
    }

    #[test]
    fn text_field_strips_markup_and_collapses_whitespace() {
        assert_eq!(
            sanitize_text_field("  St.\tPaul,\n<b>MN</b> <script>alert(1)</script> "),
            "St. Paul, MN"
        );
        assert_eq!(sanitize_text_field("Caf%C3%A9 du Monde"), "Caf du Monde");
        assert_eq!(sanitize_text_field("Zürich"), "Zürich");
        assert_eq!(
            sanitize_text_meta(&MetaValue::Integer(221)),
            MetaValue::Text("221".to_string())
        );
    }
}
