//! Numeric normalizer — spreadsheet-formatted text to `f64`.
//!
//! Handles currency symbols, thousands separators, trailing percent signs and
//! accounting-style negatives (`(500)` is −500). Anything that does not end up
//! as a finite number is absent (`None`); this module never fails or panics.

/// Parse a raw cell into a finite number.
///
/// Rules, in order, on the trimmed text:
/// 1. empty → `None`
/// 2. whole string wrapped in `(...)` → negative, parentheses removed
/// 3. every `,` and `$` removed, one trailing `%` removed, stray leading `(`
///    or trailing `)` removed
/// 4. decimal parse; non-finite → `None`
/// 5. accounting sign applied to whatever was parsed, so `(-5)` is `5`
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (negative, inner) = match trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
    {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let mut cleaned: String = inner.chars().filter(|c| *c != ',' && *c != '$').collect();
    if cleaned.ends_with('%') {
        cleaned.pop();
    }
    let cleaned = cleaned.trim_start_matches('(').trim_end_matches(')').trim();
    if cleaned.is_empty() {
        return None;
    }

    let value = finite(cleaned.parse::<f64>().ok()?)?;
    Some(if negative { -value } else { value })
}

/// Parse an optional cell; a missing cell is absent.
pub fn parse_cell(raw: Option<&str>) -> Option<f64> {
    raw.and_then(parse_number)
}

/// Pass a numeric value through, rejecting NaN and infinities.
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
