// Safe numeric coercion for hand-maintained spreadsheet cells.
//
// Every helper here returns a usable number: blanks, garbage, negative
// counts and non-finite values all collapse to zero.

/// Parse a non-negative count.
///
/// Accepts plain integers and finite decimals (truncated toward zero, so a
/// cell exported as `7.0` reads as 7). Anything else, including negative
/// values and values that overflow `u32`, yields 0.
pub fn parse_count(value: &str) -> u32 {
    let cleaned = value.trim();
    if cleaned.is_empty() {
        return 0;
    }
    if let Ok(n) = cleaned.parse::<u32>() {
        return n;
    }
    match cleaned.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f < u32::MAX as f64 + 1.0 => f.trunc() as u32,
        _ => 0,
    }
}

/// Parse a count cell, returning `None` for a blank cell and a coerced count
/// otherwise.
pub fn parse_optional_count(value: &str) -> Option<u32> {
    let cleaned = value.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(parse_count(cleaned))
    }
}

/// Parse a decimal. Blank, unparseable and non-finite input yields 0.0.
/// Negative values are returned as-is; callers decide what a negative
/// means for their field.
pub fn parse_decimal(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(f) if f.is_finite() => f,
        _ => 0.0,
    }
}

/// Divide, returning 0.0 when the denominator is zero.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
