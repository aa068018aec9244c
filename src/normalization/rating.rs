//! Numeric extraction from free-text review columns.
//!
//! Review exports store ratings as strings like `"4.5 stars"` and counts as
//! `"1,234 reviews"`. Everything that cannot be part of the number is
//! stripped before parsing; an empty remainder means the value is absent.

/// Parse a rating by keeping only ASCII digits and decimal points.
///
/// Characters are filtered, not truncated: `"4.5 stars"` yields `4.5` but so
/// does `"4 .5"`. A remainder that is empty or not a valid float (`"4.5.1"`,
/// `"."`) is absent.
pub fn parse_rating(input: &str) -> Option<f64> {
    let digits: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok()
}

/// Parse a review count by keeping only ASCII digits.
///
/// Suffix multipliers are not interpreted: `"3.9K"` becomes `39`.
pub fn parse_review_count(input: &str) -> Option<i64> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok()
}
