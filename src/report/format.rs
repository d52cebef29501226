//! Cell formatting for the CLI tables: money columns in the summary and
//! budget views, usage percentages, and clipping of category labels and
//! news titles to their column width.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"$1,234,567.89"`
pub fn format_amount(val: Decimal) -> String {
    let abs = val
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO && !abs.is_zero() {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Whole-number percentage, e.g. `79.6` → `"80%"`.
pub fn format_percent(val: Decimal) -> String {
    let rounded = val.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{}%", rounded.normalize())
}

/// Clip `s` to a column `width` chars wide, ending clipped text with "…".
pub fn truncate(s: &str, width: usize) -> String {
    match s.char_indices().nth(width) {
        None => s.to_string(),
        Some(_) if width == 0 => String::new(),
        Some(_) => {
            let cut = s
                .char_indices()
                .nth(width - 1)
                .map_or(s.len(), |(idx, _)| idx);
            format!("{}…", &s[..cut])
        }
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
