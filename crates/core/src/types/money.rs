//! Decimal-string money arithmetic.
//!
//! Catalog feeds carry prices as decimal strings (e.g., `"29.99"`) to
//! preserve precision. All arithmetic goes through [`rust_decimal::Decimal`];
//! amounts are never touched as floats.

use rust_decimal::{Decimal, RoundingStrategy};

/// Parse a decimal-string amount.
///
/// Parsing is deliberately lenient: a malformed amount yields zero so that a
/// single bad price in a feed contributes nothing to a total instead of
/// aborting the whole computation. Surrounding whitespace is accepted.
#[must_use]
pub fn parse_amount(amount: &str) -> Decimal {
    amount.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Format an amount with exactly two decimal places.
///
/// Rounds half-up (`MidpointAwayFromZero`) at the formatting step, so
/// `"0.005"` formats as `"0.01"`. Zero formats as `"0.00"`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Extended total for one line: unit price times quantity.
#[must_use]
pub fn line_total(price: &str, quantity: u32) -> Decimal {
    parse_amount(price) * Decimal::from(quantity)
}
