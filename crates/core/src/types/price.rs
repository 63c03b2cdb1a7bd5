//! Price display formatting using decimal arithmetic.
//!
//! Arithmetic stays in [`Decimal`]; these helpers only turn a final amount
//! into the text shown in badges, drawers and the CLI.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes the storefront can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }

    /// Parse an ISO code, case-insensitively.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "INR" => Some(Self::INR),
            "USD" => Some(Self::USD),
            "EUR" => Some(Self::EUR),
            "GBP" => Some(Self::GBP),
            _ => None,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Format an amount for display, e.g. `₹1,234.50` or `₹599`.
///
/// Thousands are grouped with commas. Whole amounts have no fraction; other
/// amounts are rounded half away from zero to two places.
///
/// ```
/// use plantomart_core::{CurrencyCode, format_amount};
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::from(599), CurrencyCode::INR), "₹599");
/// assert_eq!(format_amount(Decimal::new(12345, 1), CurrencyCode::INR), "₹1,234.50");
/// ```
#[must_use]
pub fn format_amount(amount: Decimal, currency: CurrencyCode) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = rounded.abs();
    let whole = abs.trunc();
    let fraction = abs - whole;

    let grouped = group_thousands(&whole.normalize().to_string());
    if fraction.is_zero() {
        format!("{sign}{}{grouped}", currency.symbol())
    } else {
        // fraction is in (0, 1) with at most two places, so this is "0.xx"
        let cents = format!("{:.2}", fraction.normalize());
        let digits = cents.trim_start_matches('0');
        format!("{sign}{}{grouped}{digits}", currency.symbol())
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_amounts() {
        assert_eq!(format_amount(Decimal::ZERO, CurrencyCode::INR), "₹0");
        assert_eq!(format_amount(Decimal::from(999), CurrencyCode::INR), "₹999");
        assert_eq!(format_amount(Decimal::from(1000), CurrencyCode::INR), "₹1,000");
        assert_eq!(
            format_amount(Decimal::from(1_234_567), CurrencyCode::USD),
            "$1,234,567"
        );
    }

    #[test]
    fn test_trailing_zero_scale_is_whole() {
        assert_eq!(format_amount(Decimal::new(25000, 2), CurrencyCode::INR), "₹250");
    }

    #[test]
    fn test_fractional_amounts() {
        assert_eq!(format_amount(Decimal::new(995, 1), CurrencyCode::INR), "₹99.50");
        assert_eq!(format_amount(Decimal::new(12_345_678, 3), CurrencyCode::EUR), "€12,345.68");
        assert_eq!(format_amount(Decimal::new(5, 3), CurrencyCode::GBP), "£0.01");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(format_amount(Decimal::new(-15005, 1), CurrencyCode::INR), "-₹1,500.50");
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(CurrencyCode::parse("inr"), Some(CurrencyCode::INR));
        assert_eq!(CurrencyCode::parse("USD"), Some(CurrencyCode::USD));
        assert_eq!(CurrencyCode::parse("JPY"), None);
    }
}
