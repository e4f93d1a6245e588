//! Currency-aware number formatting.
//!
//! Renders values the way an en-US locale would: thousands separators, a currency
//! symbol prefix, two fraction digits for prices and compact `K`/`M`/`B`/`T`
//! suffixes for large magnitudes such as market capitalization. The locale is
//! fixed; only the currency varies.
//!
//! The `try_*` functions report unrecognized currencies and non-finite values as
//! [`CoinpaneError::Format`]. The plain functions recover from that by falling back
//! to the raw numeric rendering, so a bad currency code never breaks the table.
//!
//! ```
//! use coinpane::domain::CurrencyCode;
//! use coinpane::market::format::{format_compact_value, format_price};
//!
//! let usd = CurrencyCode::new("usd");
//! assert_eq!(format_price(1234.5, &usd), "$1,234.50");
//! assert_eq!(format_compact_value(1_250_000_000.0, &usd), "$1.25B");
//! ```

use crate::domain::{CoinpaneError, CurrencyCode, Result};

/// Placeholder rendered for values the upstream API did not provide.
pub const MISSING_VALUE: &str = "n/a";

/// Compact notation units, smallest first.
const COMPACT_UNITS: [(f64, &str); 5] = [
    (1.0, ""),
    (1e3, "K"),
    (1e6, "M"),
    (1e9, "B"),
    (1e12, "T"),
];

/// Returns the prefix printed before an amount in `currency`.
///
/// Well-known currencies use their en-US symbol; any other three-letter code is
/// printed as the uppercase code followed by a space.
fn currency_prefix(currency: &CurrencyCode) -> Result<String> {
    if !currency.is_well_formed() {
        return Err(CoinpaneError::Format(format!(
            "unrecognized currency code {:?}",
            currency.as_str()
        )));
    }

    let symbol = match currency.as_str() {
        "usd" => "$",
        "eur" => "€",
        "gbp" => "£",
        "jpy" => "¥",
        "cny" => "CN¥",
        "aud" => "A$",
        "cad" => "CA$",
        "hkd" => "HK$",
        "nzd" => "NZ$",
        "mxn" => "MX$",
        "twd" => "NT$",
        "inr" => "₹",
        "krw" => "₩",
        "brl" => "R$",
        "ils" => "₪",
        "vnd" => "₫",
        _ => return Ok(format!("{} ", currency.display())),
    };
    Ok(symbol.to_string())
}

fn ensure_finite(value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoinpaneError::Format(format!("cannot format {value}")))
    }
}

/// Inserts `,` separators into a string of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Groups the integer part of a `ddd.ff` decimal string.
fn group_decimal(decimal: &str) -> String {
    match decimal.split_once('.') {
        Some((int, frac)) => format!("{}.{frac}", group_thousands(int)),
        None => group_thousands(decimal),
    }
}

/// Drops trailing fractional zeros and a dangling decimal point.
fn trim_fraction(decimal: &str) -> &str {
    if decimal.contains('.') {
        decimal.trim_end_matches('0').trim_end_matches('.')
    } else {
        decimal
    }
}

fn with_sign(negative: bool, prefix: &str, body: &str) -> String {
    if negative {
        format!("-{prefix}{body}")
    } else {
        format!("{prefix}{body}")
    }
}

/// Formats `value` as a currency amount with exactly two fraction digits.
///
/// # Errors
///
/// Returns [`CoinpaneError::Format`] if `currency` is not a three-letter code or
/// `value` is not finite.
pub fn try_format_price(value: f64, currency: &CurrencyCode) -> Result<String> {
    ensure_finite(value)?;
    let prefix = currency_prefix(currency)?;

    let body = format!("{:.2}", value.abs());
    let negative = value < 0.0 && body != "0.00";
    Ok(with_sign(negative, &prefix, &group_decimal(&body)))
}

/// Formats `value` in compact notation (`$1.25B`).
///
/// The largest unit not exceeding the magnitude is chosen, the scaled value keeps
/// at most two fraction digits, and a value that rounds up to 1000 of a unit is
/// promoted to the next unit.
///
/// # Errors
///
/// Returns [`CoinpaneError::Format`] if `currency` is not a three-letter code or
/// `value` is not finite.
pub fn try_format_compact_value(value: f64, currency: &CurrencyCode) -> Result<String> {
    ensure_finite(value)?;
    let prefix = currency_prefix(currency)?;

    let magnitude = value.abs();
    let mut unit = COMPACT_UNITS
        .iter()
        .rposition(|(scale, _)| magnitude >= *scale)
        .unwrap_or(0);

    let mut scaled = format!("{:.2}", magnitude / COMPACT_UNITS[unit].0);
    if unit + 1 < COMPACT_UNITS.len() && scaled.parse::<f64>().is_ok_and(|s| s >= 1000.0) {
        unit += 1;
        scaled = format!("{:.2}", magnitude / COMPACT_UNITS[unit].0);
    }

    let digits = trim_fraction(&scaled);
    let negative = value < 0.0 && digits != "0";
    let body = format!("{}{}", group_decimal(digits), COMPACT_UNITS[unit].1);
    Ok(with_sign(negative, &prefix, &body))
}

/// Formats a price, falling back to the raw number if formatting fails.
#[must_use]
pub fn format_price(value: f64, currency: &CurrencyCode) -> String {
    try_format_price(value, currency).unwrap_or_else(|e| {
        tracing::debug!(error = %e, value = value, "price formatting fell back to raw value");
        value.to_string()
    })
}

/// Formats a large value compactly, falling back to the raw number if formatting fails.
#[must_use]
pub fn format_compact_value(value: f64, currency: &CurrencyCode) -> String {
    try_format_compact_value(value, currency).unwrap_or_else(|e| {
        tracing::debug!(error = %e, value = value, "compact formatting fell back to raw value");
        value.to_string()
    })
}

/// Formats a 24h change as a signed percentage (`+1.23%`, `-0.50%`).
///
/// Zero counts as a gain and renders as `+0.00%`.
#[must_use]
pub fn format_percent_change(value: f64) -> String {
    if !value.is_finite() {
        return MISSING_VALUE.to_string();
    }
    if value >= 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

/// Formats an optional price, rendering [`MISSING_VALUE`] for `None`.
#[must_use]
pub fn format_optional_price(value: Option<f64>, currency: &CurrencyCode) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), |v| format_price(v, currency))
}

/// Formats an optional large value, rendering [`MISSING_VALUE`] for `None`.
#[must_use]
pub fn format_optional_compact(value: Option<f64>, currency: &CurrencyCode) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), |v| format_compact_value(v, currency))
}
