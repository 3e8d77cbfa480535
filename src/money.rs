// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Monetary amounts as integer minor units.
//!
//! Users type amounts with either `,` or `.` as decimal separator. Amounts
//! are stored as `i64` minor units (cents for two decimals) and displayed
//! with a `,` separator.

use regex::Regex;
use std::sync::LazyLock;

/// Decimal places used for prices unless a currency says otherwise.
pub const DEFAULT_DECIMALS: u32 = 2;

/// Largest supported precision; 10^18 is the largest power of ten in `i64`.
pub const MAX_DECIMALS: u32 = 18;

/// One amount pattern per supported precision, indexed by decimals.
static AMOUNT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    (0..=MAX_DECIMALS)
        .map(|decimals| {
            let pattern = format!(r"^(-)?([0-9]*)(?:[.,]([0-9]{{0,{}}}))?[0-9]*$", decimals);
            Regex::new(&pattern).expect("amount pattern is valid")
        })
        .collect()
});

/// Errors from amount parsing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Unable to parse value string '{0}'")]
    Unparseable(String),

    #[error("Amount '{0}' is out of range")]
    Overflow(String),

    #[error("Unsupported precision: {0} decimals")]
    Precision(u32),
}

/// Parse a user-entered amount into minor units.
///
/// Whitespace is ignored. Fractional digits beyond `decimals` are dropped.
pub fn parse_monetary_value(input: &str, decimals: u32) -> Result<i64, MoneyError> {
    if decimals > MAX_DECIMALS {
        return Err(MoneyError::Precision(decimals));
    }

    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let re = AMOUNT_PATTERNS
        .get(decimals as usize)
        .ok_or(MoneyError::Precision(decimals))?;

    let unparseable = || MoneyError::Unparseable(input.to_string());
    let caps = re.captures(&compact).ok_or_else(unparseable)?;

    let negative = caps.get(1).is_some();
    let whole = caps.get(2).map_or("", |m| m.as_str());
    let fraction = caps.get(3).map_or("", |m| m.as_str());

    if whole.is_empty() && fraction.is_empty() {
        return Err(unparseable());
    }

    let overflow = || MoneyError::Overflow(input.to_string());
    let scale = 10_i64.pow(decimals);

    let whole_value = parse_digits(whole).ok_or_else(overflow)?;
    let fraction_value = parse_digits(fraction).ok_or_else(overflow)?;
    // "12,3" means 30 cents, not 3.
    let fraction_scale = 10_i64.pow(decimals - fraction.len() as u32);

    let magnitude = whole_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(fraction_value * fraction_scale))
        .ok_or_else(overflow)?;

    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_digits(digits: &str) -> Option<i64> {
    if digits.is_empty() {
        return Some(0);
    }
    digits.parse().ok()
}

/// Format minor units for display, e.g. `1234` → `"12,34"`.
pub fn format_amount(amount: i64, decimals: u32) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let magnitude = amount.unsigned_abs();

    if decimals == 0 {
        return format!("{}{}", sign, magnitude);
    }

    let scale = 10_u64.pow(decimals.min(MAX_DECIMALS + 1));
    format!(
        "{}{},{:0width$}",
        sign,
        magnitude / scale,
        magnitude % scale,
        width = decimals as usize
    )
}

/// Format an optional amount; missing amounts render as an empty string.
pub fn format_optional_amount(amount: Option<i64>, decimals: u32) -> String {
    amount.map_or_else(String::new, |a| format_amount(a, decimals))
}
