//! Token amount conversion
//!
//! Human decimal strings are converted to `uint256` fixed-point integers by
//! `f64` multiplication and truncation, and back by `f64` division. This is an
//! approximation: values beyond 2^53 smallest units lose precision. Quotes are
//! estimates, so the loss is accepted rather than pulling in exact decimal
//! arithmetic.

use alloy::primitives::U256;

/// Amount parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount: {0}")]
    Invalid(String),

    #[error("amount must be greater than zero: {0}")]
    NonPositive(String),

    #[error("amount out of range: {0}")]
    OutOfRange(String),
}

#[inline]
fn scale(decimals: u32) -> f64 {
    10f64.powi(decimals as i32)
}

/// Parse a human amount. Rejects empty, unparsable and non-finite input.
pub fn parse_amount(amount: &str) -> Result<f64, AmountError> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    let value: f64 = trimmed.parse().map_err(|_| AmountError::Invalid(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(AmountError::Invalid(trimmed.to_string()));
    }
    Ok(value)
}

/// `true` when the input should not trigger a quote at all: empty, or a number
/// that is zero or negative. Unparsable text is not idle; it is left to the
/// resolver to report.
pub fn is_idle_amount(amount: &str) -> bool {
    let trimmed = amount.trim();
    trimmed.is_empty() || matches!(trimmed.parse::<f64>(), Ok(v) if v <= 0.0)
}

/// Convert a human amount to fixed point, truncating toward zero.
///
/// `"1.5"` with 18 decimals becomes `1_500_000_000_000_000_000`. Amounts that
/// truncate to zero smallest units are rejected as non-positive, amounts past
/// `uint256` as out of range.
pub fn to_fixed_point(amount: &str, decimals: u32) -> Result<U256, AmountError> {
    let value = parse_amount(amount)?;
    if value <= 0.0 {
        return Err(AmountError::NonPositive(amount.trim().to_string()));
    }

    let scaled = (value * scale(decimals)).trunc();
    if scaled < 1.0 {
        return Err(AmountError::NonPositive(amount.trim().to_string()));
    }
    if !scaled.is_finite() {
        return Err(AmountError::OutOfRange(amount.trim().to_string()));
    }
    // `{:.0}` prints every integer digit of the f64
    format!("{scaled:.0}")
        .parse::<U256>()
        .map_err(|_| AmountError::OutOfRange(amount.trim().to_string()))
}

/// Convert a fixed-point integer back to a decimal string.
pub fn from_fixed_point(raw: U256, decimals: u32) -> String {
    let value = raw.to_string().parse::<f64>().unwrap_or(f64::INFINITY) / scale(decimals);
    format!("{value}")
}
