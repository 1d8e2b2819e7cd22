//! Conversions between divtoshi (the integer base unit) and DVD (the
//! 8-decimal display unit), plus the uDVD and mDVD sub-units.
//!
//! All arithmetic is done in [`Decimal`] and always truncates toward zero.
//! Floats are converted through their shortest decimal representation, so
//! `1.234567891_f64` is treated as exactly `1.234567891`.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places of the display unit.
pub const DISPLAY_PRECISION: u32 = 8;

/// Divtoshi per DVD.
const DIVTOSHI_PER_DVD: i64 = 100_000_000;
const MICRO_PER_DVD: i64 = 1_000_000;
const MILLI_PER_DVD: i64 = 1_000;
const SUB_UNIT_PRECISION: u32 = 4;
/// Largest scale a `Decimal` can carry.
const MAX_SCALE: u32 = 28;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("invalid amount argument: {0}")]
    InvalidArgument(String),
}

/// A value that can be read as an exact decimal amount.
pub trait AsDecimal {
    fn as_decimal(&self) -> Result<Decimal, AmountError>;
}

impl AsDecimal for Decimal {
    fn as_decimal(&self) -> Result<Decimal, AmountError> {
        Ok(*self)
    }
}

impl AsDecimal for i64 {
    fn as_decimal(&self) -> Result<Decimal, AmountError> {
        Ok(Decimal::from(*self))
    }
}

impl AsDecimal for f64 {
    fn as_decimal(&self) -> Result<Decimal, AmountError> {
        if !self.is_finite() {
            return Err(AmountError::InvalidArgument(self.to_string()));
        }
        // f64 Display never uses exponent notation.
        self.to_string().as_str().as_decimal()
    }
}

impl AsDecimal for &str {
    fn as_decimal(&self) -> Result<Decimal, AmountError> {
        let trimmed = self.trim();
        Decimal::from_str(within_scale(trimmed))
            .map_err(|e| AmountError::InvalidArgument(format!("`{trimmed}`: {e}")))
    }
}

/// Drop fraction digits a `Decimal` cannot hold, so parsing never rounds.
fn within_scale(literal: &str) -> &str {
    let Some(dot) = literal.find('.') else {
        return literal;
    };
    let integer_digits = literal[..dot]
        .trim_start_matches(['+', '-'])
        .trim_start_matches('0')
        .len();
    let fraction_digits = (MAX_SCALE as usize).saturating_sub(integer_digits);
    let end = if fraction_digits == 0 {
        dot
    } else {
        dot + 1 + fraction_digits
    };
    literal.get(..end).unwrap_or(literal)
}

impl AsDecimal for String {
    fn as_decimal(&self) -> Result<Decimal, AmountError> {
        self.as_str().as_decimal()
    }
}

impl AsDecimal for &String {
    fn as_decimal(&self) -> Result<Decimal, AmountError> {
        self.as_str().as_decimal()
    }
}

/// Divtoshi to DVD, always rendered with 8 decimals (`1000` → `"0.00001000"`).
pub fn to_display_unit(divtoshi: i64) -> String {
    Decimal::new(divtoshi, DISPLAY_PRECISION).to_string()
}

/// DVD to divtoshi (`"0.00001000"` → `"1000"`). Digits past the 8th decimal
/// are dropped.
pub fn to_base_unit(dvd: impl AsDecimal) -> Result<String, AmountError> {
    let fixed = fixed_decimal(dvd.as_decimal()?, DISPLAY_PRECISION)?;
    Ok(scaled(fixed, DIVTOSHI_PER_DVD, 0)?.to_string())
}

/// DVD to uDVD with 4 decimals (`"0.00001000"` → `"10.0000"`).
pub fn to_micro_unit(dvd: impl AsDecimal) -> Result<String, AmountError> {
    let fixed = fixed_decimal(dvd.as_decimal()?, DISPLAY_PRECISION)?;
    Ok(scaled(fixed, MICRO_PER_DVD, SUB_UNIT_PRECISION)?.to_string())
}

/// DVD to mDVD with 4 decimals (`"0.00001000"` → `"0.0100"`).
pub fn to_milli_unit(dvd: impl AsDecimal) -> Result<String, AmountError> {
    let fixed = fixed_decimal(dvd.as_decimal()?, DISPLAY_PRECISION)?;
    Ok(scaled(fixed, MILLI_PER_DVD, SUB_UNIT_PRECISION)?.to_string())
}

/// Render `number` with exactly `precision` decimals, truncating instead of
/// rounding (`to_fixed(1.234567891, 4)` → `"1.2345"`).
pub fn to_fixed(number: impl AsDecimal, precision: u32) -> Result<String, AmountError> {
    Ok(fixed_decimal(number.as_decimal()?, precision)?.to_string())
}

fn fixed_decimal(value: Decimal, precision: u32) -> Result<Decimal, AmountError> {
    if precision > MAX_SCALE {
        return Err(AmountError::InvalidArgument(format!(
            "precision {precision} exceeds {MAX_SCALE}"
        )));
    }
    let mut fixed = value.round_dp_with_strategy(precision, RoundingStrategy::ToZero);
    fixed.rescale(precision);
    if fixed.scale() != precision {
        return Err(AmountError::InvalidArgument(format!(
            "{value} cannot be held with {precision} decimals"
        )));
    }
    if fixed.is_zero() {
        fixed.set_sign_positive(true);
    }
    Ok(fixed)
}

fn scaled(value: Decimal, factor: i64, precision: u32) -> Result<Decimal, AmountError> {
    let product = value
        .checked_mul(Decimal::from(factor))
        .ok_or_else(|| AmountError::InvalidArgument(format!("{value} is out of range")))?;
    fixed_decimal(product, precision)
}
