//! # Token Units
//!
//! Conversion between whole-token amounts and smallest units
//! (1 MNT = 10^18 units).
//!
//! ```
//! use mnt_ledger::units::{format_units, parse_units, to_base_units};
//!
//! let amount = parse_units("1.5").unwrap();
//! assert_eq!(format_units(amount), "1.5");
//! assert_eq!(to_base_units(111), parse_units("111").unwrap());
//! ```

use crate::domain::{TOKEN_DECIMALS, U256};
use thiserror::Error;

/// Failure to parse a human-readable amount.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitsError {
    /// Input was empty or only a decimal point.
    #[error("empty amount")]
    Empty,

    /// Input contained something other than digits and one decimal point.
    #[error("invalid amount {input:?}")]
    InvalidDigits {
        /// The rejected input.
        input: String,
    },

    /// More fractional digits than the token supports.
    #[error("too many fractional digits: {found} (max {max})")]
    TooPrecise {
        /// Fractional digits in the input.
        found: usize,
        /// Supported fractional digits.
        max: usize,
    },

    /// Value does not fit in 256 bits.
    #[error("amount overflows 256 bits")]
    Overflow,
}

/// Smallest units in one whole token.
#[must_use]
pub fn one_token() -> U256 {
    U256::exp10(usize::from(TOKEN_DECIMALS))
}

/// Whole tokens to smallest units. Cannot overflow.
#[must_use]
pub fn to_base_units(whole: u64) -> U256 {
    U256::from(whole) * one_token()
}

/// Parse a decimal amount such as `"111"`, `"1.5"` or `".25"` into smallest
/// units.
pub fn parse_units(input: &str) -> Result<U256, UnitsError> {
    let input = input.trim();
    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (input, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(UnitsError::Empty);
    }
    let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !digits_only(whole) || !digits_only(fraction) {
        return Err(UnitsError::InvalidDigits {
            input: input.to_string(),
        });
    }

    let decimals = usize::from(TOKEN_DECIMALS);
    if fraction.len() > decimals {
        return Err(UnitsError::TooPrecise {
            found: fraction.len(),
            max: decimals,
        });
    }

    let whole = parse_digits(whole)?
        .checked_mul(one_token())
        .ok_or(UnitsError::Overflow)?;
    let fraction = parse_digits(fraction)? * U256::exp10(decimals - fraction.len());

    whole.checked_add(fraction).ok_or(UnitsError::Overflow)
}

/// Render smallest units as a decimal token amount, trailing zeros trimmed.
#[must_use]
pub fn format_units(amount: U256) -> String {
    let (whole, fraction) = amount.div_mod(one_token());
    if fraction.is_zero() {
        return whole.to_string();
    }
    let fraction = format!(
        "{:0width$}",
        fraction.low_u64(),
        width = usize::from(TOKEN_DECIMALS)
    );
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

fn parse_digits(digits: &str) -> Result<U256, UnitsError> {
    if digits.is_empty() {
        return Ok(U256::zero());
    }
    // Characters are already validated; any failure is a width overflow.
    U256::from_dec_str(digits).map_err(|_| UnitsError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_tokens() {
        assert_eq!(
            to_base_units(111),
            U256::from(111u64) * U256::exp10(18)
        );
        assert_eq!(parse_units("111").unwrap(), to_base_units(111));
    }

    #[test]
    fn test_fractions() {
        assert_eq!(
            parse_units("1.5").unwrap(),
            U256::from(15u64) * U256::exp10(17)
        );
        assert_eq!(parse_units(".25").unwrap(), U256::from(25u64) * U256::exp10(16));
        assert_eq!(parse_units("0.000000000000000001").unwrap(), U256::one());
        assert_eq!(parse_units("2.").unwrap(), to_base_units(2));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(parse_units(""), Err(UnitsError::Empty));
        assert_eq!(parse_units("."), Err(UnitsError::Empty));
        assert!(matches!(
            parse_units("1.2.3"),
            Err(UnitsError::InvalidDigits { .. })
        ));
        assert!(matches!(
            parse_units("-1"),
            Err(UnitsError::InvalidDigits { .. })
        ));
        assert_eq!(
            parse_units("0.0000000000000000001"),
            Err(UnitsError::TooPrecise { found: 19, max: 18 })
        );
    }

    #[test]
    fn test_overflow() {
        let max_whole = (U256::MAX / one_token()).to_string();
        assert!(parse_units(&max_whole).is_ok());

        let too_big = (U256::MAX / one_token() + 1).to_string();
        assert_eq!(parse_units(&too_big), Err(UnitsError::Overflow));
        assert_eq!(parse_units(&"9".repeat(90)), Err(UnitsError::Overflow));
    }

    #[test]
    fn test_format() {
        assert_eq!(format_units(U256::zero()), "0");
        assert_eq!(format_units(to_base_units(91)), "91");
        assert_eq!(format_units(parse_units("20.4").unwrap()), "20.4");
        assert_eq!(format_units(U256::one()), "0.000000000000000001");
    }
}
