use rust_decimal::Decimal;

use crate::utils::error::{RelayError, Result};

/// Scales a human-readable decimal amount into the ledger's smallest
/// indivisible unit (`amount * 10^decimals`).
///
/// Amounts with more fractional digits than the token supports are rejected
/// rather than truncated, and so are negative amounts and results that do not
/// fit in a `u128`.
pub fn to_base_units(amount: Decimal, decimals: u32) -> Result<u128> {
    if amount.is_sign_negative() {
        return Err(RelayError::ValidationError {
            message: format!("amount {} is negative", amount),
        });
    }

    // normalize() 去除尾端零，scale 即為實際小數位數
    let normalized = amount.normalize();
    let scale = normalized.scale();
    if scale > decimals {
        return Err(RelayError::ValidationError {
            message: format!(
                "amount {} has {} fractional digits, token supports {}",
                amount, scale, decimals
            ),
        });
    }

    let mantissa = normalized.mantissa() as u128;
    let shift = 10u128
        .checked_pow(decimals - scale)
        .ok_or_else(|| RelayError::ValidationError {
            message: format!("token decimals {} out of range", decimals),
        })?;

    mantissa
        .checked_mul(shift)
        .ok_or_else(|| RelayError::ValidationError {
            message: format!("amount {} overflows the ledger base unit", amount),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_whole_amount_scales_by_decimals() {
        assert_eq!(to_base_units(dec!(10), 18).unwrap(), 10 * 10u128.pow(18));
        assert_eq!(to_base_units(dec!(1), 6).unwrap(), 1_000_000);
        assert_eq!(to_base_units(dec!(42), 0).unwrap(), 42);
    }

    #[test]
    fn test_fractional_amount_scales_exactly() {
        assert_eq!(to_base_units(dec!(0.5), 18).unwrap(), 5 * 10u128.pow(17));
        assert_eq!(to_base_units(dec!(1.25), 6).unwrap(), 1_250_000);
    }

    #[test]
    fn test_trailing_zeros_are_not_excess_precision() {
        assert_eq!(to_base_units(dec!(1.50), 2).unwrap(), 150);
        assert_eq!(to_base_units(dec!(1.000000), 2).unwrap(), 100);
    }

    #[test]
    fn test_excess_precision_is_rejected() {
        assert!(to_base_units(dec!(1.234), 2).is_err());
        assert!(to_base_units(dec!(0.0000001), 6).is_err());
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        assert!(to_base_units(dec!(-1), 18).is_err());
    }

    #[test]
    fn test_zero_scales_to_zero() {
        assert_eq!(to_base_units(dec!(0), 18).unwrap(), 0);
    }
}
