use alloy::primitives::U256;

use super::transfer::ValidationError;

/// Decimal precision of the native asset (USDC on the Arc testnet).
pub const ASSET_DECIMALS: u32 = 6;

/// Parse a decimal string into a fixed-point integer scaled to `decimals`.
///
/// Accepts plain integers ("100"), decimal fractions ("100.25", ".5") and
/// trailing points ("100."). Rejects empty input, signs, non-digit characters,
/// more fraction digits than `decimals`, zero, and values that overflow U256.
pub fn parse_fixed_point(input: &str, decimals: u32) -> Result<U256, ValidationError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ValidationError::InvalidAmount("empty amount".into()));
    }
    if s.starts_with('-') {
        return Err(ValidationError::NonPositiveAmount);
    }

    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(ValidationError::InvalidAmount(format!(
            "not a decimal number: {input:?}"
        )));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ValidationError::InvalidAmount(format!(
            "not a decimal number: {input:?}"
        )));
    }
    if frac_part.len() > decimals as usize {
        return Err(ValidationError::InvalidAmount(format!(
            "more than {decimals} decimal places: {input:?}"
        )));
    }

    let int_value = if int_part.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(int_part, 10)
            .map_err(|_| ValidationError::InvalidAmount("integer part out of range".into()))?
    };

    let frac_value = if frac_part.is_empty() {
        U256::ZERO
    } else {
        let frac_scale =
            U256::from(10u64).pow(U256::from(decimals - frac_part.len() as u32));
        U256::from_str_radix(frac_part, 10)
            .map_err(|_| ValidationError::InvalidAmount("fraction part out of range".into()))?
            * frac_scale
    };

    let scale = U256::from(10u64).pow(U256::from(decimals));
    let value = int_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(|| ValidationError::InvalidAmount("amount out of range".into()))?;

    if value.is_zero() {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_amount_scales() {
        let value = parse_fixed_point("100.00", ASSET_DECIMALS).unwrap();
        assert_eq!(value, U256::from(100_000_000u64));
    }

    #[test]
    fn test_integer_without_point() {
        assert_eq!(
            parse_fixed_point("7", ASSET_DECIMALS).unwrap(),
            U256::from(7_000_000u64)
        );
        assert_eq!(
            parse_fixed_point("7.", ASSET_DECIMALS).unwrap(),
            U256::from(7_000_000u64)
        );
    }

    #[test]
    fn test_smallest_unit() {
        assert_eq!(
            parse_fixed_point("0.000001", ASSET_DECIMALS).unwrap(),
            U256::from(1u64)
        );
        assert_eq!(
            parse_fixed_point(".5", ASSET_DECIMALS).unwrap(),
            U256::from(500_000u64)
        );
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            parse_fixed_point("", ASSET_DECIMALS),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_fixed_point("   ", ASSET_DECIMALS),
            Err(ValidationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            parse_fixed_point("-5", ASSET_DECIMALS),
            Err(ValidationError::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_zero_rejected() {
        assert!(matches!(
            parse_fixed_point("0", ASSET_DECIMALS),
            Err(ValidationError::NonPositiveAmount)
        ));
        assert!(matches!(
            parse_fixed_point("0.000000", ASSET_DECIMALS),
            Err(ValidationError::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_non_numeric_rejected() {
        for bad in ["abc", "1e6", "1,5", ".", "1.2.3", "0x10"] {
            assert!(
                matches!(
                    parse_fixed_point(bad, ASSET_DECIMALS),
                    Err(ValidationError::InvalidAmount(_))
                ),
                "expected rejection of {bad:?}"
            );
        }
    }

    #[test]
    fn test_excess_precision_rejected() {
        assert!(matches!(
            parse_fixed_point("1.2345678", ASSET_DECIMALS),
            Err(ValidationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_overflow_rejected() {
        // 78 nines overflows U256 once scaled by 10^6.
        let huge = "9".repeat(78);
        assert!(matches!(
            parse_fixed_point(&huge, ASSET_DECIMALS),
            Err(ValidationError::InvalidAmount(_))
        ));
    }
}
