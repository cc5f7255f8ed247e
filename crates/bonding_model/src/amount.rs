//! Raw token amounts <-> human-unit reals
//!
//! Curve math runs on `f64`. Raw amounts above ~2^53 scaled units lose
//! precision on conversion; quotes are advisory, not settlement amounts.

use serde::{Deserialize, Serialize};

use crate::ROYALTY_SCALE;

/// Snapshot of a token mint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintState {
    /// Total outstanding supply (raw units)
    pub supply: u64,
    /// Decimal places of one whole token
    pub decimals: u8,
}

/// Snapshot of the base-token reserve held by the curve's storage account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveAccountState {
    /// Reserve balance (raw units of the base mint)
    pub amount: u64,
}

/// Convert a raw amount to human units
///
/// Splits into whole and fractional parts so that the integer part is exact
/// before the fraction is added back in floating point.
pub fn amount_as_real(raw: u64, decimals: u8) -> f64 {
    match 10u64.checked_pow(decimals as u32) {
        Some(scale) => (raw / scale) as f64 + (raw % scale) as f64 / scale as f64,
        None => raw as f64 / 10f64.powi(decimals as i32),
    }
}

/// Convert a human-unit quantity back to raw units (round to nearest, saturating)
pub fn real_as_amount(value: f64, decimals: u8) -> u64 {
    let scaled = (value * 10f64.powi(decimals as i32)).round();
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else {
        // `as` saturates at u64::MAX
        scaled as u64
    }
}

/// Mint supply in human units
pub fn supply_as_real(mint: &MintState) -> f64 {
    amount_as_real(mint.supply, mint.decimals)
}

/// Royalty as a fraction of 1 (u32::MAX = 100%)
///
/// Callers are responsible for keeping royalties strictly below 100%; the
/// fee gross-up divides by `1 - royalty`.
pub fn royalty_as_decimal(royalty: u32) -> f64 {
    royalty as f64 / ROYALTY_SCALE as f64
}

/// Human percentage (e.g. `5.0` = 5%) to a 32-bit-scaled royalty, clamped to [0, 100]
pub fn royalty_from_percent(percent: f64) -> u32 {
    if percent.is_nan() {
        return 0;
    }
    let fraction = percent.clamp(0.0, 100.0) / 100.0;
    (fraction * ROYALTY_SCALE as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_amount_as_real_splits_decimals() {
        assert_eq!(amount_as_real(0, 9), 0.0);
        assert_eq!(amount_as_real(1_000_000_000, 9), 1.0);
        assert!((amount_as_real(1_500_000_000, 9) - 1.5).abs() < EPS);
        assert!((amount_as_real(123_456, 3) - 123.456).abs() < EPS);
        assert_eq!(amount_as_real(42, 0), 42.0);
    }

    #[test]
    fn test_amount_as_real_huge_decimals() {
        // 10^20 overflows u64, falls back to direct division
        let v = amount_as_real(u64::MAX, 20);
        assert!((v - u64::MAX as f64 / 1e20).abs() < EPS);
    }

    #[test]
    fn test_real_as_amount() {
        assert_eq!(real_as_amount(1.5, 9), 1_500_000_000);
        assert_eq!(real_as_amount(0.0, 6), 0);
        assert_eq!(real_as_amount(-3.0, 6), 0);
        assert_eq!(real_as_amount(f64::NAN, 6), 0);
        assert_eq!(real_as_amount(f64::INFINITY, 6), u64::MAX);
        assert_eq!(real_as_amount(amount_as_real(987_654_321, 6), 6), 987_654_321);
    }

    #[test]
    fn test_supply_as_real() {
        let mint = MintState { supply: 2_500_000, decimals: 6 };
        assert!((supply_as_real(&mint) - 2.5).abs() < EPS);
    }

    #[test]
    fn test_royalty_as_decimal() {
        assert_eq!(royalty_as_decimal(0), 0.0);
        assert_eq!(royalty_as_decimal(u32::MAX), 1.0);
        assert!((royalty_as_decimal(u32::MAX / 2) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_royalty_from_percent() {
        assert_eq!(royalty_from_percent(0.0), 0);
        assert_eq!(royalty_from_percent(100.0), u32::MAX);
        assert_eq!(royalty_from_percent(250.0), u32::MAX);
        assert_eq!(royalty_from_percent(-1.0), 0);
        assert!((royalty_as_decimal(royalty_from_percent(5.0)) - 0.05).abs() < 1e-9);
    }
}
