//! Pricing contract shared by every curve shape

use crate::CurveError;

/// A bonding curve evaluated against one frozen reserve/supply snapshot
///
/// Amounts are in human units (already decimal-adjusted). Royalties are
/// 32-bit-scaled fractions, see [`crate::royalty_as_decimal`].
pub trait Curve {
    /// Short name of the curve shape
    fn name(&self) -> &'static str;

    /// True until the curve has both a reserve and an outstanding supply
    fn is_bootstrap(&self) -> bool;

    /// Spot price: base tokens for buying one target token with no royalties
    fn current(&self) -> f64;

    /// Base tokens currently held in reserve
    fn locked(&self) -> f64;

    /// Base tokens paid (positive) or released (negative) for a signed change in target supply
    ///
    /// A negative `target_amount` is a sell.
    fn change_in_target_amount(
        &self,
        target_amount: f64,
        base_royalty: u32,
        target_royalty: u32,
    ) -> f64;

    /// Target tokens received for spending `base_amount`
    fn buy_with_base_amount(
        &self,
        base_amount: f64,
        base_royalty: u32,
        target_royalty: u32,
    ) -> Result<f64, CurveError>;

    /// Base tokens released for selling `target_amount` (negative by convention)
    fn sell_target_amount(&self, target_amount: f64, base_royalty: u32, target_royalty: u32) -> f64 {
        self.change_in_target_amount(-target_amount, base_royalty, target_royalty)
    }

    /// Base tokens required for buying `target_amount`
    fn buy_target_amount(&self, target_amount: f64, base_royalty: u32, target_royalty: u32) -> f64 {
        self.change_in_target_amount(target_amount, base_royalty, target_royalty)
    }
}
