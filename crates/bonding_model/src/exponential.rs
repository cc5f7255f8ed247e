//! Exponential curve: price(S) = b + c·S^k
//!
//! Reserve is the integral of price over supply:
//! - R(S) = b·S + c·S^(1+k) / (1+k)
//!
//! Two regimes:
//! - Bootstrap (reserve == 0 or supply == 0): evaluate the integral directly.
//! - Steady state: price off the observed reserve, scaled by R / S^(1+k);
//!   `c` and `b` do not enter.

use log::{debug, warn};

use crate::amount::{amount_as_real, royalty_as_decimal, supply_as_real, MintState, ReserveAccountState};
use crate::curve::Curve;
use crate::factory::ExponentialCurveV0;
use crate::{CurveError, CURVE_PARAM_SCALE};

/// Exponential curve bound to one reserve/supply snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialCurve {
    pub c: f64,
    pub b: f64,
    pub k: f64,
    reserve: ReserveAccountState,
    base_mint: MintState,
    target_mint: MintState,
}

impl ExponentialCurve {
    /// Build from on-chain parameters (`c`, `b` scaled by 1e12, `k = pow / frac`)
    ///
    /// `shape.frac` must be non-zero; [`crate::build_curve`] checks this.
    pub fn new(
        c: u128,
        b: u128,
        shape: &ExponentialCurveV0,
        reserve: ReserveAccountState,
        base_mint: MintState,
        target_mint: MintState,
    ) -> Self {
        let curve = Self {
            c: c as f64 / CURVE_PARAM_SCALE,
            b: b as f64 / CURVE_PARAM_SCALE,
            k: shape.pow as f64 / shape.frac as f64,
            reserve,
            base_mint,
            target_mint,
        };
        debug!(
            "exponential curve c={} b={} k={} reserve={} supply={}",
            curve.c, curve.b, curve.k, reserve.amount, target_mint.supply
        );
        curve
    }

    fn supply(&self) -> f64 {
        supply_as_real(&self.target_mint)
    }
}

impl Curve for ExponentialCurve {
    fn name(&self) -> &'static str {
        "exponential"
    }

    fn is_bootstrap(&self) -> bool {
        self.reserve.amount == 0 || self.target_mint.supply == 0
    }

    fn current(&self) -> f64 {
        self.change_in_target_amount(1.0, 0, 0)
    }

    fn locked(&self) -> f64 {
        amount_as_real(self.reserve.amount, self.base_mint.decimals)
    }

    fn change_in_target_amount(
        &self,
        target_amount: f64,
        base_royalty: u32,
        target_royalty: u32,
    ) -> f64 {
        // Gross up so the buyer still nets `target_amount` after the target royalty
        let ds = target_amount / (1.0 - royalty_as_decimal(target_royalty));
        let base_gross_up = 1.0 - royalty_as_decimal(base_royalty);
        let one_plus_k = 1.0 + self.k;

        if self.is_bootstrap() {
            debug!("bootstrap regime, dS={}", ds);
            // b·dS + c·dS^(1+k) / (1+k)
            (self.b * ds + self.c * ds.powf(one_plus_k) / one_plus_k) / base_gross_up
        } else {
            let r = self.locked();
            let s = self.supply();
            debug!("steady-state regime, R={} S={} dS={}", r, s, ds);
            // (R / S^(1+k)) · ((S + dS)(S + dS)^k - S^(1+k))
            let s_pow = s.powf(one_plus_k);
            (r / s_pow) * ((s + ds) * (s + ds).powf(self.k) - s_pow) / base_gross_up
        }
    }

    fn buy_with_base_amount(
        &self,
        base_amount: f64,
        base_royalty: u32,
        target_royalty: u32,
    ) -> Result<f64, CurveError> {
        let dr = base_amount * (1.0 - royalty_as_decimal(base_royalty));
        let one_plus_k = 1.0 + self.k;

        if self.is_bootstrap() {
            if self.b == 0.0 {
                if self.c == 0.0 {
                    warn!("exponential curve has c = 0 and b = 0, nothing to invert");
                    return Err(CurveError::UnsolvableInverse { b: self.b, k: self.k });
                }
                if one_plus_k <= 0.0 {
                    warn!("exponential curve has 1 + k = {} <= 0, reserve integral diverges", one_plus_k);
                    return Err(CurveError::UnsolvableInverse { b: self.b, k: self.k });
                }
                // ((1+k)·dR / c)^(1/(1+k))
                return Ok((one_plus_k * dr / self.c).powf(1.0 / one_plus_k));
            }
            if self.k == 0.0 {
                return Ok(dr / self.b);
            }
            warn!(
                "no closed-form inverse for bootstrap exponential curve b={} k={}",
                self.b, self.k
            );
            return Err(CurveError::UnsolvableInverse { b: self.b, k: self.k });
        }

        let r = self.locked();
        let s = self.supply();
        // dS = -S + ((S^(1+k)·(R + dR)) / R)^(1/(1+k))
        let ds = -s + (s.powf(one_plus_k) * (r + dr) / r).powf(1.0 / one_plus_k);
        Ok(ds * (1.0 - royalty_as_decimal(target_royalty)))
    }
}
