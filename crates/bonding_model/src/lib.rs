//! Bonding Model - Curve pricing for continuously minted tokens
//!
//! Given a snapshot of the reserve (base token) balance, the target token
//! supply and a curve definition, this crate quotes how many target tokens a
//! trade mints or burns, or how many base tokens it costs, net of royalties.
//!
//! Every quote is a pure function of the snapshot. Curves are built fresh per
//! query through [`build_curve`] and hold no state between quotes.

pub mod amount;
pub mod curve;
pub mod exponential;
pub mod factory;

pub use amount::{
    amount_as_real, real_as_amount, royalty_as_decimal, royalty_from_percent, supply_as_real,
    MintState, ReserveAccountState,
};
pub use curve::Curve;
pub use exponential::ExponentialCurve;
pub use factory::{build_curve, build_curve_from_value, CurveDefinition, CurveShape, ExponentialCurveV0};

/// Fixed denominator of the `c` and `b` curve parameters (1e12)
pub const CURVE_PARAM_SCALE: f64 = 1_000_000_000_000.0;

/// Royalty scale (u32::MAX = 100%)
pub const ROYALTY_SCALE: u32 = u32::MAX;

/// Error types for curve construction and pricing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// Curve definition carries a shape tag this engine does not implement
    #[error("curve not found: unrecognized curve variant `{0}`")]
    UnrecognizedCurveVariant(String),

    /// No closed-form inverse exists for this curve state
    #[error("cannot convert base amount to target amount on an exponential curve with b = {b}, k = {k}")]
    UnsolvableInverse { b: f64, k: f64 },

    /// Exponent denominator is zero
    #[error("invalid exponent: frac must be non-zero")]
    InvalidExponent,

    /// Curve definition is missing fields or has ill-typed ones
    #[error("malformed curve definition: {0}")]
    MalformedDefinition(String),
}
