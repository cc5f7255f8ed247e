//! Curve definitions and the factory that binds them to a snapshot

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::amount::{MintState, ReserveAccountState};
use crate::curve::Curve;
use crate::exponential::ExponentialCurve;
use crate::CurveError;

/// Exponent of the exponential curve, k = pow / frac
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExponentialCurveV0 {
    pub pow: i64,
    pub frac: i64,
}

/// Curve shape, tagged the same way as the on-chain curve record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurveShape {
    ExponentialCurveV0(ExponentialCurveV0),
}

/// Serde tag of [`CurveShape::ExponentialCurveV0`]
pub const EXPONENTIAL_CURVE_V0: &str = "exponentialCurveV0";

impl CurveShape {
    /// Tags this engine can build
    pub const KNOWN_TAGS: &'static [&'static str] = &[EXPONENTIAL_CURVE_V0];

    pub fn tag(&self) -> &'static str {
        match self {
            CurveShape::ExponentialCurveV0(_) => EXPONENTIAL_CURVE_V0,
        }
    }
}

/// Curve parameters as stored on chain
///
/// `c` and `b` are fixed-point with denominator 1e12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveDefinition {
    pub c: u128,
    pub b: u128,
    pub curve: CurveShape,
}

impl CurveDefinition {
    /// Parse a loosely-typed definition, e.g. one fetched as JSON
    ///
    /// The shape is picked from the single key of the `curve` object.
    pub fn from_value(value: &Value) -> Result<Self, CurveError> {
        let shape = value
            .get("curve")
            .and_then(Value::as_object)
            .ok_or_else(|| CurveError::MalformedDefinition("missing `curve` object".to_string()))?;
        let tag = shape
            .keys()
            .next()
            .ok_or_else(|| CurveError::MalformedDefinition("empty `curve` object".to_string()))?;
        if !CurveShape::KNOWN_TAGS.contains(&tag.as_str()) {
            return Err(CurveError::UnrecognizedCurveVariant(tag.clone()));
        }

        let definition: CurveDefinition = serde_json::from_value(value.clone())
            .map_err(|e| CurveError::MalformedDefinition(e.to_string()))?;
        definition.validate()?;
        Ok(definition)
    }

    pub fn validate(&self) -> Result<(), CurveError> {
        match &self.curve {
            CurveShape::ExponentialCurveV0(shape) if shape.frac == 0 => Err(CurveError::InvalidExponent),
            CurveShape::ExponentialCurveV0(_) => Ok(()),
        }
    }
}

/// Bind a curve definition to a reserve/supply snapshot
pub fn build_curve(
    definition: &CurveDefinition,
    reserve: ReserveAccountState,
    base_mint: MintState,
    target_mint: MintState,
) -> Result<Box<dyn Curve>, CurveError> {
    definition.validate()?;
    debug!("building {} curve", definition.curve.tag());

    match &definition.curve {
        CurveShape::ExponentialCurveV0(shape) => Ok(Box::new(ExponentialCurve::new(
            definition.c,
            definition.b,
            shape,
            reserve,
            base_mint,
            target_mint,
        ))),
    }
}

/// [`CurveDefinition::from_value`] followed by [`build_curve`]
pub fn build_curve_from_value(
    definition: &Value,
    reserve: ReserveAccountState,
    base_mint: MintState,
    target_mint: MintState,
) -> Result<Box<dyn Curve>, CurveError> {
    let definition = CurveDefinition::from_value(definition)?;
    build_curve(&definition, reserve, base_mint, target_mint)
}
