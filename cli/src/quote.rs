//! Quote commands: price display, buy, sell, buy-with-base

use anyhow::Result;
use bonding_model::{royalty_from_percent, Curve, ROYALTY_SCALE};
use clap::Args;
use colored::Colorize;

use crate::config::CurveSnapshot;

/// Royalty flags shared by every trade quote
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct RoyaltyArgs {
    /// Royalty taken on the base token side (percent, 0-100)
    #[arg(long, default_value = "0")]
    pub base_royalty: f64,

    /// Royalty taken on the target token side (percent, 0-100)
    #[arg(long, default_value = "0")]
    pub target_royalty: f64,
}

impl RoyaltyArgs {
    /// (base, target) as 32-bit-scaled royalties
    pub fn scaled(&self) -> Result<(u32, u32)> {
        Ok((
            scale_royalty("base", self.base_royalty)?,
            scale_royalty("target", self.target_royalty)?,
        ))
    }
}

/// Percent to scaled royalty; anything that rounds to 100% is rejected
fn scale_royalty(name: &str, percent: f64) -> Result<u32> {
    if !(0.0..100.0).contains(&percent) {
        anyhow::bail!("{} royalty must be in [0, 100), got {}", name, percent);
    }
    let scaled = royalty_from_percent(percent);
    if scaled >= ROYALTY_SCALE {
        anyhow::bail!("{} royalty {} rounds to 100%", name, percent);
    }
    Ok(scaled)
}

fn regime(curve: &dyn Curve) -> &'static str {
    if curve.is_bootstrap() {
        "bootstrap"
    } else {
        "steady-state"
    }
}

fn check_quote(quote: f64, what: &str, curve: &dyn Curve) -> Result<f64> {
    if !quote.is_finite() {
        anyhow::bail!("{} is not priceable in the {} regime", what, regime(curve));
    }
    Ok(quote)
}

fn check_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        anyhow::bail!("Amount must be a non-negative number, got {}", amount);
    }
    Ok(())
}

/// Spot price, reserve and supply of the curve
pub fn show_info(snapshot: &CurveSnapshot) -> Result<f64> {
    let curve: Box<dyn Curve> = snapshot.curve()?;
    let price = curve.current();

    println!("{}", "=== Curve Info ===".bright_green().bold());
    println!("{} {} ({})", "Curve:".bright_cyan(), curve.name(), snapshot.definition.curve.tag());
    println!("{} {}", "Regime:".bright_cyan(), regime(curve.as_ref()));
    println!("{} {:.6}", "Price:".bright_cyan(), price);
    println!("{} {:.6}", "Locked:".bright_cyan(), curve.locked());
    println!(
        "{} {:.6}",
        "Supply:".bright_cyan(),
        bonding_model::supply_as_real(&snapshot.target_mint)
    );
    if let Some(remaining) = snapshot.remaining_mintable() {
        println!("{} {:.6}", "Remaining:".bright_cyan(), remaining);
    }

    Ok(price)
}

/// Base tokens needed to buy `amount` target tokens
pub fn quote_buy(snapshot: &CurveSnapshot, amount: f64, royalties: RoyaltyArgs) -> Result<f64> {
    check_amount(amount)?;
    let (base_royalty, target_royalty) = royalties.scaled()?;
    let curve = snapshot.curve()?;
    let cost = check_quote(
        curve.buy_target_amount(amount, base_royalty, target_royalty),
        "Buy",
        curve.as_ref(),
    )?;

    println!("{}", "=== Buy Quote ===".bright_green().bold());
    println!("{} {}", "Target amount:".bright_cyan(), amount);
    print_royalties(royalties);
    println!("{} {:.6}", "Base cost:".bright_cyan(), cost);
    Ok(cost)
}

/// Base tokens released for selling `amount` target tokens
pub fn quote_sell(snapshot: &CurveSnapshot, amount: f64, royalties: RoyaltyArgs) -> Result<f64> {
    check_amount(amount)?;
    let (base_royalty, target_royalty) = royalties.scaled()?;
    let curve = snapshot.curve()?;
    let released = check_quote(
        -curve.sell_target_amount(amount, base_royalty, target_royalty),
        "Sell",
        curve.as_ref(),
    )?;

    println!("{}", "=== Sell Quote ===".bright_green().bold());
    println!("{} {}", "Target amount:".bright_cyan(), amount);
    print_royalties(royalties);
    println!("{} {:.6}", "Base received:".bright_cyan(), released);
    Ok(released)
}

/// Target tokens received for spending `amount` base tokens
pub fn quote_buy_with_base(snapshot: &CurveSnapshot, amount: f64, royalties: RoyaltyArgs) -> Result<f64> {
    check_amount(amount)?;
    let (base_royalty, target_royalty) = royalties.scaled()?;
    let curve = snapshot.curve()?;
    let received = check_quote(
        curve.buy_with_base_amount(amount, base_royalty, target_royalty)?,
        "Buy with base",
        curve.as_ref(),
    )?;

    println!("{}", "=== Buy With Base Quote ===".bright_green().bold());
    println!("{} {}", "Base amount:".bright_cyan(), amount);
    print_royalties(royalties);
    println!("{} {:.6}", "Target received:".bright_cyan(), received);
    Ok(received)
}

fn print_royalties(royalties: RoyaltyArgs) {
    if royalties.base_royalty > 0.0 || royalties.target_royalty > 0.0 {
        println!(
            "{} base {}% / target {}%",
            "Royalties:".bright_cyan(),
            royalties.base_royalty,
            royalties.target_royalty
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bonding_model::CurveError;

    fn snapshot(c: u64, b: u64, pow: i64, reserve: u64, supply: u64) -> CurveSnapshot {
        let data = format!(
            r#"
[curve]
c = {c}
b = {b}
[curve.curve.exponentialCurveV0]
pow = {pow}
frac = 1

[reserve]
amount = {reserve}

[base_mint]
supply = 0
decimals = 6

[target_mint]
supply = {supply}
decimals = 6
"#
        );
        CurveSnapshot::from_toml_str(&data).unwrap()
    }

    fn royalties(base: f64, target: f64) -> RoyaltyArgs {
        RoyaltyArgs { base_royalty: base, target_royalty: target }
    }

    #[test]
    fn test_royalty_flags() {
        assert_eq!(royalties(0.0, 0.0).scaled().unwrap(), (0, 0));
        let (base, target) = royalties(50.0, 25.0).scaled().unwrap();
        assert!((bonding_model::royalty_as_decimal(base) - 0.5).abs() < 1e-9);
        assert!((bonding_model::royalty_as_decimal(target) - 0.25).abs() < 1e-9);

        assert!(royalties(100.0, 0.0).scaled().is_err());
        assert!(royalties(0.0, -1.0).scaled().is_err());
    }

    #[test]
    fn test_royalty_rounding_to_full_rejected() {
        // Below 100 as a percent, but rounds to u32::MAX once scaled
        assert_eq!(royalty_from_percent(99.9999999999), ROYALTY_SCALE);
        assert!(royalties(0.0, 99.9999999999).scaled().is_err());
        assert!(royalties(99.9999999999, 0.0).scaled().is_err());

        let linear = snapshot(0, 2_000_000_000_000, 0, 0, 0);
        assert!(quote_buy(&linear, 5.0, royalties(0.0, 99.9999999999)).is_err());
        assert!(quote_buy_with_base(&linear, 10.0, royalties(99.9999999999, 0.0)).is_err());

        // Highest royalty that still scales below 100%
        let (_, target) = royalties(0.0, 99.99999).scaled().unwrap();
        assert!(target < ROYALTY_SCALE);
    }

    #[test]
    fn test_non_finite_quotes_rejected() {
        // k = -1 in the bootstrap regime: the reserve integral divides by 1 + k = 0
        let divergent = snapshot(1_000_000_000_000, 0, -1, 0, 0);
        assert!(quote_buy(&divergent, 2.0, RoyaltyArgs::default()).is_err());
    }

    #[test]
    fn test_linear_quotes() {
        let linear = snapshot(0, 2_000_000_000_000, 0, 0, 0);
        assert!((show_info(&linear).unwrap() - 2.0).abs() < 1e-9);
        assert!((quote_buy(&linear, 5.0, RoyaltyArgs::default()).unwrap() - 10.0).abs() < 1e-9);
        assert!((quote_buy_with_base(&linear, 10.0, RoyaltyArgs::default()).unwrap() - 5.0).abs() < 1e-9);
        assert!((quote_sell(&linear, 5.0, RoyaltyArgs::default()).unwrap() - 10.0).abs() < 1e-9);
        assert!((quote_buy(&linear, 5.0, royalties(0.0, 50.0)).unwrap() - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_steady_state_sell() {
        // k=1, R=2, S=2: selling 1 releases 0.5·(4 - 1) = 1.5
        let steady = snapshot(1_000_000_000_000, 0, 1, 2_000_000, 2_000_000);
        assert_eq!(regime(steady.curve().unwrap().as_ref()), "steady-state");
        assert!((quote_sell(&steady, 1.0, RoyaltyArgs::default()).unwrap() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_unsolvable_inverse_surfaces() {
        let mixed = snapshot(1_000_000_000_000, 1_000_000_000_000, 1, 0, 0);
        let err = quote_buy_with_base(&mixed, 1.0, RoyaltyArgs::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CurveError>(),
            Some(CurveError::UnsolvableInverse { .. })
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let linear = snapshot(0, 2_000_000_000_000, 0, 0, 0);
        assert!(quote_buy(&linear, -1.0, RoyaltyArgs::default()).is_err());
        assert!(quote_buy_with_base(&linear, f64::NAN, RoyaltyArgs::default()).is_err());
    }
}
