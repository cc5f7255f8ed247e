//! Bonding CLI - Quote trades against a bonding curve snapshot
//!
//! Loads already-fetched curve state (reserve balance, mint supplies, curve
//! parameters) from a TOML file and prints spot price and trade quotes.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod config;
mod quote;

use config::CurveSnapshot;
use quote::RoyaltyArgs;

#[derive(Parser)]
#[command(name = "bonding")]
#[command(about = "Bonding curve pricing CLI - Quote buys and sells against a curve snapshot", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the curve snapshot file
    #[arg(short, long, default_value = "curve.toml")]
    snapshot: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show spot price, locked reserve and supply
    Info,

    /// Quote the base cost of buying target tokens
    Buy {
        /// Target tokens to buy (human units)
        amount: f64,

        #[command(flatten)]
        royalties: RoyaltyArgs,
    },

    /// Quote the base tokens released by selling target tokens
    Sell {
        /// Target tokens to sell (human units)
        amount: f64,

        #[command(flatten)]
        royalties: RoyaltyArgs,
    },

    /// Quote the target tokens bought with a base token amount
    BuyWithBase {
        /// Base tokens to spend (human units)
        amount: f64,

        #[command(flatten)]
        royalties: RoyaltyArgs,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let snapshot = CurveSnapshot::load(&cli.snapshot)?;

    if cli.verbose {
        println!("{} {}", "Snapshot:".bright_cyan(), cli.snapshot.display());
        println!(
            "{} c={} b={} {:?}",
            "Definition:".bright_cyan(),
            snapshot.definition.c,
            snapshot.definition.b,
            snapshot.definition.curve
        );
        println!("{} {}", "Reserve:".bright_cyan(), snapshot.reserve.amount);
        println!(
            "{} {} ({} decimals)",
            "Target supply:".bright_cyan(),
            snapshot.target_mint.supply,
            snapshot.target_mint.decimals
        );
        println!();
    }

    match cli.command {
        Commands::Info => quote::show_info(&snapshot),
        Commands::Buy { amount, royalties } => quote::quote_buy(&snapshot, amount, royalties),
        Commands::Sell { amount, royalties } => quote::quote_sell(&snapshot, amount, royalties),
        Commands::BuyWithBase { amount, royalties } => {
            quote::quote_buy_with_base(&snapshot, amount, royalties)
        }
    }?;

    Ok(())
}
