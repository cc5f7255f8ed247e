//! Curve snapshot file loading

use anyhow::{Context, Result};
use bonding_model::{amount_as_real, build_curve, Curve, CurveDefinition, MintState, ReserveAccountState};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Target mint section; the cap is optional
#[derive(Debug, Deserialize)]
struct TargetMintSection {
    supply: u64,
    decimals: u8,
    mint_cap: Option<u64>,
}

/// On-disk layout of a snapshot file
#[derive(Debug, Deserialize)]
struct SnapshotFile {
    curve: toml::Value,
    #[serde(default)]
    reserve: ReserveAccountState,
    base_mint: MintState,
    target_mint: TargetMintSection,
}

/// Already-fetched curve state a quote is evaluated against
#[derive(Debug, Clone)]
pub struct CurveSnapshot {
    pub definition: CurveDefinition,
    pub reserve: ReserveAccountState,
    pub base_mint: MintState,
    pub target_mint: MintState,
    pub mint_cap: Option<u64>,
}

impl CurveSnapshot {
    /// Load a snapshot from a TOML file (`~` is expanded)
    pub fn load(path: &Path) -> Result<Self> {
        let path = expand_path(path);
        if !path.exists() {
            anyhow::bail!("Snapshot file not found: {}", path.display());
        }

        debug!("reading snapshot {}", path.display());
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;

        Self::from_toml_str(&data)
            .with_context(|| format!("Invalid snapshot file: {}", path.display()))
    }

    pub fn from_toml_str(data: &str) -> Result<Self> {
        let file: SnapshotFile = toml::from_str(data).context("Failed to parse snapshot TOML")?;

        // Route through the loosely-typed parser so unknown curve tags are reported as such
        let curve = serde_json::to_value(&file.curve).context("Failed to convert [curve] table")?;
        let definition = CurveDefinition::from_value(&curve)?;
        debug!(
            "loaded {} snapshot: reserve={} target supply={}",
            definition.curve.tag(),
            file.reserve.amount,
            file.target_mint.supply
        );

        Ok(Self {
            definition,
            reserve: file.reserve,
            base_mint: file.base_mint,
            target_mint: MintState {
                supply: file.target_mint.supply,
                decimals: file.target_mint.decimals,
            },
            mint_cap: file.target_mint.mint_cap,
        })
    }

    /// Fresh curve bound to this snapshot
    pub fn curve(&self) -> Result<Box<dyn Curve>> {
        Ok(build_curve(
            &self.definition,
            self.reserve,
            self.base_mint,
            self.target_mint,
        )?)
    }

    /// Target tokens still mintable under the cap, in human units
    pub fn remaining_mintable(&self) -> Option<f64> {
        self.mint_cap.map(|cap| {
            amount_as_real(cap.saturating_sub(self.target_mint.supply), self.target_mint.decimals)
        })
    }
}

fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
        None => path.to_path_buf(),
    }
}
