//! Conversion-rate shock scenarios.
//!
//! Models the impact of movements in the source → intermediary rate on
//! the achievable payout: how much the best offer shifts, and whether
//! the winning bank or path changes.

use crate::core::bank::RateTable;
use crate::core::input::TransferInput;
use crate::engine::comparison::{ComparisonEngine, ComparisonResult};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which conversion path produced a payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Path {
    Intermediary,
    Direct,
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Path::Intermediary => write!(f, "intermediary"),
            Path::Direct => write!(f, "direct"),
        }
    }
}

/// The single best (bank, path, payout) offer in a comparison result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestOffer {
    pub bank_name: String,
    pub path: Path,
    pub payout: Decimal,
}

/// Find the highest payout across every bank and both paths.
///
/// Ties resolve to the earlier bank, and within one bank to the
/// intermediary path.
pub fn best_offer(result: &ComparisonResult) -> Option<BestOffer> {
    let mut best: Option<BestOffer> = None;
    for entry in result.comparisons() {
        for (path, payout) in [
            (Path::Intermediary, entry.intermediary_total),
            (Path::Direct, entry.direct_total),
        ] {
            let beats = best.as_ref().map_or(true, |b| payout > b.payout);
            if beats {
                best = Some(BestOffer {
                    bank_name: entry.bank_name.clone(),
                    path,
                    payout,
                });
            }
        }
    }
    best
}

/// A percentage shift applied to the conversion rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShockScenario {
    /// Human-readable description, e.g. "rate -5%".
    pub label: String,
    /// Fractional shift: 0.05 = 5% appreciation, -0.05 = 5% drop.
    pub rate_shift: Decimal,
}

impl ShockScenario {
    pub fn new(rate_shift: Decimal) -> Self {
        let pct = rate_shift * Decimal::from(100);
        Self {
            label: format!("rate {:+}%", pct.normalize()),
            rate_shift,
        }
    }
}

/// Result of one shock scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShockResult {
    pub scenario: String,
    /// Best offer before the shock.
    pub baseline: Option<BestOffer>,
    /// Best offer under the shocked rate.
    pub shocked: Option<BestOffer>,
    /// Change in the best payout.
    pub impact: Decimal,
    /// Whether the winning bank or path changed.
    pub winner_changed: bool,
}

impl ShockResult {
    /// Impact as a percentage of the baseline payout.
    pub fn impact_percent(&self) -> f64 {
        match &self.baseline {
            Some(base) if base.payout != Decimal::ZERO => {
                let pct = self.impact * Decimal::from(100) / base.payout;
                pct.to_string().parse::<f64>().unwrap_or(0.0)
            }
            _ => 0.0,
        }
    }
}

/// Run a list of shock scenarios against one comparison setup.
pub fn run_scenarios(
    input: &TransferInput,
    banks: &RateTable,
    scenarios: &[ShockScenario],
) -> Vec<ShockResult> {
    let baseline = best_offer(&ComparisonEngine::calculate(input, banks));

    scenarios
        .iter()
        .map(|scenario| {
            let mut shocked_input = input.clone();
            shocked_input.conversion_rate =
                input.conversion_rate * (Decimal::ONE + scenario.rate_shift);
            let shocked = best_offer(&ComparisonEngine::calculate(&shocked_input, banks));

            let impact = match (&baseline, &shocked) {
                (Some(base), Some(shk)) => shk.payout - base.payout,
                _ => Decimal::ZERO,
            };
            let winner_changed = match (&baseline, &shocked) {
                (Some(base), Some(shk)) => {
                    base.bank_name != shk.bank_name || base.path != shk.path
                }
                _ => false,
            };

            ShockResult {
                scenario: scenario.label.clone(),
                baseline: baseline.clone(),
                shocked,
                impact,
                winner_changed,
            }
        })
        .collect()
}

/// Generate `count` random scenarios within ±`max_shift` (fractional).
pub fn random_scenarios(count: usize, max_shift: f64) -> Vec<ShockScenario> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let shift = rng.gen_range(-max_shift..=max_shift);
            // 4 decimal places is plenty for a percentage shift
            let shift = Decimal::try_from(shift)
                .unwrap_or(Decimal::ZERO)
                .round_dp(4);
            ShockScenario::new(shift)
        })
        .collect()
}

impl std::fmt::Display for ShockResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Shock: {} ===", self.scenario)?;
        match (&self.baseline, &self.shocked) {
            (Some(base), Some(shk)) => {
                writeln!(f, "Baseline: {} via {} = {}", base.bank_name, base.path, base.payout)?;
                writeln!(f, "Shocked:  {} via {} = {}", shk.bank_name, shk.path, shk.payout)?;
                writeln!(f, "Impact:   {}", self.impact)?;
                writeln!(f, "Winner changed: {}", self.winner_changed)?;
            }
            _ => writeln!(f, "No banks to compare.")?,
        }
        Ok(())
    }
}
