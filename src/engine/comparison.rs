use crate::core::bank::RateTable;
use crate::core::currency::round_money;
use crate::core::input::TransferInput;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One bank's computed payout, both paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankComparison {
    pub bank_id: Uuid,
    pub bank_name: String,
    /// Local-currency payout via the intermediary currency, rounded to cents.
    pub intermediary_total: Decimal,
    /// Local-currency payout converting the source currency directly, rounded to cents.
    pub direct_total: Decimal,
    /// `intermediary_total - direct_total`.
    pub difference: Decimal,
    /// Highest direct payout in the table.
    pub is_best: bool,
    /// Lowest direct payout in the table.
    pub is_worst: bool,
}

/// Result of one comparison run.
///
/// `comparisons` has the same length and order as the input rate table.
/// Whenever it is non-empty, exactly one entry carries `is_best` and
/// exactly one carries `is_worst` (the same entry for a singleton table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Source amount after the transfer fee, rounded to cents.
    net_source_amount: Decimal,
    /// Intermediary amount after conversion and platform fee, rounded to cents.
    intermediary_amount: Decimal,
    comparisons: Vec<BankComparison>,
    best: Option<usize>,
    worst: Option<usize>,
}

impl ComparisonResult {
    pub fn net_source_amount(&self) -> Decimal {
        self.net_source_amount
    }

    pub fn intermediary_amount(&self) -> Decimal {
        self.intermediary_amount
    }

    /// Per-bank entries, in input order.
    pub fn comparisons(&self) -> &[BankComparison] {
        &self.comparisons
    }

    /// The entry with the highest direct payout, if any banks were supplied.
    pub fn best_bank(&self) -> Option<&BankComparison> {
        self.best.map(|i| &self.comparisons[i])
    }

    /// The entry with the lowest direct payout, if any banks were supplied.
    pub fn worst_bank(&self) -> Option<&BankComparison> {
        self.worst.map(|i| &self.comparisons[i])
    }

    /// Spread between the best and worst direct payouts.
    pub fn best_worst_spread(&self) -> Decimal {
        match (self.best_bank(), self.worst_bank()) {
            (Some(best), Some(worst)) => best.direct_total - worst.direct_total,
            _ => Decimal::ZERO,
        }
    }
}

/// The core comparison engine.
///
/// A pure, total function over the inputs: no validation, no side
/// effects, same result for the same arguments every time.
pub struct ComparisonEngine;

impl ComparisonEngine {
    /// Compare the intermediary-platform path against direct bank
    /// conversion for every bank in the table.
    ///
    /// # Algorithm
    ///
    /// 1. `net_source = amount - transfer_fee`.
    /// 2. `intermediary_net = net_source × conversion_rate - platform_fee`.
    /// 3. Per bank: `intermediary_total = intermediary_net ×
    ///    intermediary_rate - receiving_fee` and `direct_total =
    ///    net_source × direct_rate - receiving_fee`; both rounded to
    ///    cents, half away from zero, along with their difference.
    /// 4. One scan flags the entry with the maximum direct payout as
    ///    best and the minimum as worst; strict comparisons mean the
    ///    first of tied entries wins.
    pub fn calculate(input: &TransferInput, banks: &RateTable) -> ComparisonResult {
        let net_source = input.net_source_amount();
        let intermediary_net = input.net_intermediary_amount();

        let mut comparisons: Vec<BankComparison> = banks
            .banks()
            .iter()
            .map(|bank| {
                let intermediary_total = round_money(
                    intermediary_net * bank.intermediary_rate() - bank.receiving_fee(),
                );
                let direct_total =
                    round_money(net_source * bank.direct_rate() - bank.receiving_fee());
                BankComparison {
                    bank_id: bank.id(),
                    bank_name: bank.name().to_string(),
                    intermediary_total,
                    direct_total,
                    difference: intermediary_total - direct_total,
                    is_best: false,
                    is_worst: false,
                }
            })
            .collect();

        let mut best: Option<usize> = None;
        let mut worst: Option<usize> = None;
        for (i, entry) in comparisons.iter().enumerate() {
            match best {
                Some(b) if entry.direct_total <= comparisons[b].direct_total => {}
                _ => best = Some(i),
            }
            match worst {
                Some(w) if entry.direct_total >= comparisons[w].direct_total => {}
                _ => worst = Some(i),
            }
        }

        if let Some(i) = best {
            comparisons[i].is_best = true;
        }
        if let Some(i) = worst {
            comparisons[i].is_worst = true;
        }

        ComparisonResult {
            net_source_amount: round_money(net_source),
            intermediary_amount: round_money(intermediary_net),
            comparisons,
            best,
            worst,
        }
    }
}

impl std::fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Payout Comparison ===")?;
        writeln!(f, "Net source amount:   {}", self.net_source_amount)?;
        writeln!(f, "Intermediary amount: {}", self.intermediary_amount)?;

        for entry in &self.comparisons {
            let marker = if entry.is_best {
                " [BEST]"
            } else if entry.is_worst {
                " [WORST]"
            } else {
                ""
            };
            writeln!(f, "\n--- {}{} ---", entry.bank_name, marker)?;
            writeln!(f, "  Via intermediary: {}", entry.intermediary_total)?;
            writeln!(f, "  Direct:           {}", entry.direct_total)?;
            writeln!(f, "  Difference:       {}", entry.difference)?;
        }
        Ok(())
    }
}
