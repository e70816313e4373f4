//! Walkthrough: find the best payout for a USD → UAH transfer.
//!
//! Compares the USDT route against direct bank conversion over the
//! default rate table, then stresses the conversion rate.

use payout_engine::core::bank::RateTable;
use payout_engine::core::input::TransferInput;
use payout_engine::engine::comparison::ComparisonEngine;
use payout_engine::format::format_amount;
use payout_engine::simulation::rate_shock::{run_scenarios, ShockScenario};
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║   payout-engine: Best Offer Walkthrough  ║");
    println!("╚══════════════════════════════════════════╝\n");

    // --- Scenario 1: one comparison run ---
    println!("━━━ Scenario 1: Compare the default banks ━━━\n");

    let input = TransferInput::new(dec!(2000), dec!(8), dec!(0.6545));
    let banks = RateTable::defaults();

    let result = ComparisonEngine::calculate(&input, &banks);
    println!("{}", result);

    if let Some(best) = result.best_bank() {
        println!(
            "Winner: {} pays {} UAH on the direct route\n",
            best.bank_name,
            format_amount(best.direct_total),
        );
    }

    // --- Scenario 2: what if the USDT rate moves? ---
    println!("━━━ Scenario 2: Conversion-rate shocks ━━━\n");

    let scenarios = vec![
        ShockScenario::new(dec!(-0.05)),
        ShockScenario::new(dec!(0.05)),
        ShockScenario::new(dec!(0.60)),
    ];

    for shock in run_scenarios(&input, &banks, &scenarios) {
        println!("{}", shock);
    }
}
