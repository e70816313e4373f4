use payout_engine::core::bank::{BankRate, RateTable};
use payout_engine::core::currency::round_money;
use payout_engine::core::input::TransferInput;
use payout_engine::engine::comparison::ComparisonEngine;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// A plausible money amount with cent precision (0.00 to 100,000.00).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0u64..10_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// A plausible exchange rate with 4-digit precision (0.0001 to 100.0000).
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (1u64..1_000_000u64).prop_map(|ten_thousandths| Decimal::new(ten_thousandths as i64, 4))
}

/// A small receiving fee (0.00 to 100.00).
fn arb_fee() -> impl Strategy<Value = Decimal> {
    (0u64..10_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

fn arb_bank() -> impl Strategy<Value = BankRate> {
    ("[A-Z][a-z]{2,8}", arb_rate(), arb_rate(), arb_fee()).prop_map(
        |(name, intermediary, direct, fee)| {
            BankRate::new(name, intermediary, direct).with_receiving_fee(fee)
        },
    )
}

fn arb_table(min: usize) -> impl Strategy<Value = RateTable> {
    prop::collection::vec(arb_bank(), min..20)
        .prop_map(|banks| banks.into_iter().collect::<RateTable>())
}

fn arb_input() -> impl Strategy<Value = TransferInput> {
    (arb_amount(), arb_fee(), arb_rate(), arb_fee()).prop_map(
        |(amount, transfer_fee, conversion_rate, platform_fee)| {
            TransferInput::new(amount, transfer_fee, conversion_rate)
                .with_platform_fee(platform_fee)
        },
    )
}

proptest! {
    // ===================================================================
    // INVARIANT 1: Exactly one best and one worst flag on a non-empty
    // table; none on an empty one.
    // ===================================================================
    #[test]
    fn exactly_one_best_and_worst(input in arb_input(), banks in arb_table(1)) {
        let result = ComparisonEngine::calculate(&input, &banks);
        prop_assert_eq!(
            result.comparisons().iter().filter(|c| c.is_best).count(),
            1,
            "exactly one entry must be flagged best"
        );
        prop_assert_eq!(
            result.comparisons().iter().filter(|c| c.is_worst).count(),
            1,
            "exactly one entry must be flagged worst"
        );
    }

    // ===================================================================
    // INVARIANT 2: The comparison list preserves the input table's
    // length and order exactly.
    // ===================================================================
    #[test]
    fn order_and_length_preserved(input in arb_input(), banks in arb_table(0)) {
        let result = ComparisonEngine::calculate(&input, &banks);
        prop_assert_eq!(result.comparisons().len(), banks.len());
        for (entry, bank) in result.comparisons().iter().zip(banks.banks()) {
            prop_assert_eq!(entry.bank_id, bank.id());
            prop_assert_eq!(entry.bank_name.as_str(), bank.name());
        }
    }

    // ===================================================================
    // INVARIANT 3: The best entry's direct payout is a maximum, the
    // worst a minimum, and both point into the list.
    // ===================================================================
    #[test]
    fn best_is_max_worst_is_min(input in arb_input(), banks in arb_table(1)) {
        let result = ComparisonEngine::calculate(&input, &banks);
        let best = result.best_bank().unwrap();
        let worst = result.worst_bank().unwrap();
        for entry in result.comparisons() {
            prop_assert!(entry.direct_total <= best.direct_total);
            prop_assert!(entry.direct_total >= worst.direct_total);
        }
        prop_assert!(result.best_worst_spread() >= Decimal::ZERO);
    }

    // ===================================================================
    // INVARIANT 4: Ties resolve to the first occurrence. Duplicating a
    // table's banks never moves the flags past the original entries.
    // ===================================================================
    #[test]
    fn ties_resolve_to_first(input in arb_input(), banks in arb_table(1)) {
        let doubled: RateTable = banks
            .banks()
            .iter()
            .chain(banks.banks())
            .cloned()
            .collect();
        let result = ComparisonEngine::calculate(&input, &doubled);
        let n = banks.len();
        // Flags must sit in the first copy: every payout there recurs
        // in the second copy, so strict comparisons never move on.
        prop_assert!(result.comparisons()[..n].iter().any(|c| c.is_best));
        prop_assert!(result.comparisons()[..n].iter().any(|c| c.is_worst));
    }

    // ===================================================================
    // INVARIANT 5: The calculation is deterministic and pure.
    // ===================================================================
    #[test]
    fn calculation_is_deterministic(input in arb_input(), banks in arb_table(0)) {
        let a = ComparisonEngine::calculate(&input, &banks);
        let b = ComparisonEngine::calculate(&input, &banks);
        prop_assert_eq!(a, b);
    }

    // ===================================================================
    // INVARIANT 6: Every monetary output is already rounded to cents.
    // ===================================================================
    #[test]
    fn outputs_are_cent_rounded(input in arb_input(), banks in arb_table(0)) {
        let result = ComparisonEngine::calculate(&input, &banks);
        prop_assert_eq!(
            result.net_source_amount(),
            round_money(result.net_source_amount())
        );
        prop_assert_eq!(
            result.intermediary_amount(),
            round_money(result.intermediary_amount())
        );
        for entry in result.comparisons() {
            prop_assert_eq!(entry.intermediary_total, round_money(entry.intermediary_total));
            prop_assert_eq!(entry.direct_total, round_money(entry.direct_total));
            prop_assert_eq!(entry.difference, entry.intermediary_total - entry.direct_total);
        }
    }

    // ===================================================================
    // INVARIANT 7: Changing one bank's receiving fee never moves another
    // bank's totals.
    // ===================================================================
    #[test]
    fn fee_change_is_local(
        input in arb_input(),
        banks in arb_table(2),
        extra_fee in 1u64..10_000u64,
        index in any::<prop::sample::Index>(),
    ) {
        let i = index.index(banks.len());
        let mut edited: Vec<BankRate> = banks.banks().to_vec();
        let bumped = edited[i].receiving_fee() + Decimal::new(extra_fee as i64, 2);
        edited[i] = edited[i].clone().with_receiving_fee(bumped);
        let edited: RateTable = edited.into_iter().collect();

        let before = ComparisonEngine::calculate(&input, &banks);
        let after = ComparisonEngine::calculate(&input, &edited);

        for (j, (b, a)) in before
            .comparisons()
            .iter()
            .zip(after.comparisons())
            .enumerate()
        {
            if j != i {
                prop_assert_eq!(b.intermediary_total, a.intermediary_total);
                prop_assert_eq!(b.direct_total, a.direct_total);
                prop_assert_eq!(b.difference, a.difference);
            }
        }
    }

    // ===================================================================
    // INVARIANT 8: A larger transfer fee never raises any payout.
    // ===================================================================
    #[test]
    fn higher_fee_never_pays_more(
        input in arb_input(),
        banks in arb_table(1),
        bump in 1u64..100_000u64,
    ) {
        let mut costlier = input.clone();
        costlier.transfer_fee = input.transfer_fee + Decimal::new(bump as i64, 2);

        let base = ComparisonEngine::calculate(&input, &banks);
        let worse = ComparisonEngine::calculate(&costlier, &banks);

        for (b, w) in base.comparisons().iter().zip(worse.comparisons()) {
            prop_assert!(w.intermediary_total <= b.intermediary_total);
            prop_assert!(w.direct_total <= b.direct_total);
        }
    }
}
