//! payout-engine CLI
//!
//! Compare exchange payouts from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Compare the intermediary route against direct conversion
//! payout-engine compare --amount 2000 --fee 8 --rate 0.6545
//!
//! # Output as JSON
//! payout-engine compare --amount 2000 --fee 8 --rate 0.6545 --format json
//!
//! # Inspect and edit the saved rate table
//! payout-engine rates show
//! payout-engine rates set PrivatBank --intermediary 41.40 --direct 41.15
//!
//! # Stress the conversion rate
//! payout-engine shock --amount 2000 --fee 8 --rate 0.6545 --shifts -0.05,0.05
//! ```

use payout_engine::core::bank::RateTable;
use payout_engine::core::currency::{INTERMEDIARY, LOCAL, SOURCE};
use payout_engine::core::input::TransferInput;
use payout_engine::engine::comparison::ComparisonEngine;
use payout_engine::format::{format_amount, format_rate};
use payout_engine::simulation::rate_shock::{random_scenarios, run_scenarios, ShockScenario};
use payout_engine::store::rates_store::RatesStore;
use rust_decimal::Decimal;
use std::process;

const DEFAULT_STORE: &str = "rates.json";

fn print_usage() {
    eprintln!(
        r#"payout-engine — currency exchange payout comparison

USAGE:
    payout-engine <COMMAND> [OPTIONS]

COMMANDS:
    compare     Compare intermediary-platform vs. direct bank payouts
    rates       Show, edit or reset the saved bank rate table
    shock       Run conversion-rate shock scenarios
    help        Show this message

OPTIONS (compare, shock):
    --amount <N>        Amount to send, in {src} (required)
    --fee <N>           Transfer fee in {src} (default: 0)
    --rate <R>          Conversion rate {src} -> {int} (required)
    --platform-fee <N>  Platform fee in {int} (default: 0)
    --store <FILE>      Rates file (default: {store})
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (shock):
    --shifts <LIST>     Comma-separated fractional shifts, e.g. -0.05,0.05
    --random <N>        Run N random scenarios instead
    --max-shift <F>     Bound for --random (default: 0.10)

SUBCOMMANDS (rates):
    show                                Print the saved table
    set <BANK> --intermediary <R> --direct <R> [--fee <N>]
    reset                               Drop the saved table

EXAMPLES:
    payout-engine compare --amount 2000 --fee 8 --rate 0.6545
    payout-engine rates set Monobank --intermediary 41.30 --direct 41.00 --fee 0
    payout-engine shock --amount 2000 --rate 0.6545 --random 10"#,
        src = SOURCE,
        int = INTERMEDIARY,
        store = DEFAULT_STORE,
    );
}

/// JSON output schema for comparison results.
#[derive(serde::Serialize)]
struct CompareOutput {
    net_source_amount: String,
    intermediary_amount: String,
    best_bank: Option<String>,
    worst_bank: Option<String>,
    banks: Vec<BankOutput>,
}

#[derive(serde::Serialize)]
struct BankOutput {
    name: String,
    intermediary_total: String,
    direct_total: String,
    difference: String,
    best: bool,
    worst: bool,
}

/// Parse a required decimal option; exits on absence or garbage.
fn parse_required(value: Option<&String>, flag: &str) -> Decimal {
    let raw = value.unwrap_or_else(|| {
        eprintln!("Error: {} <N> is required", flag);
        process::exit(1);
    });
    raw.parse().unwrap_or_else(|e| {
        eprintln!("Invalid value '{}' for {}: {}", raw, flag, e);
        process::exit(1);
    })
}

/// Parse an optional decimal, falling back to zero on garbage.
fn parse_or_zero(value: Option<&String>) -> Decimal {
    value
        .and_then(|s| s.parse().ok())
        .unwrap_or(Decimal::ZERO)
}

/// Shared flag set for compare and shock.
#[derive(Default)]
struct CommonArgs {
    amount: Option<String>,
    fee: Option<String>,
    rate: Option<String>,
    platform_fee: Option<String>,
    store: Option<String>,
    format: Option<String>,
    shifts: Option<String>,
    random: Option<String>,
    max_shift: Option<String>,
}

fn parse_args(args: &[String]) -> CommonArgs {
    let mut parsed = CommonArgs::default();
    let mut i = 0;
    while i < args.len() {
        let take = |i: &mut usize| -> String {
            *i += 1;
            args.get(*i).cloned().unwrap_or_else(|| {
                eprintln!("{} requires a value", args[*i - 1]);
                process::exit(1);
            })
        };
        match args[i].as_str() {
            "--amount" => parsed.amount = Some(take(&mut i)),
            "--fee" => parsed.fee = Some(take(&mut i)),
            "--rate" => parsed.rate = Some(take(&mut i)),
            "--platform-fee" => parsed.platform_fee = Some(take(&mut i)),
            "--store" => parsed.store = Some(take(&mut i)),
            "--format" => parsed.format = Some(take(&mut i)),
            "--shifts" => parsed.shifts = Some(take(&mut i)),
            "--random" => parsed.random = Some(take(&mut i)),
            "--max-shift" => parsed.max_shift = Some(take(&mut i)),
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }
    parsed
}

fn build_input(args: &CommonArgs) -> TransferInput {
    TransferInput {
        amount: parse_required(args.amount.as_ref(), "--amount"),
        transfer_fee: parse_or_zero(args.fee.as_ref()),
        conversion_rate: parse_required(args.rate.as_ref(), "--rate"),
        platform_fee: parse_or_zero(args.platform_fee.as_ref()),
    }
}

fn open_store(args: &CommonArgs) -> RatesStore {
    RatesStore::new(args.store.as_deref().unwrap_or(DEFAULT_STORE))
}

fn cmd_compare(args: &[String]) {
    let args = parse_args(args);
    let input = build_input(&args);
    let banks = open_store(&args).load();

    let result = ComparisonEngine::calculate(&input, &banks);

    if args.format.as_deref() == Some("json") {
        let output = CompareOutput {
            net_source_amount: result.net_source_amount().to_string(),
            intermediary_amount: result.intermediary_amount().to_string(),
            best_bank: result.best_bank().map(|b| b.bank_name.clone()),
            worst_bank: result.worst_bank().map(|b| b.bank_name.clone()),
            banks: result
                .comparisons()
                .iter()
                .map(|c| BankOutput {
                    name: c.bank_name.clone(),
                    intermediary_total: c.intermediary_total.to_string(),
                    direct_total: c.direct_total.to_string(),
                    difference: c.difference.to_string(),
                    best: c.is_best,
                    worst: c.is_worst,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!(
            "Sending {} {} (fee {}), rate {} -> {} {}",
            format_amount(input.amount),
            SOURCE,
            format_amount(input.transfer_fee),
            format_rate(input.conversion_rate),
            format_amount(result.intermediary_amount()),
            INTERMEDIARY,
        );
        println!("{}", result);
        if let Some(best) = result.best_bank() {
            println!(
                "Best direct offer: {} at {} {}",
                best.bank_name,
                format_amount(best.direct_total),
                LOCAL,
            );
        }
    }
}

fn cmd_rates(args: &[String]) {
    let sub = args.first().map(String::as_str).unwrap_or_else(|| {
        eprintln!("rates requires a subcommand: show, set or reset");
        process::exit(1);
    });

    match sub {
        "show" => {
            let args = parse_args(&args[1..]);
            let store = open_store(&args);
            let table = store.load();
            if args.format.as_deref() == Some("json") {
                println!("{}", serde_json::to_string_pretty(&table).unwrap());
                return;
            }
            if let Some(saved) = store.load_saved() {
                println!("Saved rates ({})", saved.updated_at.to_rfc3339());
            } else {
                println!("Default rates (no saved table at {})", store.path().display());
            }
            let (src, int, loc) = RateTable::currency_roles();
            println!(
                "{:<14} {:>12} {:>12} {:>10}",
                "Bank",
                format!("{}/{}", int, loc),
                format!("{}/{}", src, loc),
                "Fee"
            );
            for bank in table.banks() {
                println!(
                    "{:<14} {:>12} {:>12} {:>10}",
                    bank.name(),
                    format_rate(bank.intermediary_rate()),
                    format_rate(bank.direct_rate()),
                    format_amount(bank.receiving_fee()),
                );
            }
        }
        "set" => {
            let name = args.get(1).cloned().unwrap_or_else(|| {
                eprintln!("rates set requires a bank name");
                process::exit(1);
            });
            // Reuses the common flags: --intermediary/--direct map onto --rate-style parsing
            let mut intermediary = None;
            let mut direct = None;
            let mut fee = None;
            let mut store_path = None;
            let rest = &args[2..];
            let mut i = 0;
            while i < rest.len() {
                match rest[i].as_str() {
                    "--intermediary" => {
                        i += 1;
                        intermediary = rest.get(i).cloned();
                    }
                    "--direct" => {
                        i += 1;
                        direct = rest.get(i).cloned();
                    }
                    "--fee" => {
                        i += 1;
                        fee = rest.get(i).cloned();
                    }
                    "--store" => {
                        i += 1;
                        store_path = rest.get(i).cloned();
                    }
                    _ => {
                        eprintln!("Unknown option: {}", rest[i]);
                        process::exit(1);
                    }
                }
                i += 1;
            }

            let store = RatesStore::new(store_path.as_deref().unwrap_or(DEFAULT_STORE));
            let mut table = store.load();
            let bank = table.find_by_name_mut(&name).unwrap_or_else(|| {
                eprintln!("No bank named '{}' in the rate table", name);
                process::exit(1);
            });
            let intermediary = parse_required(intermediary.as_ref(), "--intermediary");
            let direct = parse_required(direct.as_ref(), "--direct");
            let fee = parse_or_zero(fee.as_ref());
            bank.update(intermediary, direct, fee);

            if let Err(e) = store.save(&table) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
            println!("Saved {} -> {}", name, store.path().display());
        }
        "reset" => {
            let args = parse_args(&args[1..]);
            let store = open_store(&args);
            if let Err(e) = store.reset() {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
            println!("Rate table reset to defaults.");
        }
        _ => {
            eprintln!("Unknown rates subcommand: {}", sub);
            process::exit(1);
        }
    }
}

fn cmd_shock(args: &[String]) {
    let args = parse_args(args);
    let input = build_input(&args);
    let banks = open_store(&args).load();

    let scenarios: Vec<ShockScenario> = if let Some(n) = &args.random {
        let count: usize = n.parse().unwrap_or_else(|_| {
            eprintln!("--random requires a number");
            process::exit(1);
        });
        let max_shift: f64 = args
            .max_shift
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.10);
        random_scenarios(count, max_shift)
    } else if let Some(list) = &args.shifts {
        list.split(',')
            .map(|s| {
                let shift: Decimal = s.trim().parse().unwrap_or_else(|e| {
                    eprintln!("Invalid shift '{}': {}", s, e);
                    process::exit(1);
                });
                ShockScenario::new(shift)
            })
            .collect()
    } else {
        eprintln!("Error: shock requires --shifts <LIST> or --random <N>");
        process::exit(1);
    };

    let results = run_scenarios(&input, &banks, &scenarios);

    if args.format.as_deref() == Some("json") {
        println!("{}", serde_json::to_string_pretty(&results).unwrap());
    } else {
        for result in &results {
            println!("{}", result);
        }
        let flips = results.iter().filter(|r| r.winner_changed).count();
        println!("Winner changed in {}/{} scenarios.", flips, results.len());
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "compare" => cmd_compare(rest),
        "rates" => cmd_rates(rest),
        "shock" => cmd_shock(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
