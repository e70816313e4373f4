//! # payout-engine
//!
//! Currency exchange payout comparison engine.
//!
//! Given an amount to send, the fees on the way, and a table of bank
//! rates, the engine compares two routes into the local currency —
//! buying an intermediary currency on an exchange platform versus
//! converting directly at each bank — and flags the best and worst
//! offers.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: currencies, bank rates, transfer inputs
//! - **engine** — The pure comparison calculation
//! - **store** — JSON persistence of the edited rate table
//! - **simulation** — Conversion-rate shock scenarios
//! - **format** — Display formatting for amounts and rates

pub mod core;
pub mod engine;
pub mod format;
pub mod simulation;
pub mod store;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::bank::{BankRate, RateTable};
    pub use crate::core::currency::{round_money, CurrencyCode};
    pub use crate::core::input::TransferInput;
    pub use crate::engine::comparison::{BankComparison, ComparisonEngine, ComparisonResult};
    pub use crate::store::rates_store::RatesStore;
}
