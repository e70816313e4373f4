use crate::core::currency::{CurrencyCode, INTERMEDIARY, LOCAL, SOURCE};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bank's posted conversion terms.
///
/// `intermediary_rate` is the buy rate for the intermediary currency
/// (USDT → UAH), `direct_rate` the buy rate for the source currency
/// (USD → UAH), and `receiving_fee` a fixed local-currency fee the bank
/// charges to accept an incoming transfer, applied to both paths.
///
/// A `BankRate` is immutable once handed to a calculation; the editable
/// working copy lives in a [`RateTable`].
///
/// # Examples
///
/// ```
/// use payout_engine::core::bank::BankRate;
/// use rust_decimal_macros::dec;
///
/// let bank = BankRate::new("PrivatBank", dec!(41.35), dec!(41.10))
///     .with_receiving_fee(dec!(50));
///
/// assert_eq!(bank.receiving_fee(), dec!(50));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRate {
    /// Unique identifier for this bank entry.
    id: Uuid,
    /// Display name of the bank.
    name: String,
    /// Buy rate: 1 unit of the intermediary currency = `intermediary_rate` local units.
    intermediary_rate: Decimal,
    /// Buy rate: 1 unit of the source currency = `direct_rate` local units.
    direct_rate: Decimal,
    /// Fixed receiving fee in local-currency units.
    receiving_fee: Decimal,
}

impl BankRate {
    /// Create a bank entry with zero receiving fee.
    pub fn new(
        name: impl Into<String>,
        intermediary_rate: Decimal,
        direct_rate: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            intermediary_rate,
            direct_rate,
            receiving_fee: Decimal::ZERO,
        }
    }

    /// Create a bank entry with a specific ID (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        name: impl Into<String>,
        intermediary_rate: Decimal,
        direct_rate: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            intermediary_rate,
            direct_rate,
            receiving_fee: Decimal::ZERO,
        }
    }

    /// Set the receiving fee.
    pub fn with_receiving_fee(mut self, fee: Decimal) -> Self {
        self.receiving_fee = fee;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn intermediary_rate(&self) -> Decimal {
        self.intermediary_rate
    }

    pub fn direct_rate(&self) -> Decimal {
        self.direct_rate
    }

    pub fn receiving_fee(&self) -> Decimal {
        self.receiving_fee
    }

    /// Replace the posted rates and fee, keeping identity.
    pub fn update(
        &mut self,
        intermediary_rate: Decimal,
        direct_rate: Decimal,
        receiving_fee: Decimal,
    ) {
        self.intermediary_rate = intermediary_rate;
        self.direct_rate = direct_rate;
        self.receiving_fee = receiving_fee;
    }
}

/// The ordered, editable set of bank rates the engine compares.
///
/// Order is significant: the comparison result preserves it, and ties
/// between equal payouts resolve to the earlier entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    banks: Vec<BankRate>,
}

impl RateTable {
    pub fn new() -> Self {
        Self { banks: Vec::new() }
    }

    /// The built-in bank list used when no saved table exists.
    ///
    /// Ids are fixed so two freshly built default tables compare equal.
    pub fn defaults() -> Self {
        Self {
            banks: vec![
                BankRate::with_id(Uuid::from_u128(1), "PrivatBank", dec!(41.35), dec!(41.10)),
                BankRate::with_id(Uuid::from_u128(2), "Monobank", dec!(41.28), dec!(41.05)),
                BankRate::with_id(Uuid::from_u128(3), "Oschadbank", dec!(41.00), dec!(40.80))
                    .with_receiving_fee(dec!(50)),
                BankRate::with_id(Uuid::from_u128(4), "Raiffeisen", dec!(41.15), dec!(40.95))
                    .with_receiving_fee(dec!(25)),
            ],
        }
    }

    pub fn add(&mut self, bank: BankRate) {
        self.banks.push(bank);
    }

    pub fn banks(&self) -> &[BankRate] {
        &self.banks
    }

    pub fn len(&self) -> usize {
        self.banks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }

    /// Find a bank by display name (exact match).
    pub fn find_by_name(&self, name: &str) -> Option<&BankRate> {
        self.banks.iter().find(|b| b.name == name)
    }

    /// Mutable lookup by display name, for the edit flow.
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut BankRate> {
        self.banks.iter_mut().find(|b| b.name == name)
    }

    /// The currency roles this table is quoted in.
    pub fn currency_roles() -> (CurrencyCode, CurrencyCode, CurrencyCode) {
        (
            CurrencyCode::new(SOURCE),
            CurrencyCode::new(INTERMEDIARY),
            CurrencyCode::new(LOCAL),
        )
    }
}

impl FromIterator<BankRate> for RateTable {
    fn from_iter<T: IntoIterator<Item = BankRate>>(iter: T) -> Self {
        Self {
            banks: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bank() -> BankRate {
        BankRate::new("PrivatBank", dec!(41.35), dec!(41.10)).with_receiving_fee(dec!(20))
    }

    #[test]
    fn test_bank_rate_accessors() {
        let bank = sample_bank();
        assert_eq!(bank.name(), "PrivatBank");
        assert_eq!(bank.intermediary_rate(), dec!(41.35));
        assert_eq!(bank.direct_rate(), dec!(41.10));
        assert_eq!(bank.receiving_fee(), dec!(20));
    }

    #[test]
    fn test_bank_update_keeps_id() {
        let mut bank = sample_bank();
        let id = bank.id();
        bank.update(dec!(42), dec!(41.5), dec!(0));
        assert_eq!(bank.id(), id);
        assert_eq!(bank.intermediary_rate(), dec!(42));
        assert_eq!(bank.receiving_fee(), Decimal::ZERO);
    }

    #[test]
    fn test_default_table_non_empty() {
        let table = RateTable::defaults();
        assert!(!table.is_empty());
        assert!(table.find_by_name("Monobank").is_some());
    }

    #[test]
    fn test_table_preserves_insertion_order() {
        let mut table = RateTable::new();
        table.add(BankRate::new("B1", dec!(1), dec!(1)));
        table.add(BankRate::new("B2", dec!(2), dec!(2)));
        table.add(BankRate::new("B3", dec!(3), dec!(3)));
        let names: Vec<&str> = table.banks().iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["B1", "B2", "B3"]);
    }

    #[test]
    fn test_find_by_name_mut_edits_in_place() {
        let mut table = RateTable::defaults();
        table
            .find_by_name_mut("Oschadbank")
            .unwrap()
            .update(dec!(40.5), dec!(40.2), dec!(0));
        assert_eq!(
            table.find_by_name("Oschadbank").unwrap().receiving_fee(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_rate_table_serde_round_trip() {
        let table = RateTable::defaults();
        let json = serde_json::to_string(&table).unwrap();
        let back: RateTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
