use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The numeric inputs of one comparison run.
///
/// Fee model: `transfer_fee` is denominated in the source currency and
/// comes off the requested amount first; `platform_fee` is denominated
/// in the intermediary currency and comes off after the conversion.
/// Per-bank receiving fees live on [`crate::core::bank::BankRate`].
///
/// # Examples
///
/// ```
/// use payout_engine::core::input::TransferInput;
/// use rust_decimal_macros::dec;
///
/// let input = TransferInput::new(dec!(2000), dec!(8), dec!(0.6545));
/// assert_eq!(input.net_source_amount(), dec!(1992));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferInput {
    /// Amount to send, in the source currency.
    pub amount: Decimal,
    /// Transfer fee, in the source currency.
    pub transfer_fee: Decimal,
    /// Conversion rate: 1 source unit = `conversion_rate` intermediary units.
    pub conversion_rate: Decimal,
    /// Platform fee, in the intermediary currency.
    pub platform_fee: Decimal,
}

impl TransferInput {
    /// Create an input with zero platform fee.
    pub fn new(amount: Decimal, transfer_fee: Decimal, conversion_rate: Decimal) -> Self {
        Self {
            amount,
            transfer_fee,
            conversion_rate,
            platform_fee: Decimal::ZERO,
        }
    }

    /// Set the intermediary-currency platform fee.
    pub fn with_platform_fee(mut self, fee: Decimal) -> Self {
        self.platform_fee = fee;
        self
    }

    /// Amount actually converted, after the transfer fee.
    pub fn net_source_amount(&self) -> Decimal {
        self.amount - self.transfer_fee
    }

    /// Intermediary-currency amount after conversion and platform fee.
    pub fn net_intermediary_amount(&self) -> Decimal {
        self.net_source_amount() * self.conversion_rate - self.platform_fee
    }
}
