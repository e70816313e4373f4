use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217-style currency code.
///
/// The comparison engine works with three fixed currency roles
/// (see [`SOURCE`], [`INTERMEDIARY`] and [`LOCAL`]), but the code itself
/// is an arbitrary identifier so rate tables stay serializable as-is.
///
/// # Examples
///
/// ```
/// use payout_engine::core::currency::CurrencyCode;
///
/// let usd = CurrencyCode::new("USD");
/// let uah = CurrencyCode::new("UAH");
/// assert_ne!(usd, uah);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The currency the user sends.
pub const SOURCE: &str = "USD";
/// The currency bought on the non-bank exchange platform.
pub const INTERMEDIARY: &str = "USDT";
/// The destination currency that decides the best offer.
pub const LOCAL: &str = "UAH";

/// Round a monetary amount to cents, half away from zero.
///
/// This is the rounding every output of the comparison engine goes
/// through: 12.345 becomes 12.35 (not banker's 12.34), -12.345
/// becomes -12.35.
///
/// # Examples
///
/// ```
/// use payout_engine::core::currency::round_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_money(dec!(12.345)), dec!(12.35));
/// assert_eq!(round_money(dec!(12.344)), dec!(12.34));
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
