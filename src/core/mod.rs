//! Foundational types: currencies, bank rates, transfer inputs.

pub mod bank;
pub mod currency;
pub mod input;
