//! The pure payout comparison engine.

pub mod comparison;
