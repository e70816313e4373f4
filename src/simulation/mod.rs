//! What-if analysis over conversion-rate movements.

pub mod rate_shock;
