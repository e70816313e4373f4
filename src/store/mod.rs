//! Persistence of the edited rate table.

pub mod rates_store;
