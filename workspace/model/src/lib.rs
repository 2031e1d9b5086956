//! SeaORM entities for the project ledger.
//!
//! Only plain data and relations live here; every computation over these
//! rows happens in the `compute` crate.

pub mod entities;
mod money;

pub use entities::project::PaymentType;
pub use money::Money;
