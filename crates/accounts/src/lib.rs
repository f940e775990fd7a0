//! Account ledger: named running balances used to fund purchases and
//! receive sale proceeds.

pub mod ledger;

pub use ledger::{Account, AccountLedger};
