//! Append-only sales log.

pub mod log;
pub mod sale;

pub use log::SalesLog;
pub use sale::{PaymentMethod, Sale};
