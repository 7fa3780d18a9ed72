pub mod application;
pub mod cli;
pub mod domain;
pub mod journal;

pub use application::{Ledger, LedgerConfig, LedgerError};
pub use domain::*;
