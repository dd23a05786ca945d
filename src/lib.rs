//! Rebuilds chequing, saving and combined balance histories from bank transaction exports.
//!
//! The computation lives in [`history`] and works on the value types in [`model`]. The rest of the
//! crate is the command line tool around it.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod history;
pub mod import;
pub mod model;
mod utils;

pub use config::{Config, LastEntry};
pub use error::{Error, IngestError, Result};
pub use history::{AccountHistory, BalanceHistory};
