//! Command handlers for the balances CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod init;
mod input;
mod series;
mod summary;

use crate::model::{Amount, PLAIN_FORMAT};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::{Debug, Display};
use tracing::{debug, info};

pub use init::init;
pub use input::{load_history, resolve_inputs};
pub use series::{daily, monthly, DailyRow, MonthlyRow, Rows};
pub use summary::{summary, AccountSummary, Summary};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

/// Controls how `daily` and `monthly` rows are printed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A JSON array with one object per row.
    Json,
    /// CSV with a header row and plain numbers.
    Csv,
    /// A markdown table with dollar formatted amounts.
    #[default]
    Table,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

impl OutputFormat {
    /// Wraps `value` so that it displays the way this format writes amounts: tables get dollar
    /// signs and commas, machine readable formats get plain numbers.
    pub fn amount(&self, value: Decimal) -> Amount {
        match self {
            OutputFormat::Table => Amount::new(value),
            OutputFormat::Json | OutputFormat::Csv => Amount::new_with_format(value, PLAIN_FORMAT),
        }
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug + Display,
{
    /// Print the message to `info!` and the structured data (if it exists) to stdout.
    pub fn print_stdout(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            println!("{structure}");
        }
    }
}
