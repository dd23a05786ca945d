//! Value types shared by the balance computations and the command layer: amounts, transaction
//! records, and the daily and monthly series.
mod account;
mod amount;
mod record;
mod series;

pub use account::Account;
pub use amount::{round_cents, Amount, AmountError, AmountFormat, CENTS_DP, PLAIN_FORMAT};
pub use record::{within_limit, TransactionRecord, DATE_FORMAT, MAX_AMOUNT};
pub use series::{DailyChange, DailyEntry, DailySeries, MonthlyEntry, MonthlySeries};
