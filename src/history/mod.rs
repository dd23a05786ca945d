//! Reconstructs balance histories from transaction records.
//!
//! Each account goes through the same pipeline:
//! - `collapse` sums the records of each day into one change per day
//! - `fill_gaps` adds zero-change days so every calendar day is present
//! - `accumulate` runs the opening balance forward through the changes
//! - `aggregate_monthly` rolls the daily series up by calendar month
//!
//! The combined account is then built from the two finished accounts by `combine`.

mod accumulate;
mod collapse;
mod combine;
mod fill;
mod monthly;

pub use accumulate::{accumulate, opening_balance};
pub use collapse::collapse;
pub use combine::combine;
pub use fill::fill_gaps;
pub use monthly::aggregate_monthly;

use crate::error::IngestError;
use crate::model::{within_limit, Account, DailySeries, MonthlySeries, TransactionRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, trace};

/// The daily and monthly history of a single account.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct AccountHistory {
    account: Account,
    /// The balance before the first day of `daily`.
    opening_balance: Decimal,
    daily: DailySeries,
    monthly: MonthlySeries,
}

impl AccountHistory {
    /// Builds the history of one account from its unordered `records`.
    ///
    /// `initial_balance` is the balance at the end of the earliest transaction date, i.e. after
    /// that day's transactions have posted, which is how statements report it.
    ///
    /// # Errors
    /// - `IngestError::EmptyTransactionSet` if `records` is empty.
    /// - `IngestError::InitialBalanceOutOfRange` or `IngestError::AmountOutOfRange` if a value is
    ///   beyond `MAX_AMOUNT`.
    pub fn new(
        account: Account,
        initial_balance: Decimal,
        records: &[TransactionRecord],
    ) -> Result<Self, IngestError> {
        if !within_limit(initial_balance) {
            return Err(IngestError::InitialBalanceOutOfRange {
                value: initial_balance.to_string(),
            });
        }
        trace!("Collapsing {} {account} records", records.len());
        let changes = collapse(records)?;
        let filled = fill_gaps(&changes);
        let opening = opening_balance(initial_balance, &filled);
        let daily = accumulate(opening, &filled);
        let monthly = aggregate_monthly(&daily);
        debug!(
            "Built {account} history: {} transaction days, {} days from {} to {}, {} months",
            changes.len(),
            daily.len(),
            daily.start_date(),
            daily.end_date(),
            monthly.len()
        );
        Ok(Self::from_parts(account, opening, daily, monthly))
    }

    pub(crate) fn from_parts(
        account: Account,
        opening_balance: Decimal,
        daily: DailySeries,
        monthly: MonthlySeries,
    ) -> Self {
        Self {
            account,
            opening_balance,
            daily,
            monthly,
        }
    }

    pub fn account(&self) -> Account {
        self.account
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    pub fn daily(&self) -> &DailySeries {
        &self.daily
    }

    pub fn monthly(&self) -> &MonthlySeries {
        &self.monthly
    }

    /// The end-of-day balance on `date`. Before the history starts this is the opening balance,
    /// after it ends this is the last known balance.
    pub fn balance_at(&self, date: NaiveDate) -> Decimal {
        if date < self.daily.start_date() {
            self.opening_balance
        } else {
            self.daily
                .get(date)
                .unwrap_or_else(|| self.daily.last())
                .balance()
        }
    }

    /// The net change on `date`, zero outside of the history's range.
    pub fn change_at(&self, date: NaiveDate) -> Decimal {
        self.daily
            .get(date)
            .map(|e| e.change())
            .unwrap_or(Decimal::ZERO)
    }
}

/// Chequing, saving and combined histories, built once and never changed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct BalanceHistory {
    chequing: AccountHistory,
    saving: AccountHistory,
    combined: AccountHistory,
}

impl BalanceHistory {
    /// Builds all three histories from the raw records of the two accounts.
    ///
    /// # Errors
    /// `IngestError::EmptyTransactionSet` if either account has no records.
    pub fn new(
        chequing_initial: Decimal,
        chequing_records: &[TransactionRecord],
        saving_initial: Decimal,
        saving_records: &[TransactionRecord],
    ) -> Result<Self, IngestError> {
        let chequing = AccountHistory::new(Account::Chequing, chequing_initial, chequing_records)?;
        let saving = AccountHistory::new(Account::Saving, saving_initial, saving_records)?;
        Ok(Self::from_accounts(chequing, saving))
    }

    /// Derives the combined account from two already built histories.
    pub fn from_accounts(chequing: AccountHistory, saving: AccountHistory) -> Self {
        let combined = combine(&chequing, &saving);
        Self {
            chequing,
            saving,
            combined,
        }
    }

    pub fn chequing(&self) -> &AccountHistory {
        &self.chequing
    }

    pub fn saving(&self) -> &AccountHistory {
        &self.saving
    }

    pub fn combined(&self) -> &AccountHistory {
        &self.combined
    }

    pub fn account(&self, account: Account) -> &AccountHistory {
        match account {
            Account::Chequing => &self.chequing,
            Account::Saving => &self.saving,
            Account::Combined => &self.combined,
        }
    }
}
