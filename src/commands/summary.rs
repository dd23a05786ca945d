use crate::args::InputArgs;
use crate::commands::{load_history, Out};
use crate::history::AccountHistory;
use crate::model::{Account, Amount};
use crate::{Config, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// The first and last balance of every account, plus the extremes in between.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Summary {
    pub accounts: Vec<AccountSummary>,
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for account in &self.accounts {
            writeln!(f, "{}", account.line())?;
        }
        Ok(())
    }
}

/// Summary of one account's daily history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct AccountSummary {
    pub account: Account,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: usize,
    pub months: usize,
    pub first_balance: Amount,
    pub last_balance: Amount,
    /// Sum of every daily change, i.e. last balance minus the opening balance.
    pub net_change: Amount,
    pub highest_balance: Amount,
    pub lowest_balance: Amount,
}

impl AccountSummary {
    pub fn new(history: &AccountHistory) -> Self {
        let daily = history.daily();
        let balances = daily.iter().map(|e| e.balance());
        let highest = balances.clone().max().unwrap_or_default();
        let lowest = balances.min().unwrap_or_default();
        Self {
            account: history.account(),
            start_date: daily.start_date(),
            end_date: daily.end_date(),
            days: daily.len(),
            months: history.monthly().len(),
            first_balance: daily.first().balance().into(),
            last_balance: daily.last().balance().into(),
            net_change: (daily.last().balance() - history.opening_balance()).into(),
            highest_balance: highest.into(),
            lowest_balance: lowest.into(),
        }
    }

    /// A one line description, e.g.
    /// `saving: $100.00 on 2020-06-15 to $90.00 on 2020-07-01 (net $15.00, high $100.00, low $90.00)`
    pub fn line(&self) -> String {
        format!(
            "{}: {} on {} to {} on {} (net {}, high {}, low {})",
            self.account,
            self.first_balance,
            self.start_date,
            self.last_balance,
            self.end_date,
            self.net_change,
            self.highest_balance,
            self.lowest_balance
        )
    }
}

/// Builds the balance history and reports the first and last balance of each account.
pub async fn summary(mut config: Config, args: InputArgs) -> Result<Out<Summary>> {
    let history = load_history(&mut config, &args).await?;
    let accounts: Vec<AccountSummary> = Account::ALL
        .iter()
        .map(|account| AccountSummary::new(history.account(*account)))
        .collect();
    let message = format!("Summarized {} accounts", accounts.len());
    Ok(Out::new(message, Summary { accounts }))
}
