//! The `daily` and `monthly` commands, which print a series of one account for charting.

use crate::args::SeriesArgs;
use crate::commands::{load_history, Out, OutputFormat};
use crate::model::{Amount, DailySeries, MonthlySeries};
use crate::{Config, Result};
use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

// =============================================================================
// Rows type for series output
// =============================================================================

/// Series rows rendered in the requested output format.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rows {
    /// JSON array of objects, one per row.
    Json(serde_json::Value),
    /// Markdown table as a single formatted string.
    Table(String),
    /// CSV data as a properly escaped string.
    Csv(String),
}

impl Debug for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => write!(f, "Rows::Json({:?})", v),
            Rows::Table(s) => write!(f, "Rows::Table({} chars)", s.len()),
            Rows::Csv(s) => write!(f, "Rows::Csv({} chars)", s.len()),
        }
    }
}

impl Display for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => {
                if let Ok(s) = serde_json::to_string_pretty(v) {
                    write!(f, "{}", s)
                } else {
                    write!(f, "{:?}", v)
                }
            }
            Rows::Table(s) => write!(f, "{}", s),
            Rows::Csv(s) => write!(f, "{}", s),
        }
    }
}

/// A row type that can be laid out as a table.
trait TableRow: Serialize {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// One printed day.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub change: Amount,
    pub balance: Amount,
}

impl TableRow for DailyRow {
    const HEADERS: &'static [&'static str] = &["date", "change", "balance"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.change.to_string(),
            self.balance.to_string(),
        ]
    }
}

/// One printed month. `start_balance_change` is how much the start balance moved since the
/// previous month, and is empty for the first month.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MonthlyRow {
    pub month: NaiveDate,
    pub change: Amount,
    pub start_balance: Amount,
    pub start_balance_change: Option<Amount>,
}

impl TableRow for MonthlyRow {
    const HEADERS: &'static [&'static str] =
        &["month", "change", "start_balance", "start_balance_change"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.month.format("%Y-%m").to_string(),
            self.change.to_string(),
            self.start_balance.to_string(),
            self.start_balance_change
                .map(|a| a.to_string())
                .unwrap_or_default(),
        ]
    }
}

// =============================================================================
// Command implementations
// =============================================================================

/// Builds the balance history and prints the daily series of the chosen account.
pub async fn daily(mut config: Config, args: SeriesArgs) -> Result<Out<Rows>> {
    let history = load_history(&mut config, args.input()).await?;
    let account = history.account(args.account());
    let rows = daily_rows(account.daily(), args.format());
    let message = format!(
        "{} days of {} balances from {} to {}",
        rows.len(),
        args.account(),
        account.daily().start_date(),
        account.daily().end_date()
    );
    Ok(Out::new(message, render(&rows, args.format())?))
}

/// Builds the balance history and prints the monthly rollup of the chosen account.
pub async fn monthly(mut config: Config, args: SeriesArgs) -> Result<Out<Rows>> {
    let history = load_history(&mut config, args.input()).await?;
    let account = history.account(args.account());
    let rows = monthly_rows(account.monthly(), args.format());
    let message = format!("{} months of {} balances", rows.len(), args.account());
    Ok(Out::new(message, render(&rows, args.format())?))
}

pub(crate) fn daily_rows(series: &DailySeries, format: OutputFormat) -> Vec<DailyRow> {
    series
        .iter()
        .map(|e| DailyRow {
            date: e.date(),
            change: format.amount(e.change()),
            balance: format.amount(e.balance()),
        })
        .collect()
}

pub(crate) fn monthly_rows(series: &MonthlySeries, format: OutputFormat) -> Vec<MonthlyRow> {
    let mut previous: Option<Decimal> = None;
    series
        .iter()
        .map(|m| {
            let start_balance_change = previous.map(|p| format.amount(m.start_balance() - p));
            previous = Some(m.start_balance());
            MonthlyRow {
                month: m.month_start(),
                change: format.amount(m.change()),
                start_balance: format.amount(m.start_balance()),
                start_balance_change,
            }
        })
        .collect()
}

fn render<R: TableRow>(rows: &[R], format: OutputFormat) -> Result<Rows> {
    Ok(match format {
        OutputFormat::Json => {
            Rows::Json(serde_json::to_value(rows).context("Unable to serialize rows to JSON")?)
        }
        OutputFormat::Csv => Rows::Csv(to_csv(rows)?),
        OutputFormat::Table => Rows::Table(to_table(rows)),
    })
}

fn to_csv<R: TableRow>(rows: &[R]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(R::HEADERS)?;
    for row in rows {
        wtr.write_record(row.cells())?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to flush CSV output: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}

fn to_table<R: TableRow>(rows: &[R]) -> String {
    let mut out = format!("| {} |\n", R::HEADERS.join(" | "));
    let rules: Vec<&str> = R::HEADERS
        .iter()
        .enumerate()
        .map(|(ix, _)| if ix == 0 { "---" } else { "---:" })
        .collect();
    out.push_str(&format!("| {} |\n", rules.join(" | ")));
    for row in rows {
        out.push_str(&format!("| {} |\n", row.cells().join(" | ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::InputArgs;
    use crate::model::Account;
    use crate::test::TestEnv;

    async fn run_daily(format: OutputFormat, account: Account) -> Out<Rows> {
        let env = TestEnv::new().await;
        let args = SeriesArgs::new(env.input_args(false), account, format);
        daily(env.config(), args).await.unwrap()
    }

    #[tokio::test]
    async fn test_daily_csv() {
        let out = run_daily(OutputFormat::Csv, Account::Chequing).await;
        let Some(Rows::Csv(csv)) = out.structure() else {
            panic!("expected CSV rows");
        };
        assert_eq!(
            csv,
            "date,change,balance\n\
             2021-01-01,480.00,500.00\n\
             2021-01-02,0.00,500.00\n\
             2021-01-03,-10.01,489.99\n"
        );
        assert_eq!(
            out.message(),
            "3 days of chequing balances from 2021-01-01 to 2021-01-03"
        );
    }

    #[tokio::test]
    async fn test_daily_json() {
        let out = run_daily(OutputFormat::Json, Account::Combined).await;
        let Some(Rows::Json(json)) = out.structure() else {
            panic!("expected JSON rows");
        };
        let rows = json.as_array().unwrap();
        assert_eq!(rows[0]["date"], "2021-01-01");
        assert_eq!(rows[0]["balance"], "1500.00");
    }

    #[tokio::test]
    async fn test_daily_table() {
        let out = run_daily(OutputFormat::Table, Account::Saving).await;
        let table = out.structure().unwrap().to_string();
        let mut lines = table.lines();
        assert_eq!(lines.next(), Some("| date | change | balance |"));
        assert_eq!(lines.next(), Some("| --- | ---: | ---: |"));
        assert_eq!(lines.next(), Some("| 2021-01-01 | $100.00 | $1,000.00 |"));
    }

    #[tokio::test]
    async fn test_monthly_csv() {
        let env = TestEnv::new().await;
        let saving = env
            .write_csv(
                "saving_months.csv",
                "03/01/2021,-25.00,,,\n01/15/2021,100.00,,,\n02/01/2021,50.00,,,\n",
            )
            .await;
        let input = env.input_args(false);
        let input = InputArgs::new(
            input.chequing().map(Into::into),
            Some(saving),
            input.chequing_initial(),
            input.saving_initial(),
            false,
        );
        let args = SeriesArgs::new(input, Account::Saving, OutputFormat::Csv);
        let out = monthly(env.config(), args).await.unwrap();
        assert_eq!(
            out.structure().unwrap().to_string(),
            "month,change,start_balance,start_balance_change\n\
             2021-01,100.00,1000.00,\n\
             2021-02,50.00,1050.00,50.00\n\
             2021-03,-25.00,1025.00,-25.00\n"
        );
        assert_eq!(out.message(), "3 months of saving balances");
    }
}
