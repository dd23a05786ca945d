use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The net amount posted to an account on one calendar day.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct DailyChange {
    date: NaiveDate,
    change: Decimal,
}

impl DailyChange {
    pub fn new(date: NaiveDate, change: Decimal) -> Self {
        Self { date, change }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn change(&self) -> Decimal {
        self.change
    }
}

/// One day of a balance history. `balance` is the end-of-day balance, inclusive of `change`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct DailyEntry {
    date: NaiveDate,
    change: Decimal,
    balance: Decimal,
}

impl DailyEntry {
    pub fn new(date: NaiveDate, change: Decimal, balance: Decimal) -> Self {
        Self {
            date,
            change,
            balance,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn change(&self) -> Decimal {
        self.change
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

/// A gap-free, ascending run of `DailyEntry` values, one per calendar day. It is never empty.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailySeries(Vec<DailyEntry>);

impl DailySeries {
    /// Wraps entries produced by the accumulator.
    ///
    /// # Panics
    /// If `entries` is empty or its dates are not consecutive days.
    pub(crate) fn new(entries: Vec<DailyEntry>) -> Self {
        assert!(!entries.is_empty(), "a daily series cannot be empty");
        assert!(
            entries
                .windows(2)
                .all(|w| w[0].date().succ_opt() == Some(w[1].date())),
            "a daily series must advance by exactly one day per entry"
        );
        Self(entries)
    }

    pub fn entries(&self) -> &[DailyEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, a series holds at least one day.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> &DailyEntry {
        &self.0[0]
    }

    pub fn last(&self) -> &DailyEntry {
        &self.0[self.0.len() - 1]
    }

    pub fn start_date(&self) -> NaiveDate {
        self.first().date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.last().date()
    }

    /// The entry for `date`, if `date` is inside the series' range.
    pub fn get(&self, date: NaiveDate) -> Option<&DailyEntry> {
        let offset = (date - self.start_date()).num_days();
        usize::try_from(offset).ok().and_then(|ix| self.0.get(ix))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailyEntry> + Clone {
        self.0.iter()
    }
}

/// One calendar month of a balance history.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct MonthlyEntry {
    /// Always the first day of the month.
    month_start: NaiveDate,
    /// Sum of the month's daily changes.
    change: Decimal,
    /// The balance recorded on the first of the month, or the first known balance when the
    /// history begins part way through the month.
    start_balance: Decimal,
}

impl MonthlyEntry {
    pub fn new(month_start: NaiveDate, change: Decimal, start_balance: Decimal) -> Self {
        Self {
            month_start,
            change,
            start_balance,
        }
    }

    pub fn month_start(&self) -> NaiveDate {
        self.month_start
    }

    pub fn change(&self) -> Decimal {
        self.change
    }

    pub fn start_balance(&self) -> Decimal {
        self.start_balance
    }
}

/// Chronological monthly rollup of a `DailySeries`, one entry per calendar month it touches.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlySeries(Vec<MonthlyEntry>);

impl MonthlySeries {
    pub(crate) fn new(entries: Vec<MonthlyEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[MonthlyEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthlyEntry> {
        self.0.iter()
    }
}
