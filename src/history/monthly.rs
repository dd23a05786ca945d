use crate::model::{round_cents, DailyEntry, DailySeries, MonthlyEntry, MonthlySeries};
use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;

/// Rolls `series` up into one `MonthlyEntry` per calendar month.
///
/// A month's start balance is the balance on its first day. If the series starts part way through
/// a month, that month's first day is unknown and the first balance of the whole series is used
/// instead.
pub fn aggregate_monthly(series: &DailySeries) -> MonthlySeries {
    let fallback = series.first().balance();
    let months = series
        .entries()
        .chunk_by(|a, b| same_month(a, b))
        .map(|days| {
            let month_start = first_of_month(days[0].date());
            let change = round_cents(days.iter().map(DailyEntry::change).sum::<Decimal>());
            let start_balance = if days[0].date() == month_start {
                days[0].balance()
            } else {
                fallback
            };
            MonthlyEntry::new(month_start, change, start_balance)
        })
        .collect();
    MonthlySeries::new(months)
}

fn same_month(a: &DailyEntry, b: &DailyEntry) -> bool {
    a.date().year() == b.date().year() && a.date().month() == b.date().month()
}

pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}
