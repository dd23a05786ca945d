use crate::model::{round_cents, DailyChange, DailyEntry, DailySeries};
use rust_decimal::Decimal;

/// The balance before the first day of `changes`, given `initial_balance`, the balance reported
/// *after* the first day's transactions posted.
///
/// # Panics
/// If `changes` is empty.
pub fn opening_balance(initial_balance: Decimal, changes: &[DailyChange]) -> Decimal {
    assert!(
        !changes.is_empty(),
        "an opening balance needs at least one day of changes"
    );
    initial_balance - changes[0].change()
}

/// Runs `opening` forward through the gap-filled `changes`. Every running balance is rounded to
/// cents as it is produced, not only at the end.
///
/// # Panics
/// If `changes` is empty or has gaps.
pub fn accumulate(opening: Decimal, changes: &[DailyChange]) -> DailySeries {
    let mut balance = opening;
    let entries = changes
        .iter()
        .map(|day| {
            balance = round_cents(balance + day.change());
            DailyEntry::new(day.date(), day.change(), balance)
        })
        .collect();
    DailySeries::new(entries)
}
