use crate::model::DailyChange;
use rust_decimal::Decimal;

/// Inserts a zero change for every calendar day missing between the first and last entry of
/// `changes`. Days already present keep their change, so filling a filled series is a no-op.
///
/// # Panics
/// If `changes` is empty or its dates are not strictly ascending.
pub fn fill_gaps(changes: &[DailyChange]) -> Vec<DailyChange> {
    assert!(!changes.is_empty(), "cannot fill gaps in an empty series");
    assert!(
        changes.windows(2).all(|w| w[0].date() < w[1].date()),
        "changes must be in strictly ascending date order"
    );

    let first = changes[0].date();
    let last = changes[changes.len() - 1].date();
    let days = (last - first).num_days() as usize + 1;

    let mut present = changes.iter().peekable();
    let mut filled = Vec::with_capacity(days);
    for date in first.iter_days().take(days) {
        match present.next_if(|c| c.date() == date) {
            Some(change) => filled.push(*change),
            None => filled.push(DailyChange::new(date, Decimal::ZERO)),
        }
    }
    filled
}
