use crate::error::IngestError;
use crate::model::{round_cents, within_limit, DailyChange, TransactionRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sums all `records` that share a date into one `DailyChange` per date, in ascending date order.
///
/// The sum for each date is exact and is rounded to cents once, ties away from zero. Input order
/// does not matter. An empty slice is `IngestError::EmptyTransactionSet`, because the opening
/// balance of an account is derived from its first day. A record beyond `MAX_AMOUNT` is
/// `IngestError::AmountOutOfRange`, numbered by its 1-based position in `records`.
pub fn collapse(records: &[TransactionRecord]) -> Result<Vec<DailyChange>, IngestError> {
    if records.is_empty() {
        return Err(IngestError::EmptyTransactionSet);
    }

    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for (ix, record) in records.iter().enumerate() {
        if !within_limit(record.amount()) {
            return Err(IngestError::AmountOutOfRange {
                row: ix + 1,
                value: record.amount().to_string(),
            });
        }
        *totals.entry(record.date()).or_default() += record.amount();
    }

    Ok(totals
        .into_iter()
        .map(|(date, total)| DailyChange::new(date, round_cents(total)))
        .collect())
}
