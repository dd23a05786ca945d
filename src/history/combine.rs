use crate::history::{accumulate, aggregate_monthly, fill_gaps, AccountHistory};
use crate::model::{round_cents, Account, DailyChange};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

/// Builds the combined account from two single-account histories.
///
/// Changes are summed by date across both accounts, the union is gap-filled over its whole range,
/// and the result is accumulated from the sum of the two opening balances. Outside of its own
/// range an account contributes no change, so the combined balance on any day equals the sum of
/// `AccountHistory::balance_at` for both accounts.
pub fn combine(chequing: &AccountHistory, saving: &AccountHistory) -> AccountHistory {
    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for entry in chequing.daily().iter().chain(saving.daily().iter()) {
        *totals.entry(entry.date()).or_default() += entry.change();
    }
    let union: Vec<DailyChange> = totals
        .into_iter()
        .map(|(date, total)| DailyChange::new(date, round_cents(total)))
        .collect();

    let filled = fill_gaps(&union);
    let opening = chequing.opening_balance() + saving.opening_balance();
    debug!(
        "Combining {} {} days and {} {} days into {} days",
        chequing.daily().len(),
        chequing.account(),
        saving.daily().len(),
        saving.account(),
        filled.len()
    );

    let daily = accumulate(opening, &filled);
    let monthly = aggregate_monthly(&daily);
    AccountHistory::from_parts(Account::Combined, opening, daily, monthly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionRecord;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn history(account: Account, initial: &str, records: &[(NaiveDate, &str)]) -> AccountHistory {
        let records: Vec<TransactionRecord> = records
            .iter()
            .map(|(d, a)| TransactionRecord::new(*d, dec(a)))
            .collect();
        AccountHistory::new(account, dec(initial), &records).unwrap()
    }

    fn assert_sums(chequing: &AccountHistory, saving: &AccountHistory, combined: &AccountHistory) {
        for entry in combined.daily().iter() {
            let d = entry.date();
            assert_eq!(
                entry.balance(),
                chequing.balance_at(d) + saving.balance_at(d),
                "balance on {d}"
            );
            assert_eq!(
                entry.change(),
                chequing.change_at(d) + saving.change_at(d),
                "change on {d}"
            );
        }
    }

    #[test]
    fn test_same_range() {
        let chequing = history(
            Account::Chequing,
            "500.00",
            &[(date(2021, 1, 1), "480.00"), (date(2021, 1, 3), "-10.01")],
        );
        let saving = history(
            Account::Saving,
            "1000.00",
            &[(date(2021, 1, 1), "100.00"), (date(2021, 1, 3), "5.00")],
        );
        let combined = combine(&chequing, &saving);
        assert_eq!(combined.account(), Account::Combined);
        assert_eq!(combined.daily().len(), 3);
        // Same first day: the combined first balance is the sum of the two initial balances.
        assert_eq!(combined.daily().first().balance(), dec("1500.00"));
        assert_eq!(combined.daily().last().balance(), dec("1494.99"));
        assert_sums(&chequing, &saving, &combined);
    }

    #[test]
    fn test_overlapping_ranges() {
        let chequing = history(
            Account::Chequing,
            "200.00",
            &[(date(2021, 1, 5), "-50.00"), (date(2021, 2, 10), "25.00")],
        );
        let saving = history(
            Account::Saving,
            "75.00",
            &[(date(2021, 1, 1), "75.00"), (date(2021, 1, 20), "10.00")],
        );
        let combined = combine(&chequing, &saving);
        assert_eq!(combined.daily().start_date(), date(2021, 1, 1));
        assert_eq!(combined.daily().end_date(), date(2021, 2, 10));
        assert_eq!(combined.daily().len(), 41);
        assert_sums(&chequing, &saving, &combined);
    }

    #[test]
    fn test_disjoint_ranges_are_gap_filled() {
        let chequing = history(Account::Chequing, "10.00", &[(date(2021, 1, 1), "10.00")]);
        let saving = history(Account::Saving, "20.00", &[(date(2021, 1, 4), "5.00")]);
        let combined = combine(&chequing, &saving);
        let changes: Vec<Decimal> = combined.daily().iter().map(|e| e.change()).collect();
        assert_eq!(
            changes,
            vec![dec("10.00"), Decimal::ZERO, Decimal::ZERO, dec("5.00")]
        );
        assert_sums(&chequing, &saving, &combined);
    }

    #[test]
    fn test_combined_monthly_rollup() {
        let chequing = history(
            Account::Chequing,
            "100.00",
            &[(date(2021, 1, 1), "100.00"), (date(2021, 2, 1), "-30.00")],
        );
        let saving = history(
            Account::Saving,
            "50.00",
            &[(date(2021, 1, 1), "50.00"), (date(2021, 2, 15), "20.00")],
        );
        let combined = combine(&chequing, &saving);
        let monthly = combined.monthly().entries();
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].start_balance(), dec("150.00"));
        assert_eq!(monthly[1].start_balance(), dec("120.00"));
        assert_eq!(monthly[1].change(), dec("-10.00"));
    }
}
