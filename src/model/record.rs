use crate::error::IngestError;
use crate::model::Amount;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The date layout used by the bank exports, e.g. `01/03/2021`. The year must have four digits.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// The largest magnitude accepted for a single amount or initial balance, one quadrillion
/// (`0x38D7E_A4C68000`). Sums of bounded amounts cannot overflow `Decimal`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Whether `value` is small enough to be summed safely.
pub fn within_limit(value: Decimal) -> bool {
    value.abs() <= MAX_AMOUNT
}

/// Parses a `DATE_FORMAT` date. chrono accepts a year of any width, so the year is checked to
/// be exactly four digits first.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let year = value.rsplit('/').next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// A single posted transaction: the day it posted and its signed amount.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct TransactionRecord {
    date: NaiveDate,
    amount: Decimal,
}

impl TransactionRecord {
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self { date, amount }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Parses one exported row. Only the first two fields (date, amount) are read, the rest of
    /// the row is ignored. `row` is the 1-based row number used in error messages.
    pub fn from_row<S>(row: usize, fields: &[S]) -> Result<Self, IngestError>
    where
        S: AsRef<str>,
    {
        let date_field = fields
            .first()
            .ok_or(IngestError::MissingField { row, field: "date" })?
            .as_ref()
            .trim();
        let amount_field = fields
            .get(1)
            .ok_or(IngestError::MissingField {
                row,
                field: "amount",
            })?
            .as_ref()
            .trim();

        let date = parse_date(date_field).ok_or_else(|| IngestError::MalformedDate {
            row,
            value: date_field.to_string(),
        })?;
        let amount = Amount::from_str(amount_field).map_err(|_| IngestError::NonNumericAmount {
            row,
            value: amount_field.to_string(),
        })?;
        if !within_limit(amount.value()) {
            return Err(IngestError::AmountOutOfRange {
                row,
                value: amount_field.to_string(),
            });
        }

        Ok(Self::new(date, amount.value()))
    }

    /// Parses every row, stopping at the first bad one.
    pub fn parse_rows<S, R>(rows: impl IntoIterator<Item = R>) -> Result<Vec<Self>, IngestError>
    where
        S: AsRef<str>,
        R: AsRef<[S]>,
    {
        rows.into_iter()
            .enumerate()
            .map(|(ix, row)| Self::from_row(ix + 1, row.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_row_reads_first_two_fields() {
        let record =
            TransactionRecord::from_row(1, &["01/03/2021", "-10.005", "*", "", "PAYMENT"]).unwrap();
        assert_eq!(record.date(), date(2021, 1, 3));
        assert_eq!(record.amount(), Decimal::from_str("-10.005").unwrap());
    }

    #[test]
    fn test_from_row_accepts_dollar_signs_and_commas() {
        let record = TransactionRecord::from_row(1, &["6/15/2020", "$1,250.00"]).unwrap();
        assert_eq!(record.date(), date(2020, 6, 15));
        assert_eq!(record.amount(), Decimal::from_str("1250.00").unwrap());
    }

    #[test]
    fn test_from_row_malformed_date() {
        let err = TransactionRecord::from_row(4, &["2021-01-03", "1.00"]).unwrap_err();
        assert_eq!(
            err,
            IngestError::MalformedDate {
                row: 4,
                value: "2021-01-03".to_string()
            }
        );
    }

    #[test]
    fn test_from_row_impossible_date() {
        let err = TransactionRecord::from_row(1, &["02/30/2021", "1.00"]).unwrap_err();
        assert!(matches!(err, IngestError::MalformedDate { .. }));
    }

    #[test]
    fn test_from_row_two_digit_year() {
        let err = TransactionRecord::from_row(3, &["01/03/21", "1.00"]).unwrap_err();
        assert_eq!(
            err,
            IngestError::MalformedDate {
                row: 3,
                value: "01/03/21".to_string()
            }
        );
    }

    #[test]
    fn test_from_row_five_digit_year() {
        let err = TransactionRecord::from_row(1, &["01/03/20210", "1.00"]).unwrap_err();
        assert!(matches!(err, IngestError::MalformedDate { .. }));
    }

    #[test]
    fn test_from_row_single_digit_month_and_day() {
        let record = TransactionRecord::from_row(1, &["1/3/2021", "1.00"]).unwrap();
        assert_eq!(record.date(), date(2021, 1, 3));
    }

    #[test]
    fn test_from_row_amount_out_of_range() {
        let err = TransactionRecord::from_row(5, &["01/03/2021", "50000000000000000000000000000"])
            .unwrap_err();
        assert_eq!(
            err,
            IngestError::AmountOutOfRange {
                row: 5,
                value: "50000000000000000000000000000".to_string()
            }
        );
    }

    #[test]
    fn test_max_amount_is_one_quadrillion() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000_000_i64));
        assert!(within_limit(-MAX_AMOUNT));
        assert!(!within_limit(MAX_AMOUNT + Decimal::new(1, 2)));
    }

    #[test]
    fn test_from_row_non_numeric_amount() {
        let err = TransactionRecord::from_row(2, &["01/03/2021", "ten"]).unwrap_err();
        assert_eq!(
            err,
            IngestError::NonNumericAmount {
                row: 2,
                value: "ten".to_string()
            }
        );
    }

    #[test]
    fn test_from_row_blank_amount() {
        let err = TransactionRecord::from_row(2, &["01/03/2021", ""]).unwrap_err();
        assert!(matches!(err, IngestError::NonNumericAmount { .. }));
    }

    #[test]
    fn test_from_row_missing_amount() {
        let err = TransactionRecord::from_row(7, &["01/03/2021"]).unwrap_err();
        assert_eq!(
            err,
            IngestError::MissingField {
                row: 7,
                field: "amount"
            }
        );
    }

    #[test]
    fn test_parse_rows_numbers_rows_from_one() {
        let rows = vec![
            vec!["01/01/2021", "500.00", "*", "", "DEPOSIT"],
            vec!["01/01/2021", "oops", "*", "", "FEE"],
        ];
        let err = TransactionRecord::parse_rows(rows).unwrap_err();
        assert!(matches!(err, IngestError::NonNumericAmount { row: 2, .. }));
    }

    #[test]
    fn test_parse_rows_keeps_input_order() {
        let rows = vec![vec!["01/03/2021", "1"], vec!["01/01/2021", "2"]];
        let records = TransactionRecord::parse_rows(rows).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date(), date(2021, 1, 3));
        assert_eq!(records[1].date(), date(2021, 1, 1));
    }
}
