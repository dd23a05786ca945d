pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Problems found while turning exported rows into transaction records. These are all detected
/// before any series is computed, so a failure never leaves a partial history behind.
///
/// Row numbers start at 1.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum IngestError {
    /// The date field is not a valid month/day/year calendar date.
    #[error("row {row}: unable to parse '{value}' as a month/day/year date")]
    MalformedDate { row: usize, value: String },

    /// The amount field is not a decimal number.
    #[error("row {row}: unable to parse '{value}' as an amount")]
    NonNumericAmount { row: usize, value: String },

    /// The amount is larger in magnitude than `MAX_AMOUNT`.
    #[error("row {row}: the amount '{value}' is out of range")]
    AmountOutOfRange { row: usize, value: String },

    /// The initial balance is larger in magnitude than `MAX_AMOUNT`.
    #[error("the initial balance {value} is out of range")]
    InitialBalanceOutOfRange { value: String },

    /// The row ended before the named field.
    #[error("row {row}: the {field} field is missing")]
    MissingField { row: usize, field: &'static str },

    /// There were no transactions at all for an account.
    #[error("no transactions were found")]
    EmptyTransactionSet,
}
