use serde::{Deserialize, Serialize};

/// The accounts that a balance history is tracked for. `Combined` is derived from the other two.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Account {
    Chequing,
    Saving,
    #[default]
    Combined,
}

serde_plain::derive_display_from_serialize!(Account);
serde_plain::derive_fromstr_from_deserialize!(Account);

impl Account {
    /// All accounts, in the order they are reported.
    pub const ALL: [Account; 3] = [Account::Chequing, Account::Saving, Account::Combined];
}
