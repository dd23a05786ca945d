//! These structs provide the CLI interface for the balances CLI.

use crate::commands::OutputFormat;
use crate::model::{Account, Amount};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// balances: Reconstructs your chequing and saving balance history from bank exports.
///
/// Give it the CSV transaction exports of a chequing and a saving account together with the
/// balance of each account at the end of its earliest transaction day. It rebuilds the balance of
/// both accounts, and of the two combined, for every day in the exports and rolls those up by
/// month.
///
/// Each export row is `date,amount,...` where the date is month/day/year. Any further columns are
/// ignored.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the balances home directory and an empty configuration file.
    Init,
    /// Print the first and last balance of each account along with its highs and lows.
    Summary(InputArgs),
    /// Print one row per calendar day: the day's net change and its closing balance.
    Daily(SeriesArgs),
    /// Print one row per calendar month: the month's net change and its opening balance.
    Monthly(SeriesArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the configuration is held. Defaults to ~/balances
    #[arg(long, env = "BALANCES_HOME", default_value_t = default_balances_home())]
    balances_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, balances_home: PathBuf) -> Self {
        Self {
            log_level,
            balances_home: balances_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn balances_home(&self) -> &DisplayPath {
        &self.balances_home
    }
}

/// The export files and initial balances to build the history from. Anything that is left out is
/// taken from the last remembered entry in the config file.
#[derive(Debug, Default, Parser, Clone)]
pub struct InputArgs {
    /// The CSV transaction export of the chequing account.
    #[arg(long)]
    chequing: Option<PathBuf>,

    /// The CSV transaction export of the saving account.
    #[arg(long)]
    saving: Option<PathBuf>,

    /// The chequing balance at the end of its earliest transaction day, e.g. 1520.11 or $1,520.11
    #[arg(long, allow_hyphen_values = true)]
    chequing_initial: Option<Amount>,

    /// The saving balance at the end of its earliest transaction day.
    #[arg(long, allow_hyphen_values = true)]
    saving_initial: Option<Amount>,

    /// Save these inputs in the config file so they can be left out next time.
    #[arg(long)]
    remember: bool,
}

impl InputArgs {
    pub fn new(
        chequing: Option<PathBuf>,
        saving: Option<PathBuf>,
        chequing_initial: Option<Amount>,
        saving_initial: Option<Amount>,
        remember: bool,
    ) -> Self {
        Self {
            chequing,
            saving,
            chequing_initial,
            saving_initial,
            remember,
        }
    }

    pub fn chequing(&self) -> Option<&Path> {
        self.chequing.as_deref()
    }

    pub fn saving(&self) -> Option<&Path> {
        self.saving.as_deref()
    }

    pub fn chequing_initial(&self) -> Option<Amount> {
        self.chequing_initial
    }

    pub fn saving_initial(&self) -> Option<Amount> {
        self.saving_initial
    }

    pub fn remember(&self) -> bool {
        self.remember
    }
}

/// Args for the `balances daily` and `balances monthly` commands.
#[derive(Debug, Parser, Clone)]
pub struct SeriesArgs {
    #[clap(flatten)]
    input: InputArgs,

    /// Which account to print.
    #[arg(long, value_enum, default_value_t = Account::Combined)]
    account: Account,

    /// How to print the rows.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl SeriesArgs {
    pub fn new(input: InputArgs, account: Account, format: OutputFormat) -> Self {
        Self {
            input,
            account,
            format,
        }
    }

    pub fn input(&self) -> &InputArgs {
        &self.input
    }

    pub fn account(&self) -> Account {
        self.account
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

fn default_balances_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("balances"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --balances-home or BALANCES_HOME instead of relying on the \
                default home directory.",
            );
            PathBuf::from("balances")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
