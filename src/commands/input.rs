use crate::args::InputArgs;
use crate::history::{AccountHistory, BalanceHistory};
use crate::model::{Account, Amount};
use crate::{import, utils, Config, LastEntry, Result};
use anyhow::{Context, Error};
use std::path::Path;
use tracing::info;

/// Fills anything missing from `args` with the remembered `last` entry.
///
/// # Errors
/// If a value is in neither place.
pub fn resolve_inputs(args: &InputArgs, last: Option<&LastEntry>) -> Result<LastEntry> {
    let missing = |flag: &str| -> Error {
        anyhow::anyhow!("{flag} was not given and there is no remembered value for it")
    };
    Ok(LastEntry {
        chequing_path: args
            .chequing()
            .map(Path::to_path_buf)
            .or_else(|| last.map(|l| l.chequing_path.clone()))
            .ok_or_else(|| missing("--chequing"))?,
        saving_path: args
            .saving()
            .map(Path::to_path_buf)
            .or_else(|| last.map(|l| l.saving_path.clone()))
            .ok_or_else(|| missing("--saving"))?,
        chequing_initial: args
            .chequing_initial()
            .or_else(|| last.map(|l| l.chequing_initial))
            .ok_or_else(|| missing("--chequing-initial"))?,
        saving_initial: args
            .saving_initial()
            .or_else(|| last.map(|l| l.saving_initial))
            .ok_or_else(|| missing("--saving-initial"))?,
    })
}

/// Resolves the inputs, loads both exports and builds the balance history. When `--remember` was
/// given, the inputs are saved to the config file once the history has been built.
pub async fn load_history(config: &mut Config, args: &InputArgs) -> Result<BalanceHistory> {
    let inputs = resolve_inputs(args, config.last_entry())?;
    let chequing = load_account(
        Account::Chequing,
        &inputs.chequing_path,
        &inputs.chequing_initial,
    )
    .await?;
    let saving = load_account(Account::Saving, &inputs.saving_path, &inputs.saving_initial).await?;

    if args.remember() {
        let entry = LastEntry {
            chequing_path: utils::canonicalize(&inputs.chequing_path).await?,
            saving_path: utils::canonicalize(&inputs.saving_path).await?,
            ..inputs
        };
        config.save_last_entry(entry).await?;
        info!("Remembered these inputs in {}", config.config_path().display());
    }

    Ok(BalanceHistory::from_accounts(chequing, saving))
}

async fn load_account(
    account: Account,
    path: &Path,
    initial: &Amount,
) -> Result<AccountHistory> {
    let records = import::load_records(path)
        .await
        .with_context(|| format!("Unable to load the {account} transactions"))?;
    AccountHistory::new(account, initial.value(), &records).with_context(|| {
        format!(
            "Unable to build the {account} history from {}",
            path.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use rust_decimal::Decimal;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_resolve_from_args_only() {
        let args = InputArgs::new(
            Some(PathBuf::from("c.csv")),
            Some(PathBuf::from("s.csv")),
            Some(amount("1")),
            Some(amount("2")),
            false,
        );
        let inputs = resolve_inputs(&args, None).unwrap();
        assert_eq!(inputs.chequing_path, PathBuf::from("c.csv"));
        assert_eq!(inputs.saving_initial.value(), Decimal::from(2));
    }

    #[test]
    fn test_resolve_falls_back_to_last_entry() {
        let last = LastEntry {
            chequing_path: PathBuf::from("/old/c.csv"),
            saving_path: PathBuf::from("/old/s.csv"),
            chequing_initial: amount("10"),
            saving_initial: amount("20"),
        };
        let args = InputArgs::new(None, None, Some(amount("99")), None, false);
        let inputs = resolve_inputs(&args, Some(&last)).unwrap();
        assert_eq!(inputs.chequing_path, PathBuf::from("/old/c.csv"));
        assert_eq!(inputs.chequing_initial.value(), Decimal::from(99));
        assert_eq!(inputs.saving_initial.value(), Decimal::from(20));
    }

    #[test]
    fn test_resolve_missing_value() {
        let args = InputArgs::new(Some(PathBuf::from("c.csv")), None, None, None, false);
        let err = resolve_inputs(&args, None).unwrap_err();
        assert!(err.to_string().contains("--saving"));
    }

    #[tokio::test]
    async fn test_load_history_and_remember() {
        let env = TestEnv::new().await;
        let mut config = env.config();
        let args = env.input_args(true);
        let history = load_history(&mut config, &args).await.unwrap();
        assert_eq!(history.chequing().daily().len(), 3);

        // Nothing given on the second run, everything comes from the config file.
        let mut reloaded = Config::load(config.root()).await.unwrap();
        let again = load_history(&mut reloaded, &InputArgs::default())
            .await
            .unwrap();
        assert_eq!(again, history);
    }

    #[tokio::test]
    async fn test_load_history_empty_export() {
        let env = TestEnv::new().await;
        let mut config = env.config();
        let empty = env.write_csv("empty.csv", "\n").await;
        let args = InputArgs::new(
            env.input_args(false).chequing().map(Path::to_path_buf),
            Some(empty),
            Some(amount("1")),
            Some(amount("1")),
            false,
        );
        let err = load_history(&mut config, &args).await.unwrap_err();
        assert!(err.to_string().contains("saving"));
        assert!(config.last_entry().is_none());
    }
}
