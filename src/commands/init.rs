use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the balances home directory and an initial `config.json` in it.
///
/// # Errors
/// - Returns an error if the config file already exists or any file operations fail.
pub async fn init(balances_home: &Path) -> Result<Out<()>> {
    let config = Config::create(balances_home)
        .await
        .context("Unable to create the home directory and config")?;
    Ok(format!(
        "Successfully created the balances directory at {}",
        config.root().display()
    )
    .into())
}
