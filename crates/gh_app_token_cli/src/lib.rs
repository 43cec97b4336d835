//! Library side of the `gh-app-token` command.
//!
//! [`config`] turns flags and environment variables into an [`AppConfig`], and
//! [`run`] drives the issuance workflow under a deadline and Ctrl-C cancellation.

use installation_client::{issue_installation_token, InstallationToken};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

pub mod config;
pub use config::{AppConfig, CliArgs};

pub mod errors;
pub use errors::Error;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Issues one installation token for `config`.
///
/// Ctrl-C cancels the in-flight request. The whole run is bounded by
/// `config.timeout`.
///
/// # Errors
///
/// Returns `Error::Token` for any workflow failure, including cancellation, and
/// `Error::TimedOut` when the deadline passes first.
pub async fn run(config: &AppConfig) -> Result<InstallationToken, Error> {
    let cancel = CancellationToken::new();

    let interrupt = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling");
            interrupt.cancel();
        }
    });

    let result = run_until_cancelled(config, &cancel).await;
    watcher.abort();
    result
}

/// Issues one installation token, stopping early when `cancel` fires.
///
/// # Errors
///
/// See [`run`].
#[instrument(skip(config, cancel), fields(target = %config.selector))]
pub async fn run_until_cancelled(
    config: &AppConfig,
    cancel: &CancellationToken,
) -> Result<InstallationToken, Error> {
    let request = config.token_request();

    match tokio::time::timeout(config.timeout, issue_installation_token(&request, cancel)).await
    {
        Ok(result) => {
            let token = result?;
            info!("Issued installation token");
            Ok(token)
        }
        Err(_) => {
            cancel.cancel();
            Err(Error::TimedOut(config.timeout))
        }
    }
}
