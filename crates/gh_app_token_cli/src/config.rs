//! Command-line and environment configuration for the gh-app-token tool.
//!
//! Every flag can also be supplied through an environment variable. A flag given on
//! the command line wins over the environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use installation_client::{api_base_url, TargetSelector, TokenRequest};
use tracing::debug;
use url::Url;

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Environment variable holding the tracing filter directive, e.g. `debug`.
pub const LOG_ENV_VAR: &str = "GH_APP_TOKEN_LOG";

/// Default deadline for the whole run, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// gh-app-token: Generate GitHub App installation tokens
#[derive(Parser, Debug, Clone)]
#[command(name = "gh-app-token", version)]
#[command(
    about = "GitHub App Authentication Tool",
    long_about = "A tool to generate GitHub App installation tokens using JWT authentication.\n\
                  The token is printed to standard output."
)]
pub struct CliArgs {
    /// GitHub App ID
    #[arg(long, env = "GH_APP_TOKEN_APP_ID")]
    pub app_id: Option<i64>,

    /// Path to the GitHub App private key file (PEM)
    #[arg(long, env = "GH_APP_TOKEN_PRIVATE_KEY", value_name = "PATH")]
    pub private_key: Option<PathBuf>,

    /// GitHub App installation ID
    #[arg(long, env = "GH_APP_TOKEN_INSTALLATION_ID")]
    pub installation_id: Option<i64>,

    /// GitHub organization name
    #[arg(long, env = "GH_APP_TOKEN_ORG")]
    pub org: Option<String>,

    /// GitHub repository (owner/repo)
    #[arg(long, env = "GH_APP_TOKEN_REPO", value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    /// GitHub user name
    #[arg(long, env = "GH_APP_TOKEN_USER")]
    pub user: Option<String>,

    /// GitHub Enterprise Server host name or API URL
    #[arg(long, env = "GH_HOST")]
    pub host: Option<String>,

    /// Seconds to wait for GitHub before giving up
    #[arg(long, env = "GH_APP_TOKEN_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_id: i64,
    pub private_key_path: PathBuf,
    pub selector: TargetSelector,
    pub api_base: Url,
    pub timeout: Duration,
}

impl AppConfig {
    /// Checks the parsed arguments and turns them into a run configuration.
    ///
    /// Only the presence and exclusivity of values is checked here. The target
    /// values themselves are validated by the issuance workflow before any request
    /// is sent.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidArguments` if the app id or private key path is missing, or
    ///   the timeout is zero.
    /// * `Error::Config` if no target, or more than one target, was given, or the
    ///   host cannot be turned into an API URL.
    pub fn from_args(args: CliArgs) -> Result<Self, Error> {
        let app_id = args.app_id.filter(|id| *id != 0).ok_or_else(|| {
            Error::InvalidArguments(
                "app ID is required (--app-id or GH_APP_TOKEN_APP_ID)".to_string(),
            )
        })?;

        let private_key_path = args
            .private_key
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or_else(|| {
                Error::InvalidArguments(
                    "private key path is required (--private-key or GH_APP_TOKEN_PRIVATE_KEY)"
                        .to_string(),
                )
            })?;

        let selector =
            TargetSelector::from_parts(args.installation_id, args.org, args.repo, args.user)
                .map_err(Error::Config)?;

        let api_base = api_base_url(args.host.as_deref()).map_err(Error::Config)?;

        if args.timeout == 0 {
            return Err(Error::InvalidArguments(
                "timeout must be at least 1 second (--timeout or GH_APP_TOKEN_TIMEOUT)"
                    .to_string(),
            ));
        }

        debug!(
            app_id = app_id,
            target = %selector,
            api_base = %api_base,
            "Loaded configuration"
        );

        Ok(Self {
            app_id,
            private_key_path,
            selector,
            api_base,
            timeout: Duration::from_secs(args.timeout),
        })
    }

    /// The issuance request described by this configuration.
    pub fn token_request(&self) -> TokenRequest {
        TokenRequest {
            app_id: self.app_id,
            private_key_path: self.private_key_path.clone(),
            selector: self.selector.clone(),
            api_base: self.api_base.clone(),
        }
    }
}
