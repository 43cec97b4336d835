use std::time::Duration;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the gh-app-token CLI application.
///
/// Every variant ends the run: the message is printed to standard error and the
/// process exits with status 1.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid command-line arguments were provided.
    ///
    /// Returned when a required flag (or its environment variable) is missing or a
    /// value is out of range.
    #[error("{0}")]
    InvalidArguments(String),

    /// The installation target or the API host could not be turned into a valid
    /// configuration.
    #[error("{0}")]
    Config(#[source] installation_client::Error),

    /// Issuing the installation token failed.
    ///
    /// Wraps key loading, signing, lookup and exchange failures.
    #[error("failed to get token: {0}")]
    Token(#[from] installation_client::Error),

    /// GitHub did not answer before the deadline.
    #[error("timed out after {}s waiting for GitHub", .0.as_secs())]
    TimedOut(Duration),
}
