//! Error types for installation lookup and token exchange.
//!
//! Every variant names the step that failed. Caller-input problems are detected before
//! any request is sent; remote failures wrap an [`ApiFailure`] describing what GitHub
//! (or the transport) reported. Nothing here is retried.

use http::StatusCode;
use tracing::error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while turning a target selector into an installation token.
///
/// ## Examples
///
/// ```rust,ignore
/// use installation_client::Error;
///
/// match issue_installation_token(&request, &cancel).await {
///     Ok(token) => println!("{}", token.expose_secret()),
///     Err(Error::Lookup { target, .. }) => eprintln!("App is not installed on {target}"),
///     Err(err) => eprintln!("{err}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// None of installation id, org, repo or user was given.
    #[error("no installation ID, org, repo, or user provided")]
    SelectorMissing,

    /// More than one installation target was given. Lists the conflicting kinds.
    #[error("{0} cannot be used together")]
    SelectorConflict(String),

    /// The organization name is empty.
    #[error("org name is required")]
    EmptyOrg,

    /// The user name is empty.
    #[error("user name is required")]
    EmptyUser,

    /// The repository string does not split into exactly `owner/name`.
    #[error("repo must be in format 'owner/repo', got '{0}'")]
    InvalidRepoFormat(String),

    /// The owner part of `owner/name` is empty.
    #[error("repository owner is required in '{0}'")]
    EmptyRepoOwner(String),

    /// The name part of `owner/name` is empty.
    #[error("repository name is required in '{0}'")]
    EmptyRepoName(String),

    /// The API host override cannot be turned into a base URL.
    #[error("invalid API host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    /// Loading the App key or signing the JWT failed.
    #[error(transparent)]
    Jwt(#[from] app_jwt::Error),

    /// The octocrab client could not be built.
    #[error("Failed to create GitHub client: {0}")]
    ClientBuild(#[source] octocrab::Error),

    /// Looking up the installation for an org, repo or user failed.
    #[error("Failed to find {target} installation: {source}")]
    Lookup {
        target: String,
        #[source]
        source: ApiFailure,
    },

    /// Creating the installation access token failed.
    #[error("Failed to create installation token for installation {installation_id}: {source}")]
    Exchange {
        installation_id: i64,
        #[source]
        source: ApiFailure,
    },

    /// GitHub answered the token request successfully but the token was empty.
    #[error("GitHub returned an empty token for installation {0}")]
    EmptyToken(i64),

    /// The workflow was cancelled while a request was in flight.
    #[error("Operation cancelled")]
    Cancelled,
}

/// What went wrong with a single GitHub API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiFailure {
    /// GitHub answered with a non-success status.
    #[error("GitHub returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// The request could not be sent, or the response could not be read or decoded.
    #[error(transparent)]
    Transport(octocrab::Error),
}

impl ApiFailure {
    /// Builds an `ApiFailure` from an octocrab error, logging the details.
    pub(crate) fn from_octocrab(message: &str, e: octocrab::Error) -> Self {
        match e {
            octocrab::Error::GitHub { source, .. } => {
                error!(
                    status = source.status_code.as_u16(),
                    error_message = %source.message,
                    documentation_url = ?source.documentation_url,
                    "{}. Received an error from GitHub",
                    message
                );
                Self::Status {
                    status: source.status_code,
                    message: source.message.clone(),
                }
            }
            _ => {
                error!(error_message = e.to_string(), "{}", message);
                Self::Transport(e)
            }
        }
    }
}
