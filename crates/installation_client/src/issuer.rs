//! The resolve-then-exchange workflow.
//!
//! An explicit installation id goes straight to the exchange (one POST). An org, repo
//! or user selector is first resolved with one lookup (one GET), then exchanged.
//!
//! Every step runs at most once. A failure at any step ends the workflow with a typed
//! error; there is no partial result and nothing is retried.

use std::path::PathBuf;

use app_jwt::AppPrivateKey;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use url::Url;

use crate::{Error, GitHubAppClient, InstallationApi, InstallationToken, RepoRef, TargetSelector};

#[cfg(test)]
#[path = "issuer_tests.rs"]
mod tests;

/// Everything needed for one token-issuance run.
#[derive(Debug, Clone)]
pub struct TokenRequest {
    /// The GitHub App id, used as the JWT issuer.
    pub app_id: i64,
    /// Path to the App's PEM-encoded RSA private key.
    pub private_key_path: PathBuf,
    /// The installation to issue a token for.
    pub selector: TargetSelector,
    /// REST API base URL, see [`crate::api_base_url`].
    pub api_base: Url,
}

/// Determines the installation id for `selector`.
///
/// An explicit installation id is returned without any request. Otherwise the
/// selector is validated and exactly one lookup request is made.
///
/// # Errors
///
/// Returns the validation errors of [`TargetSelector::validate`] before any request
/// is sent, and `Error::Lookup` if GitHub cannot find the installation.
#[instrument(skip(api, selector), fields(target = %selector))]
pub async fn resolve_installation_id<A>(api: &A, selector: &TargetSelector) -> Result<i64, Error>
where
    A: InstallationApi + ?Sized,
{
    selector.validate()?;

    let result = match selector {
        TargetSelector::InstallationId(id) => return Ok(*id),
        TargetSelector::Org(org) => api.find_org_installation(org).await,
        TargetSelector::Repo(repo) => {
            let repo = RepoRef::parse(repo)?;
            api.find_repo_installation(repo.owner, repo.name).await
        }
        TargetSelector::User(user) => api.find_user_installation(user).await,
    };

    let installation_id = result.map_err(|source| Error::Lookup {
        target: selector.to_string(),
        source,
    })?;

    info!(installation_id = installation_id, "Resolved installation");
    Ok(installation_id)
}

/// Exchanges an installation id for an installation access token.
///
/// # Errors
///
/// Returns `Error::Exchange` if the request fails, and `Error::EmptyToken` if GitHub
/// answers with an empty token.
#[instrument(skip(api))]
pub async fn exchange_for_token<A>(
    api: &A,
    installation_id: i64,
) -> Result<InstallationToken, Error>
where
    A: InstallationApi + ?Sized,
{
    let token = api
        .create_installation_token(installation_id)
        .await
        .map_err(|source| Error::Exchange {
            installation_id,
            source,
        })?;

    if token.is_empty() {
        warn!(installation_id = installation_id, "GitHub returned an empty token");
        return Err(Error::EmptyToken(installation_id));
    }

    Ok(token)
}

/// Resolves the installation for `selector` and exchanges it for a token.
///
/// # Errors
///
/// Returns any error of [`resolve_installation_id`] or [`exchange_for_token`].
pub async fn issue_token<A>(api: &A, selector: &TargetSelector) -> Result<InstallationToken, Error>
where
    A: InstallationApi + ?Sized,
{
    let installation_id = resolve_installation_id(api, selector).await?;
    exchange_for_token(api, installation_id).await
}

/// Runs the whole workflow for `request`: load the key, sign a JWT, resolve the
/// installation and exchange it for a token.
///
/// The selector is validated before the key is read. The network part stops as soon
/// as `cancel` fires; the in-flight request is dropped.
///
/// # Errors
///
/// Returns selector validation errors, `Error::Jwt` for key or signing failures,
/// `Error::ClientBuild`, `Error::Lookup`, `Error::Exchange`, `Error::EmptyToken`,
/// or `Error::Cancelled`.
#[instrument(skip(request, cancel), fields(app_id = request.app_id, target = %request.selector))]
pub async fn issue_installation_token(
    request: &TokenRequest,
    cancel: &CancellationToken,
) -> Result<InstallationToken, Error> {
    request.selector.validate()?;

    let key = AppPrivateKey::load(&request.private_key_path)?;
    let jwt = app_jwt::sign(request.app_id, &key)?;
    let client = GitHubAppClient::with_jwt(&jwt, request.api_base.clone())?;

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!("Token issuance cancelled");
            Err(Error::Cancelled)
        }
        result = issue_token(&client, &request.selector) => result,
    }
}
