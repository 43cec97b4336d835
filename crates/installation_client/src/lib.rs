//! Crate for turning a GitHub App JWT into an installation access token.
//!
//! The App first proves its identity with a signed JWT (see the `app_jwt` crate).
//! This crate then resolves which installation of the App to use, either from an
//! explicit installation id or by asking GitHub for the installation on an
//! organization, repository or user, and finally exchanges that installation id
//! for a short-lived installation access token.
//!
//! The remote calls sit behind the [`InstallationApi`] trait. [`GitHubAppClient`] is
//! the production implementation, built on octocrab.

use app_jwt::SignedJwt;
use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::{Octocrab, Result as OctocrabResult};
use tracing::{debug, info, instrument};
use url::Url;

pub mod errors;
pub use errors::{ApiFailure, Error};

pub mod host;
pub use host::{api_base_url, GITHUB_API_URL};

pub mod installation;
pub use installation::{AccessTokenResponse, InstallationResponse, InstallationToken};

pub mod issuer;
pub use issuer::{
    exchange_for_token, issue_installation_token, issue_token, resolve_installation_id,
    TokenRequest,
};

pub mod selector;
pub use selector::{RepoRef, TargetSelector};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// The GitHub REST calls needed to issue an installation token.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait InstallationApi: Send + Sync {
    /// Finds the App's installation on an organization.
    ///
    /// `GET /orgs/{org}/installation`
    async fn find_org_installation(&self, org: &str) -> Result<i64, ApiFailure>;

    /// Finds the App's installation covering a repository.
    ///
    /// `GET /repos/{owner}/{repo}/installation`
    async fn find_repo_installation(&self, owner: &str, repo: &str) -> Result<i64, ApiFailure>;

    /// Finds the App's installation on a user account.
    ///
    /// `GET /users/{user}/installation`
    async fn find_user_installation(&self, user: &str) -> Result<i64, ApiFailure>;

    /// Creates an access token for an installation.
    ///
    /// `POST /app/installations/{installation_id}/access_tokens`
    async fn create_installation_token(
        &self,
        installation_id: i64,
    ) -> Result<InstallationToken, ApiFailure>;
}

/// A client for the GitHub API, authenticated as a GitHub App through its JWT.
#[derive(Debug)]
pub struct GitHubAppClient {
    client: Octocrab,
    api_base: Url,
}

impl GitHubAppClient {
    /// Wraps an existing octocrab client. Endpoints are resolved against `api_base`,
    /// which must end with `/`.
    pub fn new(client: Octocrab, api_base: Url) -> Self {
        Self { client, api_base }
    }

    /// Creates a client that sends `jwt` as its bearer token to the API at `api_base`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ClientBuild` if octocrab rejects the base URL or cannot build
    /// its HTTP stack.
    #[instrument(skip(jwt, api_base), fields(api_base = %api_base))]
    pub fn with_jwt(jwt: &SignedJwt, api_base: Url) -> Result<Self, Error> {
        // Routes are absolute URLs under `api_base`; octocrab only needs the origin.
        let client = Octocrab::builder()
            .base_uri(api_base.origin().ascii_serialization())
            .map_err(Error::ClientBuild)?
            .add_retry_config(RetryConfig::None)
            .personal_token(jwt.expose_secret().to_string())
            .build()
            .map_err(Error::ClientBuild)?;

        debug!("Created GitHub client authenticated with App JWT");

        Ok(Self::new(client, api_base))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    async fn find_installation(&self, path: String) -> Result<i64, ApiFailure> {
        let route = self.endpoint(&path);
        debug!(route = %route, "Looking up installation");

        let response: OctocrabResult<InstallationResponse> =
            self.client.get(route, None::<&()>).await;

        match response {
            Ok(installation) => {
                info!(
                    installation_id = installation.id,
                    "Found installation for GitHub App"
                );
                Ok(installation.id)
            }
            Err(e) => Err(ApiFailure::from_octocrab("Failed to find installation", e)),
        }
    }
}

#[async_trait]
impl InstallationApi for GitHubAppClient {
    #[instrument(skip(self))]
    async fn find_org_installation(&self, org: &str) -> Result<i64, ApiFailure> {
        self.find_installation(format!("orgs/{org}/installation")).await
    }

    #[instrument(skip(self))]
    async fn find_repo_installation(&self, owner: &str, repo: &str) -> Result<i64, ApiFailure> {
        self.find_installation(format!("repos/{owner}/{repo}/installation")).await
    }

    #[instrument(skip(self))]
    async fn find_user_installation(&self, user: &str) -> Result<i64, ApiFailure> {
        self.find_installation(format!("users/{user}/installation")).await
    }

    #[instrument(skip(self))]
    async fn create_installation_token(
        &self,
        installation_id: i64,
    ) -> Result<InstallationToken, ApiFailure> {
        let route = self.endpoint(&format!("app/installations/{installation_id}/access_tokens"));

        info!(
            installation_id = installation_id,
            "Requesting installation token from GitHub API"
        );
        let response: OctocrabResult<AccessTokenResponse> =
            self.client.post(route, None::<&()>).await;

        match response {
            Ok(body) => {
                info!(
                    installation_id = installation_id,
                    "Successfully retrieved installation token"
                );
                Ok(InstallationToken::new(body.token))
            }
            Err(e) => Err(ApiFailure::from_octocrab(
                "Failed to get installation token",
                e,
            )),
        }
    }
}
