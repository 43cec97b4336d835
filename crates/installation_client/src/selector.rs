//! Installation target selection.
//!
//! A GitHub App installation can be addressed directly by its id, or found through
//! the organization, repository or user account it is installed on.

use std::fmt;

use crate::Error;

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;

/// Which installation to issue a token for. Exactly one target per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelector {
    /// A known installation id; no lookup is needed.
    InstallationId(i64),
    /// The installation on an organization.
    Org(String),
    /// The installation covering a repository, given as `owner/name`.
    Repo(String),
    /// The installation on a user account.
    User(String),
}

impl TargetSelector {
    /// Builds a selector from the four independent inputs a front-end collects.
    ///
    /// Empty strings and an installation id of `0` count as not given.
    ///
    /// # Errors
    ///
    /// Returns `Error::SelectorMissing` if nothing was given, and
    /// `Error::SelectorConflict` if more than one target was given.
    pub fn from_parts(
        installation_id: Option<i64>,
        org: Option<String>,
        repo: Option<String>,
        user: Option<String>,
    ) -> Result<Self, Error> {
        let installation_id = installation_id.filter(|id| *id != 0);
        let org = org.filter(|s| !s.is_empty());
        let repo = repo.filter(|s| !s.is_empty());
        let user = user.filter(|s| !s.is_empty());

        let given: Vec<&str> = [
            installation_id.map(|_| "installation-id"),
            org.as_ref().map(|_| "org"),
            repo.as_ref().map(|_| "repo"),
            user.as_ref().map(|_| "user"),
        ]
        .into_iter()
        .flatten()
        .collect();

        if given.len() > 1 {
            return Err(Error::SelectorConflict(given.join(", ")));
        }

        if let Some(id) = installation_id {
            return Ok(Self::InstallationId(id));
        }

        org.map(Self::Org)
            .or_else(|| repo.map(Self::Repo))
            .or_else(|| user.map(Self::User))
            .ok_or(Error::SelectorMissing)
    }

    /// Checks the selector's preconditions without touching the network.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyOrg` or `Error::EmptyUser` for an empty name, and the
    /// errors of [`RepoRef::parse`] for a malformed repository string.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::Org(org) if org.is_empty() => Err(Error::EmptyOrg),
            Self::User(user) if user.is_empty() => Err(Error::EmptyUser),
            Self::Repo(repo) => RepoRef::parse(repo).map(|_| ()),
            Self::InstallationId(_) | Self::Org(_) | Self::User(_) => Ok(()),
        }
    }
}

impl fmt::Display for TargetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstallationId(id) => write!(f, "installation {id}"),
            Self::Org(org) => write!(f, "organization '{org}'"),
            Self::Repo(repo) => write!(f, "repository '{repo}'"),
            Self::User(user) => write!(f, "user '{user}'"),
        }
    }
}

/// A repository reference split into its owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef<'a> {
    pub owner: &'a str,
    pub name: &'a str,
}

impl<'a> RepoRef<'a> {
    /// Splits `owner/name`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRepoFormat` unless there are exactly two segments, and
    /// `Error::EmptyRepoOwner` / `Error::EmptyRepoName` if either segment is empty.
    pub fn parse(repo: &'a str) -> Result<Self, Error> {
        let segments: Vec<&str> = repo.split('/').collect();
        let [owner, name] = segments[..] else {
            return Err(Error::InvalidRepoFormat(repo.to_string()));
        };

        if owner.is_empty() {
            return Err(Error::EmptyRepoOwner(repo.to_string()));
        }
        if name.is_empty() {
            return Err(Error::EmptyRepoName(repo.to_string()));
        }

        Ok(Self { owner, name })
    }
}
