use serde::{Deserialize, Serialize};
use std::fmt;

/// Owner/name pair naming a repository on GitHub.
/// Extracted by parse_repo_id() in github/mod.rs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Pull request as returned by the pulls and search endpoints.
/// Only the fields the formatter reads are declared; the rest are ignored.
#[derive(Debug, Deserialize)]
pub struct RawPullRequest {
    pub number: u64,
    pub title: String,
    /// Kept as text so states GitHub adds later pass through unchanged
    pub state: String,
    pub user: RawUser,
    pub created_at: String,
    pub updated_at: String,
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
pub struct RawUser {
    pub login: String,
}

/// Contributor as returned by the contributors endpoint.
#[derive(Debug, Deserialize)]
pub struct RawContributor {
    pub login: String,
    pub contributions: u64,
    pub html_url: String,
    pub avatar_url: String,
}

/// One page of the issue search endpoint. Matches live under `items`.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

/// Reduced pull request shape returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestSummary {
    pub number: u64,
    pub title: String,
    pub state: String,
    /// Author's GitHub login
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
    /// Web URL of the pull request
    pub url: String,
}

/// Reduced contributor shape returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributorSummary {
    pub login: String,
    pub contributions: u64,
    /// Profile web URL
    pub url: String,
    pub avatar_url: String,
}

/// Which timestamp the date-range search filters on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateQualifier {
    #[default]
    Created,
    Updated,
    Merged,
    Closed,
}

impl fmt::Display for DateQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateQualifier::Created => write!(f, "created"),
            DateQualifier::Updated => write!(f, "updated"),
            DateQualifier::Merged => write!(f, "merged"),
            DateQualifier::Closed => write!(f, "closed"),
        }
    }
}
