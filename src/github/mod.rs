pub mod client;
pub mod format;
pub mod repo;
pub mod types;

pub use client::GitHubClient;
pub use repo::parse_repo_id;
pub use types::{ContributorSummary, DateQualifier, PullRequestSummary, RepoId};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("Invalid repo format: {0}")]
    InvalidRepo(String),

    #[error("Invalid GitHub API URL: {0}")]
    InvalidApiUrl(String),

    #[error("GitHub API error: {}", error_chain(.0))]
    Request(#[from] reqwest::Error),

    #[error("Malformed {kind} record: {reason}")]
    MalformedRecord { kind: &'static str, reason: String },
}

/// reqwest's Display stops at the outermost layer ("error sending request"),
/// so fold the source chain in to keep the underlying cause visible.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
