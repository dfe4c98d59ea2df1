use serde::Deserialize;
use serde_json::Value;

use super::types::{ContributorSummary, PullRequestSummary, RawContributor, RawPullRequest};
use super::GitHubError;

/// Project a raw pull request record onto the reduced output shape.
///
/// Missing required fields are a `MalformedRecord` error; nothing is
/// defaulted.
pub fn format_pull_request(raw: &Value) -> Result<PullRequestSummary, GitHubError> {
    let pr = RawPullRequest::deserialize(raw).map_err(|e| GitHubError::MalformedRecord {
        kind: "pull request",
        reason: e.to_string(),
    })?;

    Ok(PullRequestSummary {
        number: pr.number,
        title: pr.title,
        state: pr.state,
        author: pr.user.login,
        created_at: pr.created_at,
        updated_at: pr.updated_at,
        url: pr.html_url,
    })
}

/// Project a raw contributor record onto the reduced output shape.
pub fn format_contributor(raw: &Value) -> Result<ContributorSummary, GitHubError> {
    let contributor = RawContributor::deserialize(raw).map_err(|e| GitHubError::MalformedRecord {
        kind: "contributor",
        reason: e.to_string(),
    })?;

    Ok(ContributorSummary {
        login: contributor.login,
        contributions: contributor.contributions,
        url: contributor.html_url,
        avatar_url: contributor.avatar_url,
    })
}
