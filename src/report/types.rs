use serde::Serialize;

use crate::github::{ContributorSummary, PullRequestSummary, RepoId};

/// Pull requests fetched for one repository.
///
/// `count` is derived from the item list at construction and cannot drift
/// from it.
#[derive(Debug, Clone, Serialize)]
pub struct PullRequestReport {
    repository: String,
    /// Echo of the requested range, only for date-range queries
    #[serde(skip_serializing_if = "Option::is_none")]
    date_range: Option<String>,
    count: usize,
    pull_requests: Vec<PullRequestSummary>,
}

impl PullRequestReport {
    pub fn new(repo: &RepoId, pull_requests: Vec<PullRequestSummary>) -> Self {
        Self {
            repository: repo.to_string(),
            date_range: None,
            count: pull_requests.len(),
            pull_requests,
        }
    }

    pub fn with_date_range(mut self, date_range: String) -> Self {
        self.date_range = Some(date_range);
        self
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    #[cfg(test)]
    pub fn date_range(&self) -> Option<&str> {
        self.date_range.as_deref()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    #[cfg(test)]
    pub fn pull_requests(&self) -> &[PullRequestSummary] {
        &self.pull_requests
    }
}

/// Contributors fetched for one repository.
#[derive(Debug, Clone, Serialize)]
pub struct ContributorReport {
    repository: String,
    count: usize,
    contributors: Vec<ContributorSummary>,
}

impl ContributorReport {
    pub fn new(repo: &RepoId, contributors: Vec<ContributorSummary>) -> Self {
        Self {
            repository: repo.to_string(),
            count: contributors.len(),
            contributors,
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn count(&self) -> usize {
        self.count
    }

    #[cfg(test)]
    pub fn contributors(&self) -> &[ContributorSummary] {
        &self.contributors
    }
}

/// Result of whichever operation the single-shot run selected.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    PullRequests(PullRequestReport),
    Contributors(ContributorReport),
}

impl From<PullRequestReport> for QueryResult {
    fn from(report: PullRequestReport) -> Self {
        QueryResult::PullRequests(report)
    }
}

impl From<ContributorReport> for QueryResult {
    fn from(report: ContributorReport) -> Self {
        QueryResult::Contributors(report)
    }
}
