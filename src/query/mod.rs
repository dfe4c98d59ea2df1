pub mod paginate;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, instrument};

use crate::github::format::{format_contributor, format_pull_request};
use crate::github::{parse_repo_id, DateQualifier, GitHubClient, GitHubError, RepoId};
use crate::report::{ContributorReport, PullRequestReport};
use paginate::{collect_pages, PageSource, PER_PAGE};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid format: {value}: {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },

    #[error(transparent)]
    GitHub(#[from] GitHubError),
}

/// The N most recently updated pull requests, from a single page.
///
/// At most 100 are ever returned; this does not page further.
#[instrument(skip(client))]
pub async fn recent_pull_requests(
    client: &GitHubClient,
    repo: &str,
    count: u32,
) -> Result<PullRequestReport, QueryError> {
    let repo = parse_repo_id(repo)?;
    if count == 0 {
        return Ok(PullRequestReport::new(&repo, Vec::new()));
    }

    let per_page = u8::try_from(count.min(u32::from(PER_PAGE))).unwrap_or(PER_PAGE);
    let raw = client.list_pull_requests(&repo, per_page).await?;
    let pull_requests = raw
        .iter()
        .take(count as usize)
        .map(format_pull_request)
        .collect::<Result<Vec<_>, _>>()?;

    let report = PullRequestReport::new(&repo, pull_requests);
    info!(repo = report.repository(), count = report.count(), "fetched recent pull requests");
    Ok(report)
}

/// Every pull request whose `qualifier` date falls in `start..=end`.
#[instrument(skip(client))]
pub async fn pull_requests_by_date(
    client: &GitHubClient,
    repo: &str,
    start_date: &str,
    end_date: &str,
    qualifier: DateQualifier,
) -> Result<PullRequestReport, QueryError> {
    let repo = parse_repo_id(repo)?;
    validate_date(start_date)?;
    validate_date(end_date)?;

    let source = SearchPages {
        client,
        query: search_query(&repo, qualifier, start_date, end_date),
    };
    let pull_requests = collect_pages(&source, format_pull_request).await?;

    let report = PullRequestReport::new(&repo, pull_requests)
        .with_date_range(format!("{start_date} to {end_date}"));
    info!(repo = report.repository(), count = report.count(), "fetched pull requests by date");
    Ok(report)
}

/// All contributors of a repository, in the order GitHub ranks them.
#[instrument(skip(client))]
pub async fn contributors(
    client: &GitHubClient,
    repo: &str,
) -> Result<ContributorReport, QueryError> {
    let repo = parse_repo_id(repo)?;

    let source = ContributorPages {
        client,
        repo: &repo,
    };
    let contributors = collect_pages(&source, format_contributor).await?;

    let report = ContributorReport::new(&repo, contributors);
    info!(repo = report.repository(), count = report.count(), "fetched contributors");
    Ok(report)
}

fn validate_date(value: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| QueryError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

/// Issue search query scoped to one repository's pull requests, with an
/// inclusive date range.
fn search_query(repo: &RepoId, qualifier: DateQualifier, start: &str, end: &str) -> String {
    format!("repo:{repo} type:pr {qualifier}:{start}..{end}")
}

struct SearchPages<'a> {
    client: &'a GitHubClient,
    query: String,
}

#[async_trait]
impl PageSource for SearchPages<'_> {
    async fn fetch_page(&self, page: u32, per_page: u8) -> Result<Vec<Value>, GitHubError> {
        self.client.search_issues(&self.query, page, per_page).await
    }
}

struct ContributorPages<'a> {
    client: &'a GitHubClient,
    repo: &'a RepoId,
}

#[async_trait]
impl PageSource for ContributorPages<'_> {
    async fn fetch_page(&self, page: u32, per_page: u8) -> Result<Vec<Value>, GitHubError> {
        self.client.list_contributors(self.repo, page, per_page).await
    }
}
