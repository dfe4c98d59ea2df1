//! Single-shot entrypoint: run one query from automation inputs and emit the
//! result for the runner.

use clap::Args;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, instrument};

use crate::github::{DateQualifier, GitHubClient};
use crate::query::{self, QueryError};
use crate::report::{self, QueryResult, ReportError};

const DEFAULT_COUNT: u32 = 5;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("repo input is required, GITHUB_REPOSITORY not set?")]
    MissingRepo,

    #[error("start_date and end_date are required for operation 2")]
    MissingDates,

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

#[derive(Debug, Error)]
#[error("Unknown operation '{0}'. Use 1, 2, or 3")]
pub struct UnknownOperation(String);

/// Which query a run performs, selected by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RecentPullRequests,
    PullRequestsByDate,
    Contributors,
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Operation::RecentPullRequests),
            "2" => Ok(Operation::PullRequestsByDate),
            "3" => Ok(Operation::Contributors),
            other => Err(UnknownOperation(other.to_string())),
        }
    }
}

/// Inputs for one run. Every flag can also come from the environment
/// variables an automation runner exports.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// 1 = most recent pull requests, 2 = pull requests by date, 3 = contributors
    #[arg(long, env = "INPUT_OPERATION", default_value = "1", value_parser = parse_operation)]
    pub operation: Operation,

    /// Repository as owner/name or https://github.com/owner/name
    #[arg(long, env = "INPUT_REPO")]
    pub repo: Option<String>,

    /// Number of pull requests for operation 1 (at most 100 are returned)
    #[arg(long, env = "INPUT_COUNT", default_value = "5", value_parser = parse_count)]
    pub count: u32,

    /// First day of the range for operation 2 (YYYY-MM-DD)
    #[arg(long, env = "INPUT_START_DATE")]
    pub start_date: Option<String>,

    /// Last day of the range for operation 2 (YYYY-MM-DD)
    #[arg(long, env = "INPUT_END_DATE")]
    pub end_date: Option<String>,

    /// File the `result=` line is appended to; stdout when unset
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,

    /// Repository the workflow runs in, used when no repo is given
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub current_repo: Option<String>,
}

/// Runners export unset inputs as empty strings.
fn parse_operation(value: &str) -> Result<Operation, UnknownOperation> {
    if value.trim().is_empty() {
        Ok(Operation::RecentPullRequests)
    } else {
        value.parse()
    }
}

fn parse_count(value: &str) -> Result<u32, std::num::ParseIntError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Ok(DEFAULT_COUNT)
    } else {
        trimmed.parse()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A fully resolved query, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    RecentPullRequests { repo: String, count: u32 },
    PullRequestsByDate { repo: String, start_date: String, end_date: String },
    Contributors { repo: String },
}

impl RunArgs {
    /// Apply the repo fallback and per-operation input requirements.
    pub fn resolve(&self) -> Result<Invocation, ActionError> {
        let repo = match non_empty(self.repo.as_deref()) {
            Some(repo) => repo.to_string(),
            None => {
                let current = non_empty(self.current_repo.as_deref()).ok_or(ActionError::MissingRepo)?;
                info!(repo = %current, "using current repository");
                current.to_string()
            }
        };

        match self.operation {
            Operation::RecentPullRequests => Ok(Invocation::RecentPullRequests {
                repo,
                count: self.count,
            }),
            Operation::PullRequestsByDate => {
                match (non_empty(self.start_date.as_deref()), non_empty(self.end_date.as_deref())) {
                    (Some(start), Some(end)) => Ok(Invocation::PullRequestsByDate {
                        repo,
                        start_date: start.to_string(),
                        end_date: end.to_string(),
                    }),
                    _ => Err(ActionError::MissingDates),
                }
            }
            Operation::Contributors => Ok(Invocation::Contributors { repo }),
        }
    }
}

/// Execute a resolved query.
#[instrument(skip(client))]
pub async fn execute(
    client: &GitHubClient,
    invocation: &Invocation,
    date_qualifier: DateQualifier,
) -> Result<QueryResult, ActionError> {
    let result: QueryResult = match invocation {
        Invocation::RecentPullRequests { repo, count } => {
            info!("operation 1: getting {} most recent pull requests", count);
            query::recent_pull_requests(client, repo, *count).await?.into()
        }
        Invocation::PullRequestsByDate {
            repo,
            start_date,
            end_date,
        } => {
            info!("operation 2: getting pull requests from {} to {}", start_date, end_date);
            query::pull_requests_by_date(client, repo, start_date, end_date, date_qualifier)
                .await?
                .into()
        }
        Invocation::Contributors { repo } => {
            info!("operation 3: getting contributors");
            query::contributors(client, repo).await?.into()
        }
    };
    Ok(result)
}

/// Resolve, execute and emit one run.
pub async fn run(
    args: &RunArgs,
    client: &GitHubClient,
    date_qualifier: DateQualifier,
) -> Result<(), ActionError> {
    let invocation = args.resolve()?;
    let result = execute(client, &invocation, date_qualifier).await?;
    info!("result ready");
    report::output(&result, args.output_file.as_deref())?;
    Ok(())
}
