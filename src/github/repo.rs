use super::types::RepoId;
use super::GitHubError;

const GITHUB_WEB_PREFIX: &str = "https://github.com/";

/// Parse a repository identifier into its owner and name.
///
/// Accepts `owner/name` or `https://github.com/owner/name`, with or without
/// trailing slashes. Anything that does not split into exactly two non-empty
/// segments is `GitHubError::InvalidRepo`, as is a segment GitHub would never
/// issue: `.`, `..`, or one holding characters other than ASCII letters,
/// digits, `-`, `_` and `.`.
pub fn parse_repo_id(input: &str) -> Result<RepoId, GitHubError> {
    let trimmed = input.trim();
    let path = trimmed
        .strip_prefix(GITHUB_WEB_PREFIX)
        .unwrap_or(trimmed)
        .trim_end_matches('/');

    let mut segments = path.split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(owner), Some(name), None) if is_valid_segment(owner) && is_valid_segment(name) => {
            Ok(RepoId {
                owner: owner.to_string(),
                name: name.to_string(),
            })
        }
        _ => Err(GitHubError::InvalidRepo(input.to_string())),
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
