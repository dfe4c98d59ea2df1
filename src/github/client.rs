use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use super::types::{RepoId, SearchPage};
use super::GitHubError;
use crate::config::GitHubConfig;

const GITHUB_JSON: &str = "application/vnd.github.v3+json";

/// Read-only client for the GitHub REST endpoints this tool consumes.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self, GitHubError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let api_url = Url::parse(config.api_url.trim_end_matches('/'))
            .map_err(|e| GitHubError::InvalidApiUrl(format!("{}: {e}", config.api_url)))?;
        if api_url.cannot_be_a_base() {
            return Err(GitHubError::InvalidApiUrl(config.api_url.clone()));
        }

        Ok(Self {
            http,
            api_url,
            token: config.token.clone(),
        })
    }

    /// Append `segments` to the API base path. Each segment is
    /// percent-encoded, so `/`, `?` and `#` inside one cannot leave it.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GitHubError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| GitHubError::InvalidApiUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let request = self.http.get(url).header(ACCEPT, GITHUB_JSON);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET /repos/{owner}/{name}/pulls, most recently updated first.
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn list_pull_requests(
        &self,
        repo: &RepoId,
        per_page: u8,
    ) -> Result<Vec<Value>, GitHubError> {
        let items = self
            .get(self.endpoint(&["repos", &repo.owner, &repo.name, "pulls"])?)
            .query(&[("state", "all"), ("sort", "updated"), ("direction", "desc")])
            .query(&[("per_page", per_page)])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Value>>()
            .await?;
        debug!(items = items.len(), "received pull requests");
        Ok(items)
    }

    /// GET /search/issues for one page, unwrapping the `items` envelope.
    #[instrument(skip(self))]
    pub async fn search_issues(
        &self,
        query: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<Value>, GitHubError> {
        let results = self
            .get(self.endpoint(&["search", "issues"])?)
            .query(&[("q", query), ("sort", "updated"), ("order", "desc")])
            .query(&[("per_page", u32::from(per_page)), ("page", page)])
            .send()
            .await?
            .error_for_status()?
            .json::<SearchPage>()
            .await?;
        debug!(items = results.items.len(), "received search page");
        Ok(results.items)
    }

    /// GET /repos/{owner}/{name}/contributors for one page.
    ///
    /// An empty repository answers 204 with no body; that is an empty page.
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn list_contributors(
        &self,
        repo: &RepoId,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<Value>, GitHubError> {
        let response = self
            .get(self.endpoint(&["repos", &repo.owner, &repo.name, "contributors"])?)
            .query(&[("per_page", u32::from(per_page)), ("page", page)])
            .send()
            .await?
            .error_for_status()?;

        if response.status() == StatusCode::NO_CONTENT {
            debug!("repository has no contributors");
            return Ok(Vec::new());
        }

        let items = response.json::<Vec<Value>>().await?;
        debug!(items = items.len(), "received contributors page");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, token: Option<&str>) -> GitHubClient {
        let config = GitHubConfig {
            token: token.map(str::to_string),
            api_url: server.uri(),
            ..GitHubConfig::default()
        };
        GitHubClient::new(&config).unwrap()
    }

    fn repo() -> RepoId {
        RepoId {
            owner: "owner".to_string(),
            name: "repo".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_pull_requests_sends_query_and_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/pulls"))
            .and(query_param("state", "all"))
            .and(query_param("per_page", "2"))
            .and(query_param("sort", "updated"))
            .and(query_param("direction", "desc"))
            .and(header("accept", GITHUB_JSON))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "number": 1 }])))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server, Some("secret"))
            .list_pull_requests(&repo(), 2)
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_no_token_sends_no_authorization_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/pulls"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/pulls"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let items = client_for(&server, None)
            .list_pull_requests(&repo(), 5)
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_search_issues_unwraps_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param("q", "repo:owner/repo type:pr created:2025-08-24..2025-08-25"))
            .and(query_param("order", "desc"))
            .and(query_param("page", "3"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 2,
                "incomplete_results": false,
                "items": [{ "number": 2 }, { "number": 1 }]
            })))
            .mount(&server)
            .await;

        let items = client_for(&server, None)
            .search_issues("repo:owner/repo type:pr created:2025-08-24..2025-08-25", 3, 100)
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["number"], 2);
    }

    #[tokio::test]
    async fn test_contributors_no_content_is_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/contributors"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let items = client_for(&server, None)
            .list_contributors(&repo(), 1, 100)
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_repo_segments_are_percent_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/own%3Fer/re%23po%2Fx/pulls"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let repo = RepoId {
            owner: "own?er".to_string(),
            name: "re#po/x".to_string(),
        };
        let items = client_for(&server, None)
            .list_pull_requests(&repo, 5)
            .await
            .unwrap();
        assert!(items.is_empty());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), Some("state=all&sort=updated&direction=desc&per_page=5"));
    }

    #[test]
    fn test_api_url_with_path_prefix_is_kept() {
        let config = GitHubConfig {
            api_url: "https://ghe.example.com/api/v3/".to_string(),
            ..GitHubConfig::default()
        };
        let client = GitHubClient::new(&config).unwrap();
        let url = client.endpoint(&["search", "issues"]).unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/search/issues");
    }

    #[test]
    fn test_unparseable_api_url_is_rejected() {
        let config = GitHubConfig {
            api_url: "not a url".to_string(),
            ..GitHubConfig::default()
        };
        assert!(matches!(
            GitHubClient::new(&config),
            Err(GitHubError::InvalidApiUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_error_status_is_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/contributors"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server, None)
            .list_contributors(&repo(), 1, 100)
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::Request(_)));
        let message = err.to_string();
        assert!(message.starts_with("GitHub API error: "));
        assert!(message.contains("404"));
    }
}
