// GitHub REST client - repository search and single-repo lookup
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// API location and version are compile-time constants, never read from config.
pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("GitHub returned {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("GitHub API error: {0}")]
    ApiMessage(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Repository as it comes back from the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub owner: GitHubOwner,
    pub html_url: String,
    pub clone_url: String,
    pub ssh_url: String,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub watchers_count: u32,
    pub open_issues_count: u32,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub license: Option<GitHubLicense>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Null for repositories nobody has pushed to yet
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
    pub avatar_url: String,
    #[serde(rename = "type")]
    pub owner_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubLicense {
    pub key: String,
    pub name: String,
}

/// Search envelope. Error bodies share the shape and only carry `message`.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    items: Vec<GitHubRepo>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// One page of search results
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub total_count: u64,
    pub items: Vec<GitHubRepo>,
}

pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
}

impl GitHubClient {
    /// `user_agent` is required by GitHub; we send `<app>/<version>`.
    pub fn new(user_agent: &str, token: Option<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, token })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Search repositories - exactly one GET, no retries
    pub async fn search_repositories(
        &self,
        query: &str,
        sort: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchPage> {
        let url = search_url(query, sort, page, per_page);
        debug!("GET {}", url);

        let response = self.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        parse_search_response(status, &body)
    }

    /// Fetch a single repository by owner and name
    pub async fn get_repository(&self, owner: &str, name: &str) -> Result<GitHubRepo> {
        let url = format!(
            "{}/repos/{}/{}",
            GITHUB_API_BASE,
            urlencoding::encode(owner),
            urlencoding::encode(name)
        );
        debug!("GET {}", url);

        let response = self.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(GitHubError::NotFound(format!("{}/{}", owner, name)));
        }
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Build the search URL. The query is percent-encoded here and nowhere else.
pub fn search_url(query: &str, sort: &str, page: u32, per_page: u32) -> String {
    format!(
        "{}/search/repositories?q={}&sort={}&order=desc&page={}&per_page={}",
        GITHUB_API_BASE,
        urlencoding::encode(query),
        sort,
        page,
        per_page
    )
}

/// Turn a status + body into a page or an error
pub fn parse_search_response(status: StatusCode, body: &str) -> Result<SearchPage> {
    if !status.is_success() {
        return Err(status_error(status, body));
    }

    let envelope: SearchEnvelope = serde_json::from_str(body)?;
    if let Some(message) = envelope.message {
        warn!("Search succeeded at HTTP level but reported: {}", message);
        return Err(GitHubError::ApiMessage(message));
    }

    Ok(SearchPage {
        total_count: envelope.total_count,
        items: envelope.items,
    })
}

fn status_error(status: StatusCode, body: &str) -> GitHubError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    // GitHub signals primary rate limits with 403, secondary ones with 429
    let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN && message.to_lowercase().contains("rate limit"));
    if rate_limited {
        return GitHubError::RateLimitExceeded(message);
    }

    GitHubError::RequestFailed {
        status: status.as_u16(),
        message,
    }
}
