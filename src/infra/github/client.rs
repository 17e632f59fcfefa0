//! GitHub REST client built on reqwest.

use reqwest::{Method, RequestBuilder, Response, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::auth::Credentials;
use super::error::{GitHubError, Result};
use crate::infra::git::RepoId;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("git-issues/", env!("CARGO_PKG_VERSION"));

/// Error body returned by the GitHub REST API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

/// Client for one GitHub API endpoint, authenticated with basic auth.
///
/// Requests are sent one at a time and never retried.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    credentials: Credentials,
}

impl GitHubClient {
    pub fn new(api_url: &str, credentials: Credentials) -> Result<Self> {
        let api_url = api_url.trim_end_matches('/');
        if !(api_url.starts_with("https://") || api_url.starts_with("http://")) {
            return Err(GitHubError::InvalidApiUrl(api_url.to_string()));
        }
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            api_url: api_url.to_string(),
            credentials,
        })
    }

    /// `{api_url}/repos/{owner}/{repo}/{path}`.
    pub(super) fn repo_url(&self, repo: &RepoId, path: &str) -> String {
        format!("{}/repos/{}/{}/{path}", self.api_url, repo.owner, repo.name)
    }

    pub(super) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(header::ACCEPT, ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
            .basic_auth(&self.credentials.username, Some(&self.credentials.secret))
    }

    /// Send a request and map any non-2xx response to [`GitHubError::Api`].
    pub(super) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.build()?;
        debug!(method = %request.method(), url = %request.url(), "GitHub API request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        debug!(status = status.as_u16(), "GitHub API response");
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let (message, details) = match serde_json::from_str::<ApiErrorBody>(&text) {
            Ok(body) => (body.message, body.errors),
            Err(_) => (
                status.canonical_reason().unwrap_or("Unknown error").to_string(),
                Vec::new(),
            ),
        };
        Err(GitHubError::Api {
            status: status.as_u16(),
            message,
            details,
        })
    }

    pub(super) async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        Ok(self.send(request).await?.json().await?)
    }
}
