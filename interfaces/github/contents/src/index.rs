use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = "ldm-feed";

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub html_url: Option<String>,
    pub download_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GitHubContentsClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubContentsClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// `GET /repos/{owner}/{repo}/contents/{path}`
    ///
    /// Any non-2xx answer is an error, including 404 for a directory that
    /// does not exist yet.
    pub async fn fetch_directory_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<ContentEntry>, FetchDirectoryContentsError> {
        let url = format!(
            "{}/repos/{owner}/{repo}/contents/{}",
            self.base_url,
            path.trim_matches('/')
        );

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", USER_AGENT);

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|source| FetchDirectoryContentsError::RequestSend { source })?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|source| FetchDirectoryContentsError::ResponseRead { source })?;

        debug!(%url, %status, "Fetched directory listing");

        if !status.is_success() {
            return Err(FetchDirectoryContentsError::UnexpectedStatus { status, body });
        }

        serde_json::from_str(&body)
            .map_err(|source| FetchDirectoryContentsError::DeserializeResponseBody { source })
    }
}

#[derive(Debug, Error)]
pub enum FetchDirectoryContentsError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },

    #[error("UnexpectedStatus: {status}: {body}")]
    UnexpectedStatus {
        status: StatusCode,
        body: String,
    },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody {
        source: serde_json::Error,
    },
}
