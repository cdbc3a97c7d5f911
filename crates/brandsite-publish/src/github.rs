//! GitHub REST API implementation of [`RepoHost`].

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::host::{CreatedRepository, HostError, NewRepository, PutFile, RemoteFile, RepoHost, RepoRef};

/// Default API origin.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// GitHub client authenticated with a personal access token.
pub struct GitHubHost {
    client: Client,
    api_url: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct CreateRepoBody<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
    auto_init: bool,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    html_url: String,
    #[serde(default)]
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    sha: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct PutContentBody<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

impl GitHubHost {
    /// Create a client for `api_url` using `token` as the bearer credential.
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self, HostError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let client = Client::builder()
            .user_agent(concat!("brandsite/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HostError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn contents_url(&self, repo: &RepoRef, path: &str) -> String {
        self.url(&format!("/repos/{}/{}/contents/{}", repo.owner, repo.name, path))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, HostError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| HostError::Network(e.to_string()))?;

        tracing::debug!("{} {}", response.status(), response.url());

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status, &body))
    }
}

/// Classify an unsuccessful response.
fn error_from_response(status: StatusCode, body: &str) -> HostError {
    let message = error_message(body);

    match status {
        StatusCode::NOT_FOUND => HostError::NotFound,
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => HostError::Conflict(message),
        _ => HostError::Http {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull the human-readable message out of a GitHub error body.
///
/// GitHub reports validation details in an `errors` array next to a generic
/// top-level message; both are kept.
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return if body.is_empty() {
            "Unknown error".to_string()
        } else {
            body.to_string()
        };
    };

    let message = json
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Unknown error")
        .to_string();

    let details: Vec<&str> = json
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if details.is_empty() {
        message
    } else {
        format!("{} ({})", message, details.join("; "))
    }
}

#[async_trait]
impl RepoHost for GitHubHost {
    async fn create_repository(
        &self,
        request: &NewRepository,
    ) -> Result<CreatedRepository, HostError> {
        let body = CreateRepoBody {
            name: &request.name,
            description: &request.description,
            private: request.private,
            auto_init: request.auto_init,
        };

        let response = self
            .send(self.client.post(self.url("/user/repos")).json(&body))
            .await?;

        let repo: RepoResponse = response
            .json()
            .await
            .map_err(|e| HostError::InvalidResponse(e.to_string()))?;

        Ok(CreatedRepository {
            html_url: repo.html_url,
            default_branch: repo.default_branch.unwrap_or_else(|| "main".to_string()),
        })
    }

    async fn get_file(
        &self,
        repo: &RepoRef,
        path: &str,
        branch: &str,
    ) -> Result<RemoteFile, HostError> {
        let response = self
            .send(
                self.client
                    .get(self.contents_url(repo, path))
                    .query(&[("ref", branch)]),
            )
            .await?;

        let file: ContentResponse = response
            .json()
            .await
            .map_err(|e| HostError::InvalidResponse(e.to_string()))?;

        // The API wraps base64 content at 60 columns.
        let encoded: String = file.content.split_whitespace().collect();
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| HostError::InvalidResponse(format!("bad base64 content: {}", e)))?;

        Ok(RemoteFile {
            version_token: file.sha,
            content: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    async fn put_file(&self, repo: &RepoRef, request: &PutFile) -> Result<(), HostError> {
        let body = PutContentBody {
            message: &request.message,
            content: STANDARD.encode(request.content.as_bytes()),
            branch: &request.branch,
            sha: request.version_token.as_deref(),
        };

        self.send(
            self.client
                .put(self.contents_url(repo, &request.path))
                .json(&body),
        )
        .await?;

        Ok(())
    }

    async fn enable_hosting(&self, repo: &RepoRef, branch: &str) -> Result<(), HostError> {
        let body = json!({ "source": { "branch": branch, "path": "/" } });

        self.send(
            self.client
                .post(self.url(&format!("/repos/{}/{}/pages", repo.owner, repo.name)))
                .json(&body),
        )
        .await?;

        Ok(())
    }
}
