//! Trait definitions for the repository hosting provider.

use async_trait::async_trait;

/// Owner and name of a remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Request to create a repository under the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepository {
    pub name: String,
    pub description: String,
    pub private: bool,
    /// Seed an initial commit so the default branch exists
    pub auto_init: bool,
}

/// A freshly created repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRepository {
    /// Web URL of the repository
    pub html_url: String,
    /// Branch writes should target
    pub default_branch: String,
}

/// An existing remote file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Opaque revision identifier required for conditional updates
    pub version_token: String,
    /// Decoded text content
    pub content: String,
}

/// Request to write a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutFile {
    pub path: String,
    pub content: String,
    pub message: String,
    pub branch: String,
    /// Present when updating an existing file
    pub version_token: Option<String>,
}

/// Errors returned by a hosting provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Narrow contract over a repository hosting provider's content API.
///
/// Every call is a potentially slow network round trip.
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Create a repository owned by the authenticated account.
    async fn create_repository(&self, request: &NewRepository)
        -> Result<CreatedRepository, HostError>;

    /// Fetch a file, or `HostError::NotFound`.
    async fn get_file(&self, repo: &RepoRef, path: &str, branch: &str)
        -> Result<RemoteFile, HostError>;

    /// Create or update a file.
    async fn put_file(&self, repo: &RepoRef, request: &PutFile) -> Result<(), HostError>;

    /// Turn on static hosting for a branch.
    async fn enable_hosting(&self, repo: &RepoRef, branch: &str) -> Result<(), HostError>;
}
