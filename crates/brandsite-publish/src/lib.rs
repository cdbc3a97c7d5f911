//! Publishes a generated design system site to a repository host.
//!
//! The pipeline creates a repository named after the client, uploads the
//! artifact bundle and turns on static hosting. Every invocation yields one
//! [`PublishResult`].

pub mod config;
pub mod github;
pub mod host;
pub mod outcome;
pub mod publisher;

pub use config::{Credentials, PublishConfig, SettleStrategy, ACCOUNT_ENV, TOKEN_ENV};
pub use github::{GitHubHost, DEFAULT_API_URL};
pub use host::{CreatedRepository, HostError, NewRepository, PutFile, RemoteFile, RepoHost, RepoRef};
pub use outcome::{ArtifactOutcome, ArtifactStatus, ErrorKind, PublishResult};
pub use publisher::{Publisher, Stage};
