//! Publish pipeline: provision a repository and upload the generated site.
//!
//! A publish runs through a fixed sequence of stages:
//!
//! `Validating → RepoCreating → RepoSettling → ArtifactsUploading →
//! HostingActivating → Done | Failed`
//!
//! Only the upload stage runs work concurrently. No remote call is retried.

use std::fmt;
use std::sync::Arc;

use futures::future::join_all;

use brandsite_static::{
    Artifact, ArtifactBundle, BundleBuilder, BundleConfig, SiteLinks, WriteMode, INDEX_HTML,
    README_MD,
};
use brandsite_theme::{ClientIdentity, Theme};

use crate::config::{PublishConfig, SettleStrategy};
use crate::host::{HostError, NewRepository, PutFile, RepoHost, RepoRef};
use crate::outcome::{ArtifactOutcome, ArtifactStatus, ErrorKind, PublishResult};

/// Pipeline stage, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    RepoCreating,
    RepoSettling,
    ArtifactsUploading,
    HostingActivating,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::RepoCreating => "repo-creating",
            Stage::RepoSettling => "repo-settling",
            Stage::ArtifactsUploading => "artifacts-uploading",
            Stage::HostingActivating => "hosting-activating",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Publishes generated design system sites.
pub struct Publisher {
    config: PublishConfig,
    host: Arc<dyn RepoHost>,
    builder: BundleBuilder,
}

impl Publisher {
    /// Create a publisher that talks to `host`.
    pub fn new(config: PublishConfig, host: Arc<dyn RepoHost>) -> Self {
        let builder = BundleBuilder::new(BundleConfig {
            minify: config.minify,
        });

        Self {
            config,
            host,
            builder,
        }
    }

    /// Publish a site for `display_name` themed with `theme`.
    ///
    /// Always produces exactly one result; failures are reported in it
    /// rather than returned as errors.
    pub async fn publish(&self, display_name: &str, theme: &Theme) -> PublishResult {
        enter(Stage::Validating);

        let identity = match ClientIdentity::new(display_name) {
            Ok(identity) => identity,
            Err(e) => {
                return fail(PublishResult::failed(
                    ErrorKind::InvalidInput,
                    e.to_string(),
                    display_name,
                ))
            }
        };

        let (Some(_), Some(account)) = (
            self.config.credentials.token.as_deref(),
            self.config.credentials.account.as_deref(),
        ) else {
            return fail(PublishResult::failed(
                ErrorKind::ConfigurationMissing,
                format!(
                    "Missing configuration: {}",
                    self.config.credentials.missing().join(", ")
                ),
                identity.display_name(),
            ));
        };

        let links = SiteLinks::derive(
            &self.config.web_url,
            &self.config.pages_domain,
            account,
            identity.slug(),
        );

        let bundle = match self.builder.build(&identity, theme, &links) {
            Ok(bundle) => bundle,
            Err(e) => {
                return fail(PublishResult::failed(
                    ErrorKind::InvalidInput,
                    format!("Failed to generate site: {}", e),
                    identity.display_name(),
                ))
            }
        };

        enter(Stage::RepoCreating);
        let request = NewRepository {
            name: identity.slug().to_string(),
            description: format!("Design system for {}", identity.display_name()),
            private: self.config.private,
            auto_init: true,
        };

        let created = match self.host.create_repository(&request).await {
            Ok(created) => created,
            Err(e) => {
                tracing::error!("Failed to create repository {}: {}", request.name, e);
                let kind = match e {
                    HostError::Conflict(_) => ErrorKind::RemoteConflict,
                    _ => ErrorKind::RemoteUnavailable,
                };
                let mut result = PublishResult::failed(
                    kind,
                    format!("Failed to create repository: {}", e),
                    identity.display_name(),
                );
                result.repo_name = Some(request.name);
                return fail(result);
            }
        };
        tracing::info!("Created repository {}", created.html_url);

        let repo = RepoRef::new(account, identity.slug());
        let branch = created.default_branch.clone();

        enter(Stage::RepoSettling);
        self.settle(&repo, &branch).await;

        enter(Stage::ArtifactsUploading);
        let artifacts = self.upload_all(&repo, &branch, &bundle).await;

        let mut result = PublishResult {
            success: false,
            kind: None,
            message: String::new(),
            client_name: identity.display_name().to_string(),
            repo_name: Some(identity.slug().to_string()),
            repository_url: Some(created.html_url),
            site_url: None,
            artifacts,
            warnings: Vec::new(),
        };

        let load_bearing_failure = result.artifacts.iter().find_map(|outcome| {
            match (&outcome.status, bundle.get(outcome.name)) {
                (ArtifactStatus::Failed(e), Some(artifact)) if artifact.load_bearing => {
                    Some(format!("{}: {}", outcome.name, e))
                }
                _ => None,
            }
        });

        // The repository and any uploaded files stay in place.
        if let Some(cause) = load_bearing_failure {
            tracing::error!("Load-bearing artifact failed, publish reported as failed");
            result.kind = Some(ErrorKind::RemoteUnavailable);
            result.message = format!("Repository created, but failed to upload {}", cause);
            return fail(result);
        }

        enter(Stage::HostingActivating);
        if let Err(e) = self.host.enable_hosting(&repo, &branch).await {
            tracing::warn!("Hosting activation for {} failed (it may already be active): {}", repo, e);
            result
                .warnings
                .push(format!("Hosting activation failed: {}", e));
        }

        let failed = result.failed_artifacts();
        result.success = true;
        result.site_url = Some(links.site_url);
        result.message = "Deploy complete! The site will be available in 2-3 minutes.".to_string();
        if !failed.is_empty() {
            tracing::warn!("Published without: {}", failed.join(", "));
            result.kind = Some(ErrorKind::PartialPublish);
            result.message = format!(
                "{} Some files failed to upload: {}",
                result.message,
                failed.join(", ")
            );
        }

        enter(Stage::Done);
        result
    }

    /// Wait until the freshly created repository accepts writes.
    async fn settle(&self, repo: &RepoRef, branch: &str) {
        match self.config.settle {
            SettleStrategy::Fixed(delay) => {
                tracing::info!("Waiting {:?} for repository initialization", delay);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            SettleStrategy::PollUntilReady { interval, attempts } => {
                for attempt in 1..=attempts {
                    match self.host.get_file(repo, README_MD, branch).await {
                        Ok(_) => {
                            tracing::info!("Repository ready after {} probe(s)", attempt);
                            return;
                        }
                        Err(HostError::NotFound) => {
                            tracing::debug!("Repository not ready (probe {}/{})", attempt, attempts);
                        }
                        Err(e) => {
                            tracing::warn!("Readiness probe {}/{} failed: {}", attempt, attempts, e);
                        }
                    }
                    if attempt < attempts {
                        tokio::time::sleep(interval).await;
                    }
                }
                tracing::warn!("Repository still not ready after {} probes; continuing", attempts);
            }
        }
    }

    /// Upload every artifact concurrently. One failure never stops the others.
    async fn upload_all(
        &self,
        repo: &RepoRef,
        branch: &str,
        bundle: &ArtifactBundle,
    ) -> Vec<ArtifactOutcome> {
        let uploads = bundle
            .iter()
            .map(|artifact| self.upload(repo, branch, artifact));

        join_all(uploads).await
    }

    async fn upload(&self, repo: &RepoRef, branch: &str, artifact: &Artifact) -> ArtifactOutcome {
        let version_token = match artifact.write_mode {
            WriteMode::CreateOrOverwrite => None,
            WriteMode::UpdateRequiresVersionToken => {
                match self.host.get_file(repo, artifact.name, branch).await {
                    Ok(existing) => Some(existing.version_token),
                    Err(HostError::NotFound) => None,
                    Err(e) => {
                        tracing::warn!("Failed to look up {} before update: {}", artifact.name, e);
                        return ArtifactOutcome {
                            name: artifact.name,
                            status: ArtifactStatus::Failed(e.to_string()),
                        };
                    }
                }
            }
        };

        let updating = version_token.is_some();
        let request = PutFile {
            path: artifact.name.to_string(),
            content: artifact.content.clone(),
            message: self.commit_message(artifact.name, updating),
            branch: branch.to_string(),
            version_token,
        };

        let status = match self.host.put_file(repo, &request).await {
            Ok(()) if updating => ArtifactStatus::Updated,
            Ok(()) => ArtifactStatus::Created,
            Err(e) => {
                tracing::warn!("Failed to upload {}: {}", artifact.name, e);
                ArtifactStatus::Failed(e.to_string())
            }
        };

        if !matches!(status, ArtifactStatus::Failed(_)) {
            tracing::info!("Uploaded {} ({} bytes)", artifact.name, artifact.content.len());
        }

        ArtifactOutcome {
            name: artifact.name,
            status,
        }
    }

    fn commit_message(&self, name: &str, updating: bool) -> String {
        if name == INDEX_HTML {
            self.config.commit_message.clone()
        } else if updating {
            format!("Update {}", name)
        } else {
            format!("Add {}", name)
        }
    }
}

fn enter(stage: Stage) {
    tracing::info!(stage = %stage, "Publish stage");
}

fn fail(result: PublishResult) -> PublishResult {
    tracing::error!(stage = %Stage::Failed, kind = ?result.kind, "{}", result.message);
    result
}
