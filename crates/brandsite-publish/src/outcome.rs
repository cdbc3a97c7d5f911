//! The single structured outcome of a publish attempt.

use serde::Serialize;

/// Classification of a publish problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unusable client name, or the site could not be generated
    InvalidInput,
    /// Token or account not configured
    ConfigurationMissing,
    /// Repository name already taken
    RemoteConflict,
    /// A remote call failed
    RemoteUnavailable,
    /// Published, but some non-essential files are missing
    PartialPublish,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::InvalidInput => "invalid input",
            ErrorKind::ConfigurationMissing => "configuration missing",
            ErrorKind::RemoteConflict => "remote conflict",
            ErrorKind::RemoteUnavailable => "remote unavailable",
            ErrorKind::PartialPublish => "partial publish",
        };
        f.write_str(name)
    }
}

/// What happened to one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum ArtifactStatus {
    Created,
    /// Replaced a file the remote already held
    Updated,
    Failed(String),
}

/// Per-artifact upload result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactOutcome {
    pub name: &'static str,
    #[serde(flatten)]
    pub status: ArtifactStatus,
}

impl ArtifactOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, ArtifactStatus::Failed(_))
    }
}

/// Outcome of one publish invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishResult {
    pub success: bool,

    /// Set on failure, and on a success with missing files
    pub kind: Option<ErrorKind>,

    /// Human-readable summary or failure cause
    pub message: String,

    pub client_name: String,

    pub repo_name: Option<String>,

    /// Present once the repository exists, even on failure
    pub repository_url: Option<String>,

    /// Present on success
    pub site_url: Option<String>,

    pub artifacts: Vec<ArtifactOutcome>,

    /// Non-fatal problems, such as hosting activation failures
    pub warnings: Vec<String>,
}

impl PublishResult {
    pub(crate) fn failed(kind: ErrorKind, message: impl Into<String>, client_name: &str) -> Self {
        Self {
            success: false,
            kind: Some(kind),
            message: message.into(),
            client_name: client_name.to_string(),
            repo_name: None,
            repository_url: None,
            site_url: None,
            artifacts: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Names of artifacts that failed to upload.
    pub fn failed_artifacts(&self) -> Vec<&'static str> {
        self.artifacts
            .iter()
            .filter(|a| a.is_failed())
            .map(|a| a.name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_artifact_status_inline() {
        let outcome = ArtifactOutcome {
            name: "index.html",
            status: ArtifactStatus::Failed("HTTP 500: boom".to_string()),
        };

        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["name"], "index.html");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "HTTP 500: boom");
    }

    #[test]
    fn lists_failed_artifacts() {
        let mut result = PublishResult::failed(ErrorKind::RemoteUnavailable, "x", "Acme");
        result.artifacts = vec![
            ArtifactOutcome {
                name: "index.html",
                status: ArtifactStatus::Created,
            },
            ArtifactOutcome {
                name: "styles.css",
                status: ArtifactStatus::Failed("boom".to_string()),
            },
        ];

        assert_eq!(result.failed_artifacts(), vec!["styles.css"]);
    }
}
