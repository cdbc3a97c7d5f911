//! Publisher configuration.

use std::time::Duration;

use crate::github::DEFAULT_API_URL;

/// Environment variable holding the access token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
/// Environment variable holding the account name.
pub const ACCOUNT_ENV: &str = "GITHUB_USERNAME";

/// Credentials for the hosting account.
///
/// Either value may be absent; the publisher refuses to start without both.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub account: Option<String>,
}

impl Credentials {
    /// Read both values from the process environment, ignoring blank ones.
    pub fn from_env() -> Self {
        Self {
            token: non_blank(std::env::var(TOKEN_ENV).ok()),
            account: non_blank(std::env::var(ACCOUNT_ENV).ok()),
        }
    }

    /// Names of the missing values.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.token.is_none() {
            missing.push(TOKEN_ENV);
        }
        if self.account.is_none() {
            missing.push(ACCOUNT_ENV);
        }
        missing
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("account", &self.account)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// How to wait for a new repository to accept writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleStrategy {
    /// Sleep unconditionally.
    Fixed(Duration),

    /// Probe the auto-initialized README until it appears, at most
    /// `attempts` times, sleeping `interval` between probes.
    PollUntilReady { interval: Duration, attempts: u32 },
}

impl Default for SettleStrategy {
    fn default() -> Self {
        Self::Fixed(Duration::from_secs(5))
    }
}

/// Configuration for the publish pipeline.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub credentials: Credentials,

    /// API origin, used by the CLI to build the GitHub client
    pub api_url: String,

    /// Web origin used to derive repository URLs
    pub web_url: String,

    /// Static hosting domain used to derive site URLs
    pub pages_domain: String,

    /// Create private repositories
    pub private: bool,

    pub settle: SettleStrategy,

    /// Commit message for the site markup
    pub commit_message: String,

    /// Minify the generated stylesheet
    pub minify: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            api_url: DEFAULT_API_URL.to_string(),
            web_url: "https://github.com".to_string(),
            pages_domain: "github.io".to_string(),
            private: false,
            settle: SettleStrategy::default(),
            commit_message: "Add design system page".to_string(),
            minify: false,
        }
    }
}
