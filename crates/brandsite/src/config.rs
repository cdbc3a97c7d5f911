//! brandsite.toml loading.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use brandsite_publish::{Credentials, PublishConfig, SettleStrategy, DEFAULT_API_URL};
use brandsite_theme::{Slot, Theme};

use crate::SiteArgs;

/// Configuration file structure (brandsite.toml).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub client: ClientConfig,
    pub theme: Theme,
    pub github: GitHubConfig,
    pub publish: PublishSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: "Cliente Exemplo".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Used when GITHUB_USERNAME is not set
    pub account: Option<String>,
    pub api_url: String,
    pub web_url: String,
    pub pages_domain: String,
    pub private: bool,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        let defaults = PublishConfig::default();
        Self {
            account: None,
            api_url: DEFAULT_API_URL.to_string(),
            web_url: defaults.web_url,
            pages_domain: defaults.pages_domain,
            private: defaults.private,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PublishSettings {
    pub settle_secs: u64,
    /// Probe the new repository instead of sleeping
    pub poll: bool,
    pub poll_attempts: u32,
    pub commit_message: String,
    pub minify: bool,
}

impl Default for PublishSettings {
    fn default() -> Self {
        let defaults = PublishConfig::default();
        Self {
            settle_secs: 5,
            poll: false,
            poll_attempts: 10,
            commit_message: defaults.commit_message,
            minify: defaults.minify,
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::debug!("No {} found, using defaults", path.display());
    Ok(ConfigFile::default())
}

impl ConfigFile {
    /// Client name, preferring the command line.
    pub fn client_name(&self, site: &SiteArgs) -> String {
        site.name.clone().unwrap_or_else(|| self.client.name.clone())
    }

    /// Theme with command line overrides applied.
    pub fn theme(&self, site: &SiteArgs) -> Theme {
        let mut theme = self.theme.clone();
        let overrides = [
            (Slot::Primary, &site.primary),
            (Slot::Secondary, &site.secondary),
            (Slot::Accent, &site.accent),
            (Slot::Muted, &site.muted),
        ];
        for (slot, value) in overrides {
            if let Some(value) = value {
                theme.set(slot, value.clone());
            }
        }
        theme
    }

    /// Publisher configuration. Environment credentials take precedence
    /// over the configured account.
    pub fn publish_config(&self, env: Credentials) -> PublishConfig {
        let credentials = Credentials {
            token: env.token,
            account: env.account.or_else(|| {
                self.github
                    .account
                    .as_ref()
                    .map(|a| a.trim().to_string())
                    .filter(|a| !a.is_empty())
            }),
        };

        let settle = if self.publish.poll {
            SettleStrategy::PollUntilReady {
                interval: Duration::from_secs(1),
                attempts: self.publish.poll_attempts.max(1),
            }
        } else {
            SettleStrategy::Fixed(Duration::from_secs(self.publish.settle_secs))
        };

        PublishConfig {
            credentials,
            api_url: self.github.api_url.clone(),
            web_url: self.github.web_url.clone(),
            pages_domain: self.github.pages_domain.clone(),
            private: self.github.private,
            settle,
            commit_message: self.publish.commit_message.clone(),
            minify: self.publish.minify,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r##"
[client]
name = "Acme Corp"

[theme]
accent = "#ff0000"

[github]
account = "octocat"
private = true

[publish]
poll = true
poll_attempts = 3
"##;

    #[test]
    fn parses_partial_config_with_defaults() {
        let config: ConfigFile = toml::from_str(SAMPLE).unwrap();

        assert_eq!(config.client.name, "Acme Corp");
        assert_eq!(config.theme.accent, "#ff0000");
        assert_eq!(config.theme.primary, Theme::default().primary);
        assert_eq!(config.github.api_url, DEFAULT_API_URL);
        assert_eq!(config.github.pages_domain, "github.io");
        assert_eq!(config.publish.commit_message, "Add design system page");
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = load(&dir.path().join("brandsite.toml")).unwrap();

        assert_eq!(config.client.name, "Cliente Exemplo");
        assert_eq!(config.theme, Theme::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brandsite.toml");
        fs::write(&path, "[client\nname = ").unwrap();

        assert!(load(&path).is_err());
    }

    #[test]
    fn command_line_overrides_config() {
        let config: ConfigFile = toml::from_str(SAMPLE).unwrap();
        let site = SiteArgs {
            name: Some("Globex".to_string()),
            primary: Some("#000000".to_string()),
            ..Default::default()
        };

        let theme = config.theme(&site);

        assert_eq!(config.client_name(&site), "Globex");
        assert_eq!(theme.primary, "#000000");
        assert_eq!(theme.accent, "#ff0000");
    }

    #[test]
    fn environment_account_wins_over_file() {
        let config: ConfigFile = toml::from_str(SAMPLE).unwrap();

        let from_file = config.publish_config(Credentials {
            token: Some("t".to_string()),
            account: None,
        });
        let from_env = config.publish_config(Credentials {
            token: Some("t".to_string()),
            account: Some("hubot".to_string()),
        });

        assert_eq!(from_file.credentials.account.as_deref(), Some("octocat"));
        assert_eq!(from_env.credentials.account.as_deref(), Some("hubot"));
        assert!(from_env.private);
        assert_eq!(
            from_env.settle,
            SettleStrategy::PollUntilReady {
                interval: Duration::from_secs(1),
                attempts: 3,
            }
        );
    }
}
