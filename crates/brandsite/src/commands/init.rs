//! Write a starter brandsite.toml.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'brandsite generate' to build the site locally.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r##"# brandsite configuration

[client]
# Display name; the repository is named after its slug
name = "Cliente Exemplo"

[theme]
primary = "#1a1a1a"
secondary = "#6b7280"
accent = "#3b82f6"
muted = "#f3f4f6"

[github]
# Overridden by GITHUB_USERNAME. The token is read from GITHUB_TOKEN.
# account = "octocat"
api_url = "https://api.github.com"
web_url = "https://github.com"
pages_domain = "github.io"
private = false

[publish]
# Seconds to wait for a new repository before uploading
settle_secs = 5
# Probe the repository until it is ready instead of waiting
poll = false
poll_attempts = 10
commit_message = "Add design system page"
minify = false
"##;
