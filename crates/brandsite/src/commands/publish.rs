//! Publish command.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use brandsite_publish::{ArtifactStatus, Credentials, GitHubHost, PublishResult, Publisher};

use crate::{config, SiteArgs};

/// Run the publish command. Fails when the publish does.
pub async fn run(config_path: &Path, site: SiteArgs, json: bool, open_site: bool) -> Result<()> {
    let file_config = config::load(config_path)?;

    let name = file_config.client_name(&site);
    let theme = file_config.theme(&site);
    let publish_config = file_config.publish_config(Credentials::from_env());

    // An absent token is reported by the publisher before any request is made.
    let token = publish_config.credentials.token.clone().unwrap_or_default();
    let host = GitHubHost::new(&publish_config.api_url, token)
        .context("Failed to create GitHub client")?;

    let publisher = Publisher::new(publish_config, Arc::new(host));
    let result = publisher.publish(&name, &theme).await;

    if json {
        let out = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{}", out);
    } else {
        print_summary(&result);
    }

    if !result.success {
        anyhow::bail!("Publish failed: {}", result.message);
    }

    if open_site {
        if let Some(url) = &result.site_url {
            super::open_in_browser(url);
        }
    }

    Ok(())
}

fn print_summary(result: &PublishResult) {
    println!("{}", result.message);

    if let Some(url) = &result.repository_url {
        println!("  Repository: {}", url);
    }
    if let Some(url) = &result.site_url {
        println!("  Site:       {}", url);
    }

    for artifact in &result.artifacts {
        let status = match &artifact.status {
            ArtifactStatus::Created => "created".to_string(),
            ArtifactStatus::Updated => "updated".to_string(),
            ArtifactStatus::Failed(e) => format!("failed ({})", e),
        };
        println!("  {:<18} {}", artifact.name, status);
    }

    for warning in &result.warnings {
        println!("  warning: {}", warning);
    }
}
