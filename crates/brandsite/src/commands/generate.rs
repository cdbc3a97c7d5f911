//! Local site generation command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use brandsite_publish::Credentials;
use brandsite_static::{BundleBuilder, BundleConfig, SiteLinks};
use brandsite_theme::ClientIdentity;

use crate::{config, SiteArgs};

/// Run the generate command.
pub async fn run(
    config_path: &Path,
    site: SiteArgs,
    output: PathBuf,
    minify: bool,
) -> Result<()> {
    let file_config = config::load(config_path)?;

    let identity = ClientIdentity::new(&file_config.client_name(&site))?;
    let theme = file_config.theme(&site);
    let publish = file_config.publish_config(Credentials::from_env());

    // Links point where `publish` would put the site; fall back to a
    // placeholder account when none is configured.
    let account = publish
        .credentials
        .account
        .clone()
        .unwrap_or_else(|| "your-account".to_string());
    let links = SiteLinks::derive(
        &publish.web_url,
        &publish.pages_domain,
        &account,
        identity.slug(),
    );

    tracing::info!("Generating site for {}...", identity.display_name());

    let builder = BundleBuilder::new(BundleConfig {
        minify: minify || publish.minify,
    });
    let bundle = builder
        .build(&identity, &theme, &links)
        .context("Failed to generate site")?;

    let written = bundle.write_to(&output)?;

    tracing::info!("Wrote {} files to {}", written, output.display());
    tracing::info!("Run 'brandsite serve --dir {}' to preview.", output.display());

    Ok(())
}
