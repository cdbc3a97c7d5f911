//! Artifact bundle builder.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use brandsite_theme::{ClientIdentity, Theme};

use crate::assets::AssetPipeline;
use crate::bundle::{
    Artifact, ArtifactBundle, COMPONENTS_JS, INDEX_HTML, PACKAGE_JSON, README_MD, STYLES_CSS,
    THEME_CONFIG_JSON,
};
use crate::templates::{Context, TemplateEngine};

/// Configuration for building a bundle.
#[derive(Debug, Clone, Default)]
pub struct BundleConfig {
    /// Minify the stylesheet
    pub minify: bool,
}

/// Where the generated site will live once published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLinks {
    /// Repository web URL
    pub repository_url: String,

    /// Public site URL
    pub site_url: String,
}

impl SiteLinks {
    /// Derive both URLs from the account, the slug and the provider hosts.
    ///
    /// `web_url` is the provider's web origin (e.g. `https://github.com`),
    /// `pages_domain` the static hosting domain (e.g. `github.io`).
    pub fn derive(web_url: &str, pages_domain: &str, account: &str, slug: &str) -> Self {
        Self {
            repository_url: format!("{}/{}/{}", web_url.trim_end_matches('/'), account, slug),
            site_url: format!("https://{}.{}/{}", account.to_lowercase(), pages_domain, slug),
        }
    }
}

/// Errors that can occur while building or writing a bundle.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to serialize manifest: {0}")]
    SerializeError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Machine-readable theme manifest (`theme-config.json`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeManifest<'a> {
    client: &'a str,
    slug: &'a str,
    theme: &'a Theme,
    generated_at: String,
    site_url: &'a str,
    repository_url: &'a str,
}

/// Project manifest (`package.json`).
#[derive(Debug, Serialize)]
struct PackageManifest<'a> {
    name: &'a str,
    version: &'static str,
    private: bool,
    description: String,
    homepage: &'a str,
    repository: Repository,
    scripts: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Serialize)]
struct Repository {
    #[serde(rename = "type")]
    kind: &'static str,
    url: String,
}

/// Runtime theme object embedded in the behavior script.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RuntimeTheme<'a> {
    client: &'a str,
    slug: &'a str,
    colors: &'a Theme,
    site_url: &'a str,
}

/// Builds the artifact bundle for a client.
pub struct BundleBuilder {
    config: BundleConfig,
    templates: TemplateEngine,
}

impl BundleBuilder {
    /// Create a new bundle builder.
    pub fn new(config: BundleConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the bundle stamped with the current time.
    pub fn build(
        &self,
        identity: &ClientIdentity,
        theme: &Theme,
        links: &SiteLinks,
    ) -> Result<ArtifactBundle, BundleError> {
        self.build_at(identity, theme, links, Utc::now())
    }

    /// Build the bundle stamped with `generated_at`.
    ///
    /// Output depends only on the arguments.
    pub fn build_at(
        &self,
        identity: &ClientIdentity,
        theme: &Theme,
        links: &SiteLinks,
        generated_at: DateTime<Utc>,
    ) -> Result<ArtifactBundle, BundleError> {
        let swatches = theme.swatches();

        for s in swatches.iter().filter(|s| !s.valid) {
            tracing::warn!(
                "Slot {} has malformed color {:?}; embedding as-is",
                s.name,
                s.value
            );
        }

        let context = Context {
            client: identity.display_name().to_string(),
            slug: identity.slug().to_string(),
            swatches: swatches.clone(),
            site_url: links.site_url.clone(),
            repository_url: links.repository_url.clone(),
            generated_on: generated_at.format("%Y-%m-%d").to_string(),
        };

        let html = self
            .templates
            .render(INDEX_HTML, &context)
            .map_err(|e| BundleError::TemplateError(e.to_string()))?;

        let css = AssetPipeline::generate_css(&swatches);
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Skipping minification: {}", e);
                css
            })
        } else {
            css
        };

        let runtime = serde_json::to_string(&RuntimeTheme {
            client: identity.display_name(),
            slug: identity.slug(),
            colors: theme,
            site_url: &links.site_url,
        })
        .map_err(|e| BundleError::SerializeError(e.to_string()))?;
        let js = AssetPipeline::generate_js(&runtime);

        let manifest = to_json(&ThemeManifest {
            client: identity.display_name(),
            slug: identity.slug(),
            theme,
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            site_url: &links.site_url,
            repository_url: &links.repository_url,
        })?;

        let package = to_json(&PackageManifest {
            name: identity.slug(),
            version: "1.0.0",
            private: true,
            description: format!("Design system for {}", identity.display_name()),
            homepage: &links.site_url,
            repository: Repository {
                kind: "git",
                url: format!("{}.git", links.repository_url),
            },
            scripts: BTreeMap::from([("start", "npx serve .")]),
        })?;

        let readme = self
            .templates
            .render(README_MD, &context)
            .map_err(|e| BundleError::TemplateError(e.to_string()))?;

        Ok(ArtifactBundle::new(vec![
            Artifact::new(INDEX_HTML, html),
            Artifact::new(STYLES_CSS, css),
            Artifact::new(COMPONENTS_JS, js),
            Artifact::new(THEME_CONFIG_JSON, manifest),
            Artifact::new(PACKAGE_JSON, package),
            Artifact::new(README_MD, readme),
        ]))
    }
}

impl Default for BundleBuilder {
    fn default() -> Self {
        Self::new(BundleConfig::default())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, BundleError> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| BundleError::SerializeError(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::WriteMode;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn acme() -> (ClientIdentity, Theme, SiteLinks) {
        let identity = ClientIdentity::new("Acme Corp").unwrap();
        let links = SiteLinks::derive("https://github.com", "github.io", "octocat", identity.slug());
        (identity, Theme::default(), links)
    }

    fn frozen() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn produces_fixed_artifact_set() {
        let (identity, theme, links) = acme();

        let bundle = BundleBuilder::default()
            .build_at(&identity, &theme, &links, frozen())
            .unwrap();

        assert_eq!(
            bundle.names(),
            vec![
                "index.html",
                "styles.css",
                "components.js",
                "theme-config.json",
                "package.json",
                "README.md",
            ]
        );
    }

    #[test]
    fn marks_write_modes_and_load_bearing_artifact() {
        let (identity, theme, links) = acme();

        let bundle = BundleBuilder::default()
            .build_at(&identity, &theme, &links, frozen())
            .unwrap();

        for artifact in &bundle {
            let expected = if artifact.name == README_MD {
                WriteMode::UpdateRequiresVersionToken
            } else {
                WriteMode::CreateOrOverwrite
            };
            assert_eq!(artifact.write_mode, expected, "{}", artifact.name);
            assert_eq!(artifact.load_bearing, artifact.name == INDEX_HTML);
        }
    }

    #[test]
    fn acme_scenario() {
        let (identity, theme, links) = acme();
        assert_eq!(identity.slug(), "acme-corp");

        let bundle = BundleBuilder::default()
            .build_at(&identity, &theme, &links, frozen())
            .unwrap();

        let html = &bundle.get(INDEX_HTML).unwrap().content;
        assert!(html.matches("#3b82f6").count() >= 2);

        let manifest: serde_json::Value =
            serde_json::from_str(&bundle.get(THEME_CONFIG_JSON).unwrap().content).unwrap();
        assert_eq!(manifest["client"], "Acme Corp");
        assert_eq!(manifest["theme"]["accent"], "#3b82f6");
        assert_eq!(manifest["generatedAt"], "2026-03-14T09:26:53Z");
        assert_eq!(manifest["siteUrl"], "https://octocat.github.io/acme-corp");
    }

    #[test]
    fn is_deterministic_with_frozen_clock() {
        let (identity, theme, links) = acme();
        let builder = BundleBuilder::default();

        let first = builder.build_at(&identity, &theme, &links, frozen()).unwrap();
        let second = builder.build_at(&identity, &theme, &links, frozen()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn package_manifest_uses_slug() {
        let (identity, theme, links) = acme();

        let bundle = BundleBuilder::default()
            .build_at(&identity, &theme, &links, frozen())
            .unwrap();

        let package: serde_json::Value =
            serde_json::from_str(&bundle.get(PACKAGE_JSON).unwrap().content).unwrap();
        assert_eq!(package["name"], "acme-corp");
        assert_eq!(package["description"], "Design system for Acme Corp");
        assert_eq!(
            package["repository"]["url"],
            "https://github.com/octocat/acme-corp.git"
        );
    }

    #[test]
    fn script_exposes_runtime_theme() {
        let (identity, theme, links) = acme();

        let bundle = BundleBuilder::default()
            .build_at(&identity, &theme, &links, frozen())
            .unwrap();

        let js = &bundle.get(COMPONENTS_JS).unwrap().content;
        assert!(js.contains(r#""client":"Acme Corp""#));
        assert!(js.contains(r##""accent":"#3b82f6""##));
        assert!(js.contains("window.BrandTheme = Object.freeze(theme);"));
    }

    #[test]
    fn generates_everything_for_invalid_theme() {
        let (identity, mut theme, links) = acme();
        theme.primary = "nope".to_string();
        theme.muted = "#12".to_string();

        let bundle = BundleBuilder::default()
            .build_at(&identity, &theme, &links, frozen())
            .unwrap();

        assert_eq!(bundle.len(), 6);
        assert!(bundle.get(STYLES_CSS).unwrap().content.contains("--primary: nope;"));
        assert!(bundle.get(STYLES_CSS).unwrap().content.contains("--primary-hsl: unknown;"));
        assert!(bundle.get(INDEX_HTML).unwrap().content.contains("#12"));
        assert!(bundle.get(README_MD).unwrap().content.contains("`unknown`"));
    }

    #[test]
    fn minified_stylesheet_keeps_variables() {
        let (identity, theme, links) = acme();

        let bundle = BundleBuilder::new(BundleConfig { minify: true })
            .build_at(&identity, &theme, &links, frozen())
            .unwrap();

        let css = &bundle.get(STYLES_CSS).unwrap().content;
        assert!(!css.contains('\n'));
        assert!(css.contains("--primary-foreground"));
    }

    #[test]
    fn writes_bundle_to_directory() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let (identity, theme, links) = acme();

        let bundle = BundleBuilder::default()
            .build_at(&identity, &theme, &links, frozen())
            .unwrap();
        let written = bundle.write_to(&out).unwrap();

        assert_eq!(written, 6);
        for name in bundle.names() {
            assert!(out.join(name).exists(), "{name} missing");
        }
        let readme = fs::read_to_string(out.join(README_MD)).unwrap();
        assert!(readme.contains("Acme Corp"));
    }

    #[test]
    fn derives_links_from_account() {
        let links = SiteLinks::derive("https://github.com/", "github.io", "OctoCat", "acme-corp");

        assert_eq!(links.repository_url, "https://github.com/OctoCat/acme-corp");
        assert_eq!(links.site_url, "https://octocat.github.io/acme-corp");
    }
}
