//! The generated artifact set.

use std::fs;
use std::path::Path;

use crate::builder::BundleError;

/// Site markup. The published site depends on this file.
pub const INDEX_HTML: &str = "index.html";
/// Stylesheet referenced by the markup.
pub const STYLES_CSS: &str = "styles.css";
/// Behavior script referenced by the markup.
pub const COMPONENTS_JS: &str = "components.js";
/// Machine-readable theme manifest.
pub const THEME_CONFIG_JSON: &str = "theme-config.json";
/// Project manifest.
pub const PACKAGE_JSON: &str = "package.json";
/// Human-readable documentation. Repository initialization seeds one.
pub const README_MD: &str = "README.md";

/// How an artifact is written to the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Blind write; creates the file or replaces it.
    CreateOrOverwrite,
    /// The remote may already hold this file, so its current version token
    /// must be fetched and attached to the write.
    UpdateRequiresVersionToken,
}

/// A single named text artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name, relative to the site root
    pub name: &'static str,

    /// Text content
    pub content: String,

    pub write_mode: WriteMode,

    /// Whether a failed upload fails the whole publish
    pub load_bearing: bool,
}

impl Artifact {
    pub(crate) fn new(name: &'static str, content: String) -> Self {
        let write_mode = if name == README_MD {
            WriteMode::UpdateRequiresVersionToken
        } else {
            WriteMode::CreateOrOverwrite
        };

        Self {
            name,
            content,
            write_mode,
            load_bearing: name == INDEX_HTML,
        }
    }
}

/// The ordered set of artifacts produced for one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactBundle {
    artifacts: Vec<Artifact>,
}

impl ArtifactBundle {
    pub(crate) fn new(artifacts: Vec<Artifact>) -> Self {
        Self { artifacts }
    }

    /// Iterate in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    /// Look up an artifact by file name.
    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.name == name)
    }

    /// File names in generation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.artifacts.iter().map(|a| a.name).collect()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Write every artifact into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<usize, BundleError> {
        fs::create_dir_all(dir).map_err(|e| BundleError::WriteError(e.to_string()))?;

        for artifact in &self.artifacts {
            let path = dir.join(artifact.name);
            fs::write(&path, &artifact.content)
                .map_err(|e| BundleError::WriteError(format!("{}: {}", path.display(), e)))?;
            tracing::debug!("Wrote {}", path.display());
        }

        Ok(self.artifacts.len())
    }
}

impl<'a> IntoIterator for &'a ArtifactBundle {
    type Item = &'a Artifact;
    type IntoIter = std::slice::Iter<'a, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.iter()
    }
}
