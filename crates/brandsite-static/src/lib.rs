//! Static site generator for brand design systems.
//!
//! Turns a client identity and a four-slot theme into a fixed set of text
//! artifacts: markup, stylesheet, behavior script, manifests and README.

pub mod assets;
pub mod builder;
pub mod bundle;
pub mod templates;

pub use builder::{BundleBuilder, BundleConfig, BundleError, SiteLinks};
pub use bundle::{
    Artifact, ArtifactBundle, WriteMode, COMPONENTS_JS, INDEX_HTML, PACKAGE_JSON, README_MD,
    STYLES_CSS, THEME_CONFIG_JSON,
};
