//! Client identity and slug derivation.

use std::sync::LazyLock;

use regex::Regex;

static NON_ALNUM_OR_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("valid cleaning pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static NON_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("valid slug pattern"));

/// A client's display name and the slug derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    display_name: String,
    slug: String,
}

/// Errors from building a client identity.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Client name {0:?} has no letters or digits to build a repository name from")]
    EmptySlug(String),
}

impl ClientIdentity {
    /// Build an identity, failing when the name cleans to an empty slug.
    pub fn new(display_name: &str) -> Result<Self, IdentityError> {
        let slug = slugify(display_name);
        if slug.is_empty() {
            return Err(IdentityError::EmptySlug(display_name.to_string()));
        }

        Ok(Self {
            display_name: display_name.trim().to_string(),
            slug,
        })
    }

    /// Name as entered, trimmed.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Identifier-safe slug.
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

/// Normalize a display name into `[a-z0-9-]`.
///
/// Punctuation and non-ASCII letters are dropped, whitespace runs become a
/// single hyphen. The result may be empty.
pub fn slugify(name: &str) -> String {
    let cleaned = NON_ALNUM_OR_SPACE.replace_all(name, "");
    let lowered = cleaned.trim().to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lowered, "-");
    NON_SLUG.replace_all(&hyphenated, "").into_owned()
}
