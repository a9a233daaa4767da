//! Asset URL resolution under a configurable deployment base path.

use serde::{Deserialize, Serialize};

/// Resolves public asset paths against the site's base path (for sub-path deployments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetResolver {
    base_path: String,
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self::new("/")
    }
}

impl AssetResolver {
    /// Creates a resolver; an empty base path is treated as `/`.
    pub fn new(base_path: impl Into<String>) -> Self {
        let mut base_path = base_path.into();
        if base_path.is_empty() {
            base_path.push('/');
        }
        Self { base_path }
    }

    /// Returns the configured base path.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Resolves a root-relative asset path.
    ///
    /// Empty paths stay empty, paths starting with `/` are re-rooted under the base path, and
    /// anything else (relative or absolute URLs) is returned unchanged.
    pub fn asset_url(&self, path: &str) -> String {
        match path.strip_prefix('/') {
            Some(rest) => format!("{}{rest}", self.base_path),
            None => path.to_string(),
        }
    }

    /// Resolves an image file name (or `images/` path) to its public `/images/...` URL.
    ///
    /// Paths starting with `/` are taken as already public.
    pub fn image_url(&self, file: &str) -> String {
        let public_path = if file.starts_with('/') {
            file.to_string()
        } else {
            format!("/images/{}", file.strip_prefix("images/").unwrap_or(file))
        };
        format!("{}{public_path}", self.base_path.trim_end_matches('/'))
    }
}
