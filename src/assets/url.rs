use std::collections::HashMap;

use crate::assets::blob::Blob;

/// Session-local reference to a [`Blob`], the stand-in for a browser object URL.
///
/// Valid only while the issuing [`ObjectUrlRegistry`] holds it. The owner must call
/// [`ObjectUrlRegistry::revoke`] when the URL is superseded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// The URL text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry of live object URLs.
///
/// Ownership is single-owner: whoever called [`create`](Self::create) revokes. There is no
/// reference counting, so revoking a URL another holder still uses is a caller bug.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    live: HashMap<ObjectUrl, Blob>,
}

impl ObjectUrlRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `blob` and return a fresh `blob:cardkit/<uuid>` URL for it.
    pub fn create(&mut self, blob: Blob) -> ObjectUrl {
        let url = ObjectUrl(format!("blob:cardkit/{}", uuid::Uuid::new_v4()));
        tracing::debug!(url = %url, mime = blob.mime(), len = blob.len(), "object url created");
        self.live.insert(url.clone(), blob);
        url
    }

    /// Look up the blob behind a live URL.
    pub fn resolve(&self, url: &ObjectUrl) -> Option<&Blob> {
        self.live.get(url)
    }

    /// Release `url`. Returns `false` if it was not live.
    pub fn revoke(&mut self, url: &ObjectUrl) -> bool {
        let removed = self.live.remove(url).is_some();
        if removed {
            tracing::debug!(url = %url, "object url revoked");
        }
        removed
    }

    /// Release every live URL.
    pub fn revoke_all(&mut self) -> usize {
        let n = self.live.len();
        self.live.clear();
        n
    }

    /// Number of URLs not yet revoked.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/url.rs"]
mod tests;
