//! Diagram cache key computation.
//!
//! Provides [`DiagramKey`] for computing the content hash stored in the sidecar
//! next to each rendered image.

use sha2::{Digest, Sha256};

use crate::consts::GRAPHVIZ_ENDPOINT;

/// Parameters that affect a rendered diagram.
#[derive(Debug)]
pub struct DiagramKey<'a> {
    /// Diagram source text.
    pub source: &'a str,
    /// Output format ("png", "svg", ...).
    pub format: &'a str,
}

impl DiagramKey<'_> {
    /// Compute a content hash for this diagram key.
    ///
    /// # Hash Format
    ///
    /// SHA-256 of `"graphviz:{format}:{source}"`, hex encoded.
    #[must_use]
    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(GRAPHVIZ_ENDPOINT.as_bytes());
        hasher.update(b":");
        hasher.update(self.format.as_bytes());
        hasher.update(b":");
        hasher.update(self.source.as_bytes());
        hex::encode(hasher.finalize())
    }
}
