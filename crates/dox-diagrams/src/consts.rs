//! Internal constants for diagram rendering.

use std::time::Duration;

/// Default timeout for Kroki requests.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Kroki endpoint for Graphviz `dot` sources.
pub(crate) const GRAPHVIZ_ENDPOINT: &str = "graphviz";

/// Extension of the hash sidecar written next to each image.
pub(crate) const HASH_SIDECAR_EXTENSION: &str = "sha256";
