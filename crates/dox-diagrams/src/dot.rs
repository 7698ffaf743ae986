//! [`DiagramRenderer`] backed by Kroki's Graphviz endpoint.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dox_renderer::{BoxError, DiagramRenderer};
use ureq::Agent;

use crate::cache::DiagramKey;
use crate::consts::{DEFAULT_TIMEOUT, HASH_SIDECAR_EXTENSION};
use crate::error::DotError;
use crate::kroki::{create_agent, send_diagram_request};

/// Rasterizes `.dot` files through a Kroki server.
///
/// The image for `graphs/flow.dot` is written to `{output_dir}/flow.dot.{format}`
/// and the asset base name `flow.dot` is returned. A sidecar
/// `flow.dot.{format}.sha256` holds the content hash of the last render; when it
/// matches, the request is skipped.
pub struct KrokiDotRenderer {
    agent: Agent,
    server_url: String,
    format: String,
}

impl KrokiDotRenderer {
    /// Create a renderer for `server_url` producing images in `format`.
    pub fn new(server_url: impl Into<String>, format: impl Into<String>) -> Self {
        let server_url: String = server_url.into();
        Self {
            agent: create_agent(DEFAULT_TIMEOUT),
            server_url: server_url.trim_end_matches('/').to_owned(),
            format: format.into(),
        }
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = create_agent(timeout);
        self
    }

    /// Render `source` into `output_dir`, returning the asset base name.
    ///
    /// # Errors
    ///
    /// Returns [`DotError`] if the source cannot be read, the request fails, or
    /// the image cannot be written.
    pub fn render_file(&self, source: &Path, output_dir: &Path) -> Result<String, DotError> {
        let base = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| DotError::InvalidPath(source.to_path_buf()))?;

        let text = std::fs::read_to_string(source).map_err(|e| io_error(source, e))?;
        let hash = DiagramKey {
            source: &text,
            format: &self.format,
        }
        .compute_hash();

        let image = output_dir.join(format!("{base}.{}", self.format));
        let sidecar = sidecar_path(&image);

        if image.exists() && stored_hash(&sidecar).is_some_and(|stored| stored == hash) {
            tracing::debug!(source = %source.display(), "Diagram up to date, skipping render");
            return Ok(base);
        }

        let data = send_diagram_request(&self.agent, &text, &self.server_url, &self.format)?;

        std::fs::create_dir_all(output_dir).map_err(|e| io_error(output_dir, e))?;
        std::fs::write(&image, &data).map_err(|e| io_error(&image, e))?;
        std::fs::write(&sidecar, &hash).map_err(|e| io_error(&sidecar, e))?;

        tracing::info!(
            source = %source.display(),
            image = %image.display(),
            bytes = data.len(),
            "Rendered diagram"
        );
        Ok(base)
    }
}

impl DiagramRenderer for KrokiDotRenderer {
    fn render(&mut self, source: &Path, output_dir: &Path) -> Result<String, BoxError> {
        Ok(self.render_file(source, output_dir)?)
    }
}

fn sidecar_path(image: &Path) -> PathBuf {
    let mut name = image.as_os_str().to_owned();
    name.push(".");
    name.push(HASH_SIDECAR_EXTENSION);
    PathBuf::from(name)
}

fn stored_hash(sidecar: &Path) -> Option<String> {
    std::fs::read_to_string(sidecar)
        .ok()
        .map(|content| content.trim().to_owned())
}

fn io_error(path: &Path, source: std::io::Error) -> DotError {
    DotError::Io {
        path: path.to_path_buf(),
        source,
    }
}
