//! Documentation comment rendering for dox.
//!
//! Wires a loaded [`Config`] into an [`HtmlDocRenderer`] with the default
//! collaborators: file-based link resolution with external tags, plain
//! highlighting, English headings, and Kroki diagrams when configured.
//!
//! # Example
//!
//! ```
//! use dox::{Config, DocumentRenderer};
//! use dox_tree::{NodeKind, TreeBuilder};
//!
//! let tree = TreeBuilder::new()
//!     .open(NodeKind::Para)
//!     .word("Hello")
//!     .close()
//!     .finish()
//!     .unwrap();
//!
//! let mut renderer = DocumentRenderer::from_config(&Config::default());
//! assert_eq!(renderer.render(&tree).unwrap(), "Hello");
//! ```

pub use dox_config::{Config, ConfigError};
pub use dox_renderer::RenderError;

use dox_diagrams::KrokiDotRenderer;
use dox_renderer::{
    EnglishTranslator, FileLinkResolver, HtmlDocRenderer, HtmlOptions, MissingDiagramRenderer,
    PlainHighlighter,
};
use dox_tree::DocTree;

/// Renders documentation trees as configured by `dox.toml`.
pub struct DocumentRenderer {
    inner: HtmlDocRenderer,
}

impl DocumentRenderer {
    /// Build a renderer from resolved configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let html = &config.html_resolved;

        let resolver = config.tags.iter().fold(
            FileLinkResolver::new(html.file_extension.clone()),
            |resolver, (scope, base_url)| resolver.with_tag(scope.clone(), base_url.clone()),
        );

        let options = HtmlOptions {
            output_dir: html.output_dir.clone(),
            file_extension: html.file_extension.clone(),
            dot_image_format: html.dot_image_format.clone(),
        };

        let inner = HtmlDocRenderer::new()
            .with_options(options)
            .with_resolver(resolver)
            .with_highlighter(PlainHighlighter)
            .with_translator(EnglishTranslator);

        let inner = if let Some(diagrams) = &config.diagrams_resolved {
            tracing::debug!(kroki_url = %diagrams.kroki_url, "Diagram rendering enabled");
            inner.with_diagram_renderer(
                KrokiDotRenderer::new(diagrams.kroki_url.clone(), html.dot_image_format.clone())
                    .with_timeout(diagrams.timeout()),
            )
        } else {
            inner.with_diagram_renderer(MissingDiagramRenderer)
        };

        tracing::debug!(
            output_dir = %html.output_dir.display(),
            tags = config.tags.len(),
            "Configured document renderer"
        );
        Self { inner }
    }

    /// Render one documentation tree to HTML.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the tree is malformed or a collaborator fails.
    pub fn render(&mut self, tree: &DocTree) -> Result<String, RenderError> {
        self.inner.render(tree)
    }
}
