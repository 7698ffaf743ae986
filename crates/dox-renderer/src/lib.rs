//! HTML rendering of documentation comment trees.
//!
//! [`HtmlDocRenderer`] walks a [`DocTree`](dox_tree::DocTree) depth-first and
//! writes HTML. Syntax highlighting, diagram rasterization, link resolution and
//! heading text come from the [`Highlighter`], [`DiagramRenderer`],
//! [`LinkResolver`] and [`Translator`] collaborators.
//!
//! # Example
//!
//! ```
//! use dox_renderer::{FileLinkResolver, HtmlDocRenderer};
//! use dox_tree::{LinkTarget, NodeKind, TreeBuilder};
//!
//! let tree = TreeBuilder::new()
//!     .open(NodeKind::Para)
//!     .word("See")
//!     .space()
//!     .leaf(NodeKind::LinkedWord {
//!         word: "Foo".into(),
//!         target: LinkTarget::file("classFoo"),
//!     })
//!     .close()
//!     .finish()
//!     .unwrap();
//!
//! let mut renderer = HtmlDocRenderer::new().with_resolver(FileLinkResolver::new(".html"));
//! let html = renderer.render(&tree).unwrap();
//! assert_eq!(html, r#"See <a class="el" href="classFoo.html">Foo</a>"#);
//! ```

mod delegate;
mod error;
mod escape;
mod highlight;
mod renderer;
mod resolver;
mod state;
mod translator;

pub use delegate::{
    DiagramRenderer, Highlighter, Label, LinkResolver, Locator, MissingDiagramRenderer, Translator,
};
pub use error::{BoxError, RenderError};
pub use escape::{escape_html, render_symbol};
pub use highlight::PlainHighlighter;
pub use renderer::{HtmlDocRenderer, HtmlOptions};
pub use resolver::FileLinkResolver;
pub use translator::EnglishTranslator;
