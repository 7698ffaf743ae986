//! Documentation comment tree for dox.
//!
//! The comment parser produces one [`DocTree`] per documentation block. The tree
//! is built once, rendered once, and dropped; renderers only ever see it through
//! shared [`Node`] views.
//!
//! # Example
//!
//! ```
//! use dox_tree::{NodeKind, SimpleSectKind, TreeBuilder};
//!
//! let tree = TreeBuilder::new()
//!     .open(NodeKind::SimpleSect(SimpleSectKind::Note))
//!     .open(NodeKind::Para)
//!     .word("Handle")
//!     .space()
//!     .word("with")
//!     .space()
//!     .word("care.")
//!     .close()
//!     .close()
//!     .finish()
//!     .unwrap();
//!
//! let note = tree.root_node().children().next().unwrap();
//! assert_eq!(note.kind(), &NodeKind::SimpleSect(SimpleSectKind::Note));
//! ```

mod kind;
mod tree;

pub use kind::{
    ImageKind, IncOperatorKind, IncludeKind, LinkTarget, NodeKind, ParamSectKind, SimpleSectKind,
    Style, SymbolKind, VerbatimKind,
};
pub use tree::{DocTree, Node, NodeId, TreeBuilder, TreeError};
