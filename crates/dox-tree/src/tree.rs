//! Arena-backed document tree.
//!
//! Nodes live in a flat vector and refer to each other by [`NodeId`]. Children
//! are owned (listed) by their parent; the parent link is a plain index used
//! only for read-only context queries.

use crate::kind::NodeKind;

/// Index of a node inside its [`DocTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Error returned when a tree is assembled incorrectly.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    /// A child was attached to a leaf kind.
    #[error("cannot attach children to a {0} node")]
    LeafParent(&'static str),
    /// The parent id does not belong to this tree.
    #[error("unknown node id {0}")]
    UnknownNode(usize),
    /// The root was closed by the builder.
    #[error("close() called with no open compound node")]
    UnbalancedClose,
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed documentation comment.
///
/// Always has exactly one [`NodeKind::Root`] node at [`DocTree::root`]. Nodes can
/// only be appended under an existing compound parent, so the tree is acyclic
/// and child order equals insertion order.
#[derive(Debug)]
pub struct DocTree {
    nodes: Vec<NodeData>,
}

impl DocTree {
    /// Create a tree holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node as the last child of `parent`.
    pub fn push(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, TreeError> {
        let parent_data = self
            .nodes
            .get(parent.0)
            .ok_or(TreeError::UnknownNode(parent.0))?;
        if parent_data.kind.is_leaf() {
            return Err(TreeError::LeafParent(parent_data.kind.name()));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Borrow a node view.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then_some(Node { tree: self, id })
    }

    /// Borrow the root node view.
    #[must_use]
    pub fn root_node(&self) -> Node<'_> {
        Node {
            tree: self,
            id: self.root(),
        }
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

impl Default for DocTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of one node and its neighbourhood.
#[derive(Debug, Clone, Copy)]
pub struct Node<'t> {
    tree: &'t DocTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn kind(self) -> &'t NodeKind {
        &self.tree.data(self.id).kind
    }

    /// The enclosing node, `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<Node<'t>> {
        self.tree.data(self.id).parent.map(|id| Node {
            tree: self.tree,
            id,
        })
    }

    /// Children in document order.
    pub fn children(self) -> impl DoubleEndedIterator<Item = Node<'t>> + ExactSizeIterator {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| Node { tree, id })
    }

    #[must_use]
    pub fn has_children(self) -> bool {
        !self.tree.data(self.id).children.is_empty()
    }

    /// Siblings that come after this node, in document order.
    pub fn following_siblings(self) -> impl Iterator<Item = Node<'t>> {
        let tree = self.tree;
        let siblings: &'t [NodeId] = match self.tree.data(self.id).parent {
            Some(parent) => &tree.data(parent).children,
            None => &[],
        };
        let position = siblings.iter().position(|&id| id == self.id);
        let rest = position.map_or(&[][..], |pos| &siblings[pos + 1..]);
        rest.iter().map(move |&id| Node { tree, id })
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(self) -> impl Iterator<Item = Node<'t>> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Whether no later sibling is a paragraph.
    #[must_use]
    pub fn is_last_paragraph(self) -> bool {
        !self
            .following_siblings()
            .any(|sibling| matches!(sibling.kind(), NodeKind::Para))
    }

    /// Nesting depth among sections: 1 for a top-level section.
    #[must_use]
    pub fn section_depth(self) -> usize {
        1 + self
            .ancestors()
            .filter(|ancestor| matches!(ancestor.kind(), NodeKind::Section { .. }))
            .count()
    }
}

/// Incremental builder that tracks the currently open compound node.
///
/// Builder calls never fail individually; the first error is remembered and
/// reported by [`TreeBuilder::finish`].
///
/// # Example
///
/// ```
/// use dox_tree::{NodeKind, TreeBuilder};
///
/// let tree = TreeBuilder::new()
///     .open(NodeKind::Para)
///     .word("Hello")
///     .space()
///     .word("world")
///     .close()
///     .finish()
///     .unwrap();
///
/// assert_eq!(tree.root_node().children().len(), 1);
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    tree: DocTree,
    stack: Vec<NodeId>,
    error: Option<TreeError>,
}

impl TreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        let tree = DocTree::new();
        let root = tree.root();
        Self {
            tree,
            stack: vec![root],
            error: None,
        }
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or_else(|| self.tree.root())
    }

    fn attach(&mut self, kind: NodeKind) -> Option<NodeId> {
        if self.error.is_some() {
            return None;
        }
        match self.tree.push(self.current(), kind) {
            Ok(id) => Some(id),
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }

    /// Append a node under the current compound without descending into it.
    #[must_use]
    pub fn leaf(mut self, kind: NodeKind) -> Self {
        self.attach(kind);
        self
    }

    /// Append a node and make it the current compound.
    #[must_use]
    pub fn open(mut self, kind: NodeKind) -> Self {
        if let Some(id) = self.attach(kind) {
            self.stack.push(id);
        }
        self
    }

    /// Return to the parent of the current compound.
    #[must_use]
    pub fn close(mut self) -> Self {
        if self.stack.len() <= 1 {
            self.error.get_or_insert(TreeError::UnbalancedClose);
        } else {
            self.stack.pop();
        }
        self
    }

    #[must_use]
    pub fn word(self, text: impl Into<String>) -> Self {
        self.leaf(NodeKind::Word(text.into()))
    }

    /// Single collapsible space.
    #[must_use]
    pub fn space(self) -> Self {
        self.leaf(NodeKind::WhiteSpace(" ".to_owned()))
    }

    /// Finish building. Compounds left open are closed implicitly.
    pub fn finish(self) -> Result<DocTree, TreeError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.tree),
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
