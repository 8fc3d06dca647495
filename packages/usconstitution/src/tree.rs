//! Lazy pre-order traversal and rendered walks.
//!
//! [`Tree`] yields nodes; [`Rendered`] yields one rendered string per node
//! in the same order, building each child's string from its parent's rather
//! than re-deriving the ancestry.

use crate::config::{DEFAULT_CITATION, DEFAULT_HEADING};
use crate::provision::{join_label, Children, Node};
use crate::types::Constitution;

/// Pre-order depth-first iterator over a subtree.
///
/// Memory is one boxed child iterator per level of depth.
pub struct Tree<'a> {
    next: Option<Node<'a>>,
    stack: Vec<Children<'a>>,
}

impl<'a> Tree<'a> {
    fn new(root: Node<'a>) -> Self {
        Self {
            next: Some(root),
            stack: Vec::new(),
        }
    }
}

impl<'a> Iterator for Tree<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(node) = self.next.take() {
            self.stack.push(node.children());
            return Some(node);
        }

        while let Some(children) = self.stack.last_mut() {
            if let Some(node) = children.next() {
                self.stack.push(node.children());
                return Some(node);
            }
            self.stack.pop();
        }
        None
    }
}

/// Which address a rendered walk produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    Path,
    Heading,
    Citation,
}

impl RenderStyle {
    /// Render a node on its own, with its full ancestry.
    #[must_use]
    pub fn standalone(&self, node: &Node<'_>, prefix: &str) -> String {
        match self {
            Self::Path => node.path(prefix),
            Self::Heading => node.heading(prefix),
            Self::Citation => node.citation(prefix),
        }
    }

    /// Extend a parent's rendered string with a child's local part.
    #[must_use]
    pub fn extend(&self, parent: &str, child: &Node<'_>) -> String {
        match self {
            Self::Path => format!("{parent}/{}", child.slug()),
            Self::Heading => join_label(parent, &child.label()),
            Self::Citation => join_label(parent, &child.cite_label()),
        }
    }
}

/// Rendered strings of a subtree in [`Tree`] order.
pub struct Rendered<'a> {
    style: RenderStyle,
    root: Option<(Node<'a>, String)>,
    stack: Vec<(String, Children<'a>)>,
}

impl<'a> Iterator for Rendered<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((node, rendered)) = self.root.take() {
            self.stack.push((rendered.clone(), node.children()));
            return Some(rendered);
        }

        while let Some((parent, children)) = self.stack.last_mut() {
            if let Some(child) = children.next() {
                let rendered = self.style.extend(parent, &child);
                self.stack.push((rendered.clone(), child.children()));
                return Some(rendered);
            }
            self.stack.pop();
        }
        None
    }
}

impl<'a> Node<'a> {
    /// Walk this node and all descendants in pre-order.
    #[must_use]
    pub fn tree(&self) -> Tree<'a> {
        Tree::new(*self)
    }

    /// Render this subtree, starting from this node's standalone form.
    #[must_use]
    pub fn render(&self, style: RenderStyle, prefix: &str) -> Rendered<'a> {
        Rendered {
            style,
            root: Some((*self, style.standalone(self, prefix))),
            stack: Vec::new(),
        }
    }

    #[must_use]
    pub fn paths(&self, prefix: &str) -> Rendered<'a> {
        self.render(RenderStyle::Path, prefix)
    }

    #[must_use]
    pub fn headings(&self, prefix: &str) -> Rendered<'a> {
        self.render(RenderStyle::Heading, prefix)
    }

    #[must_use]
    pub fn citations(&self, prefix: &str) -> Rendered<'a> {
        self.render(RenderStyle::Citation, prefix)
    }
}

impl Constitution {
    /// The root as a tree node.
    #[must_use]
    pub fn node(&self) -> Node<'_> {
        Node::Constitution(self)
    }

    /// Every node, root first.
    #[must_use]
    pub fn tree(&self) -> Tree<'_> {
        self.node().tree()
    }

    /// Every path, under the prefix given at load time.
    #[must_use]
    pub fn paths(&self) -> Rendered<'_> {
        self.node().paths(&self.path_prefix)
    }

    /// Every heading, under `US Constitution`.
    #[must_use]
    pub fn headings(&self) -> Rendered<'_> {
        self.node().headings(DEFAULT_HEADING)
    }

    /// Every citation, under `U.S. Const.`.
    #[must_use]
    pub fn citations(&self) -> Rendered<'_> {
        self.node().citations(DEFAULT_CITATION)
    }
}
