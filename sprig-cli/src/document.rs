//! Building a [`DomTree`] from HTML source.
//!
//! Tokenizing and tree construction are delegated to kuchiki (html5ever).
//! This module only copies the result into the arena tree layout reads,
//! keeping elements and text and dropping comments, doctypes and
//! processing instructions. Inline `style` attributes become the node's
//! resolved style, which is all the styling this viewer does.

use kuchiki::traits::TendrilSink;
use kuchiki::{NodeData, NodeRef};
use sprig_dom::{DomTree, NodeId, ResolvedStyle};

/// Parse `html` into a [`DomTree`].
pub fn parse_document(html: &str) -> DomTree {
    let document = kuchiki::parse_html().one(html);
    let mut tree = DomTree::new();

    let mut stack: Vec<(NodeRef, NodeId)> = document
        .children()
        .rev()
        .map(|child| (child, NodeId::ROOT))
        .collect();

    while let Some((node, parent)) = stack.pop() {
        match node.data() {
            NodeData::Element(element) => {
                let id = tree.element(parent, element.name.local.as_ref());
                let attrs = element.attributes.borrow();
                for (name, attr) in &attrs.map {
                    tree.set_attribute(id, name.local.as_ref(), &attr.value);
                }
                if let Some(style) = attrs.get("style") {
                    tree.set_style(id, ResolvedStyle::parse_inline(style));
                }
                stack.extend(node.children().rev().map(|child| (child, id)));
            }
            NodeData::Text(text) => {
                let _ = tree.text(parent, &text.borrow());
            }
            _ => {}
        }
    }

    tree
}
