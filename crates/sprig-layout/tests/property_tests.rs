//! Property tests for the layout pass over generated documents.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use sprig_dom::{DomTree, NodeId, ResolvedStyle};
use sprig_layout::{LayoutResult, layout};

const TAGS: &[&str] = &[
    "p", "div", "section", "ul", "ol", "li", "h1", "h3", "blockquote", "pre", "span", "strong",
    "em", "code", "small", "a", "br", "hr", "my-widget", "script",
];

const STYLES: &[&str] = &["font-size: 20px", "width: 100px", "width: 12em", "font-size: 0"];

/// Text runs are named after their width, so `"w120"` is 120px wide.
fn measure(text: &str, _font_size: i32) -> i32 {
    text.strip_prefix('w')
        .and_then(|w| w.parse().ok())
        .unwrap_or(0)
}

#[derive(Clone, Debug)]
enum Node {
    Text(u16),
    Element {
        tag: &'static str,
        style: Option<&'static str>,
        children: Vec<Node>,
    },
}

impl Node {
    fn generate(g: &mut Gen, depth: usize) -> Self {
        if depth >= 5 || u8::arbitrary(g) % 3 == 0 {
            return Self::Text(u16::arbitrary(g) % 400);
        }
        let tag = g.choose(TAGS).copied().unwrap_or("div");
        let style = if u8::arbitrary(g) % 4 == 0 {
            g.choose(STYLES).copied()
        } else {
            None
        };
        let children = (0..usize::arbitrary(g) % 4)
            .map(|_| Self::generate(g, depth + 1))
            .collect();
        Self::Element {
            tag,
            style,
            children,
        }
    }

    fn build(&self, tree: &mut DomTree, parent: NodeId) {
        match self {
            Self::Text(width) => {
                let _ = tree.text(parent, &format!("w{width}"));
            }
            Self::Element {
                tag,
                style,
                children,
            } => {
                let id = tree.element(parent, tag);
                if let Some(style) = style {
                    tree.set_style(id, ResolvedStyle::parse_inline(style));
                }
                if *tag == "a" {
                    tree.set_attribute(id, "href", "https://example.test/");
                }
                for child in children {
                    child.build(tree, id);
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Document {
    nodes: Vec<Node>,
    window_width: u16,
}

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        let nodes = (0..usize::arbitrary(g) % 6)
            .map(|_| Node::generate(g, 0))
            .collect();
        Self {
            nodes,
            window_width: u16::arbitrary(g) % 1200,
        }
    }
}

impl Document {
    fn tree(&self) -> DomTree {
        let mut tree = DomTree::new();
        for node in &self.nodes {
            node.build(&mut tree, NodeId::ROOT);
        }
        tree
    }

    fn layout(&self, tree: &DomTree) -> LayoutResult {
        layout(tree, tree.root(), &measure, i32::from(self.window_width))
    }
}

#[quickcheck]
fn prop_sizes_are_never_negative(doc: Document) -> bool {
    let tree = doc.tree();
    doc.layout(&tree)
        .boxes()
        .iter()
        .all(|b| b.width >= 0 && b.height >= 0)
}

#[quickcheck]
fn prop_layout_is_deterministic(doc: Document) -> bool {
    let tree = doc.tree();
    doc.layout(&tree) == doc.layout(&tree)
}

#[quickcheck]
fn prop_y_never_decreases_in_emission_order(doc: Document) -> bool {
    let tree = doc.tree();
    let result = doc.layout(&tree);
    result.boxes().windows(2).all(|pair| pair[0].y <= pair[1].y)
}

#[quickcheck]
fn prop_greedy_wrap(widths: Vec<u16>, window_width: u16) -> bool {
    let window_width = i32::from(window_width % 1000) + 100;
    let mut tree = DomTree::new();
    let p = tree.element(NodeId::ROOT, "p");
    for width in &widths {
        let _ = tree.text(p, &format!("w{}", width % 500));
    }

    let result = layout(&tree, tree.root(), &measure, window_width);
    let base_x = 30;
    let right = base_x + window_width - 60;

    let runs: Vec<_> = result.boxes().iter().skip(1).collect();
    runs.len() == widths.len()
        && runs
            .iter()
            .all(|b| b.x >= base_x && (b.right() <= right || b.x == base_x))
        // A run wraps only when it would not have fitted after its predecessor.
        && runs.windows(2).all(|pair| {
            pair[1].y == pair[0].y || pair[0].right() + 4 + pair[1].width > right
        })
}

#[quickcheck]
fn prop_list_items_are_numbered_in_order(ordered: u8, unordered: u8) -> bool {
    let ordered = u32::from(ordered % 20);
    let unordered = usize::from(unordered % 20);

    let mut tree = DomTree::new();
    let ol = tree.element(NodeId::ROOT, "ol");
    for _ in 0..ordered {
        let li = tree.element(ol, "li");
        let _ = tree.text(li, "w10");
    }
    let ul = tree.element(NodeId::ROOT, "ul");
    for _ in 0..unordered {
        let _ = tree.element(ul, "li");
    }

    let result = layout(&tree, tree.root(), &measure, 800);
    let indices: Vec<u32> = result
        .boxes()
        .iter()
        .filter(|b| b.hints.is_list_item)
        .map(|b| b.hints.list_index)
        .collect();
    let expected: Vec<u32> = (1..=ordered)
        .chain(std::iter::repeat_n(0, unordered))
        .collect();
    indices == expected
}
