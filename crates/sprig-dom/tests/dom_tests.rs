//! Tests for DOM construction, traversal and text splitting.

use sprig_dom::{DOCUMENT_TAG, DomTree, NodeId, NodeType, ResolvedStyle, TEXT_TAG};

fn texts(tree: &DomTree, parent: NodeId) -> Vec<&str> {
    tree.children(parent)
        .iter()
        .filter_map(|&id| tree.as_text(id))
        .collect()
}

// ========== construction ==========

#[test]
fn test_element_and_text_builders_link_parent() {
    let mut tree = DomTree::new();
    let p = tree.element(NodeId::ROOT, "p");
    let t = tree.text(p, "hello");

    assert_eq!(tree.children(NodeId::ROOT), &[p]);
    assert_eq!(tree.children(p), &[t]);
    assert_eq!(tree.parent(t), Some(p));
    assert_eq!(tree.parent(p), Some(NodeId::ROOT));
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_append_child_ignores_unknown_ids() {
    let mut tree = DomTree::new();
    tree.append_child(NodeId::ROOT, NodeId(42));
    assert!(tree.children(NodeId::ROOT).is_empty());
}

#[test]
fn test_tag_names() {
    let mut tree = DomTree::new();
    let div = tree.element(NodeId::ROOT, "DIV");
    let text = tree.text(div, "x");
    let comment = tree.alloc(NodeType::Comment("note".to_string()));
    tree.append_child(div, comment);
    let nameless = tree.element(div, "");

    assert_eq!(tree.tag_name(NodeId::ROOT), Some(DOCUMENT_TAG));
    assert_eq!(tree.tag_name(div), Some("DIV"));
    assert_eq!(tree.tag_name(text), Some(TEXT_TAG));
    assert_eq!(tree.tag_name(comment), None);
    assert_eq!(tree.tag_name(nameless), None);
    assert_eq!(tree.tag_name(NodeId(999)), None);
}

#[test]
fn test_href_is_trimmed_and_empty_is_none() {
    let mut tree = DomTree::new();
    let a = tree.element(NodeId::ROOT, "a");
    tree.set_attribute(a, "href", "  https://example.com/  ");
    let empty = tree.element(NodeId::ROOT, "a");
    tree.set_attribute(empty, "href", "   ");

    assert_eq!(tree.href(a), Some("https://example.com/"));
    assert_eq!(tree.href(empty), None);
}

#[test]
fn test_set_style_only_applies_to_elements() {
    let mut tree = DomTree::new();
    let div = tree.element(NodeId::ROOT, "div");
    let text = tree.text(div, "t");
    let style = ResolvedStyle::parse_inline("width: 100px");

    tree.set_style(div, style.clone());
    tree.set_style(text, style.clone());

    assert_eq!(tree.style(div), Some(&style));
    assert_eq!(tree.style(text), None);
}

// ========== traversal ==========

#[test]
fn test_descendants_document_order() {
    let mut tree = DomTree::new();
    let a = tree.element(NodeId::ROOT, "a");
    let b = tree.element(a, "b");
    let c = tree.element(a, "c");
    let d = tree.element(NodeId::ROOT, "d");

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![NodeId::ROOT, a, b, c, d]);
}

#[test]
fn test_descendants_of_unknown_id_is_empty() {
    let tree = DomTree::new();
    assert_eq!(tree.descendants(NodeId(7)).count(), 0);
}

#[test]
fn test_descendants_deep_tree() {
    let mut tree = DomTree::new();
    let mut parent = NodeId::ROOT;
    for _ in 0..50_000 {
        parent = tree.element(parent, "div");
    }
    assert_eq!(tree.descendants(NodeId::ROOT).count(), 50_001);
}

// ========== split_text_nodes ==========

#[test]
fn test_split_text_nodes_one_node_per_word() {
    let mut tree = DomTree::new();
    let p = tree.element(NodeId::ROOT, "p");
    let _ = tree.text(p, "  hello   brave\nnew world ");
    let em = tree.element(p, "em");
    let _ = tree.text(em, "again");

    tree.split_text_nodes();

    assert_eq!(texts(&tree, p), vec!["hello", "brave", "new", "world"]);
    assert_eq!(tree.children(p).len(), 5);
    assert_eq!(tree.children(p)[4], em);
    for &child in tree.children(p) {
        assert_eq!(tree.parent(child), Some(p));
    }
    assert_eq!(texts(&tree, em), vec!["again"]);
}

#[test]
fn test_split_text_nodes_keeps_whitespace_only_text() {
    let mut tree = DomTree::new();
    let div = tree.element(NodeId::ROOT, "div");
    let blank = tree.text(div, " \n ");

    tree.split_text_nodes();

    assert_eq!(tree.children(div), &[blank]);
    assert_eq!(tree.as_text(blank), Some(" \n "));
}

#[test]
fn test_split_text_nodes_keeps_no_break_space_inside_word() {
    let mut tree = DomTree::new();
    let p = tree.element(NodeId::ROOT, "p");
    let _ = tree.text(p, "run 10\u{a0}km today");
    let nbsp = tree.text(p, "\u{a0}");

    tree.split_text_nodes();

    assert_eq!(texts(&tree, p), vec!["run", "10\u{a0}km", "today", "\u{a0}"]);
    assert_eq!(tree.children(p)[3], nbsp);
}

#[test]
fn test_split_text_nodes_skips_pre() {
    let mut tree = DomTree::new();
    let pre = tree.element(NodeId::ROOT, "PRE");
    let code = tree.element(pre, "code");
    let _ = tree.text(code, "fn main() {\n    run();\n}");

    tree.split_text_nodes();

    assert_eq!(texts(&tree, code), vec!["fn main() {\n    run();\n}"]);
}

// ========== ResolvedStyle ==========

#[test]
fn test_parse_inline_known_properties() {
    let style = ResolvedStyle::parse_inline(
        "Width: 120px; height:30px; font-size: 20px; background-color: #ffcc00; text-align: center",
    );
    assert_eq!(style.width.as_deref(), Some("120px"));
    assert_eq!(style.height.as_deref(), Some("30px"));
    assert_eq!(style.font_size.as_deref(), Some("20px"));
    assert_eq!(style.background.as_deref(), Some("#ffcc00"));
    assert_eq!(style.text_align.as_deref(), Some("center"));
}

#[test]
fn test_parse_inline_last_declaration_wins_and_garbage_ignored() {
    let style = ResolvedStyle::parse_inline("width: 10px; color: red; nonsense; width: 20; height:");
    assert_eq!(style.width.as_deref(), Some("20"));
    assert_eq!(style.height, None);
    assert!(!style.is_empty());
    assert!(ResolvedStyle::parse_inline("color: red").is_empty());
}
