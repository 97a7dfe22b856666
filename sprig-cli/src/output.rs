//! Printing layout results.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use sprig_dom::{DomTree, NodeId};
use sprig_layout::{LayoutBox, LayoutResult};

/// Longest text preview shown per run.
const PREVIEW_CHARS: usize = 30;

/// One-line, uncoloured description of what a box is.
pub fn describe(tree: &DomTree, layout_box: &LayoutBox) -> String {
    let hints = &layout_box.hints;
    if hints.is_rule {
        return "<hr>".to_string();
    }
    if hints.is_list_item {
        return if hints.list_index > 0 {
            format!("marker {}.", hints.list_index)
        } else {
            "marker •".to_string()
        };
    }
    if let Some(text) = tree.as_text(layout_box.node) {
        let preview: String = text.chars().take(PREVIEW_CHARS).collect();
        let suffix = if text.chars().count() > PREVIEW_CHARS {
            "..."
        } else {
            ""
        };
        return format!("Text(\"{}{suffix}\")", preview.replace('\n', "\\n"));
    }
    let tag = tree.tag_name(layout_box.node).unwrap_or("?");
    format!("<{tag}>")
}

fn flags(layout_box: &LayoutBox) -> Vec<String> {
    let hints = &layout_box.hints;
    let mut flags = Vec::new();
    if hints.heading_level > 0 {
        flags.push(format!("h{}", hints.heading_level));
    }
    for (set, name) in [
        (hints.is_bold, "bold"),
        (hints.is_italic, "italic"),
        (hints.is_preformatted, "pre"),
        (hints.is_blockquote, "quote"),
        (hints.show_border, "border"),
    ] {
        if set {
            flags.push(name.to_string());
        }
    }
    flags
}

/// Nesting depth of every node, indexed by `NodeId`.
fn depths(tree: &DomTree) -> Vec<usize> {
    let mut depths = vec![0; tree.len()];
    for id in tree.descendants(tree.root()) {
        if let Some(parent) = tree.parent(id) {
            depths[id.0] = depths[parent.0] + 1;
        }
    }
    depths
}

/// Print every box, indented by the nesting depth of its node.
pub fn print_boxes(tree: &DomTree, result: &LayoutResult) {
    println!(
        "=== Layout (window: {}px, {} boxes) ===\n",
        result.window_width(),
        result.boxes().len()
    );

    let depths = depths(tree);
    let depth_of = |id: NodeId| depths.get(id.0).copied().unwrap_or(0);
    for layout_box in result.boxes() {
        let indent = "  ".repeat(depth_of(layout_box.node).saturating_sub(1));
        let label = describe(tree, layout_box);
        let label = if layout_box.hints.is_list_item {
            label.green().to_string()
        } else if tree.as_text(layout_box.node).is_some() {
            label
        } else {
            label.cyan().to_string()
        };
        let geometry = format!(
            "x={} y={} w={} h={} {}pt",
            layout_box.x,
            layout_box.y,
            layout_box.width,
            layout_box.height,
            layout_box.hints.font_size
        );

        print!("{indent}{label} {}", geometry.dimmed());
        let flags = flags(layout_box);
        if !flags.is_empty() {
            print!(" [{}]", flags.join(", "));
        }
        if let Some(href) = &layout_box.href {
            print!(" -> {}", href.blue().underline());
        }
        println!();
    }

    println!("\ncontent height: {}px", result.content_height());
    if let Some(reason) = result.truncation() {
        println!("{}", format!("truncated: {reason}").yellow());
    }
}

/// Serialize the result as pretty-printed JSON.
///
/// # Errors
///
/// Fails only if serialization itself fails.
pub fn boxes_json(result: &LayoutResult) -> Result<String> {
    let value = json!({
        "window_width": result.window_width(),
        "content_height": result.content_height(),
        "truncated": result.truncation().map(ToString::to_string),
        "boxes": result.boxes(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use sprig_layout::{FallbackMeasurer, layout};

    use super::*;

    fn sample() -> (DomTree, LayoutResult) {
        let mut tree = DomTree::new();
        let ol = tree.element(NodeId::ROOT, "ol");
        let li = tree.element(ol, "li");
        let _ = tree.text(li, "item");
        let _ = tree.element(NodeId::ROOT, "hr");
        let result = layout(&tree, tree.root(), &FallbackMeasurer::default(), 800);
        (tree, result)
    }

    #[test]
    fn test_describe() {
        let (tree, result) = sample();
        let labels: Vec<String> = result.boxes().iter().map(|b| describe(&tree, b)).collect();
        assert_eq!(
            labels,
            vec!["<ol>", "marker 1.", "<li>", "Text(\"item\")", "<hr>"]
        );
    }

    #[test]
    fn test_long_text_is_shortened() {
        let mut tree = DomTree::new();
        let p = tree.element(NodeId::ROOT, "pre");
        let _ = tree.text(p, &"a\n".repeat(40));
        let result = layout(&tree, tree.root(), &FallbackMeasurer::default(), 800);

        let label = describe(&tree, &result.boxes()[1]);
        assert!(label.starts_with("Text(\"a\\na\\n"));
        assert!(label.ends_with("...\")"));
    }

    #[test]
    fn test_json_output() {
        let (_, result) = sample();
        let json: serde_json::Value = serde_json::from_str(&boxes_json(&result).unwrap()).unwrap();
        assert_eq!(json["window_width"], 800);
        assert_eq!(json["boxes"].as_array().map(Vec::len), Some(5));
        assert_eq!(json["boxes"][1]["hints"]["list_index"], 1);
        assert!(json["truncated"].is_null());
    }
}
