//! Sprig command-line viewer
//!
//! Lays out a local HTML document and prints the resulting boxes, either as
//! an indented listing or as JSON for other tools.

mod document;
mod font_metrics;
mod output;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use sprig_common::warning::clear_warnings;
use sprig_layout::{FallbackMeasurer, LayoutConfig, LayoutEngine, TextMeasurer};

use document::parse_document;
use font_metrics::FontdueMeasurer;

/// Sprig - lay out an HTML document and print its boxes
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Lay out a file for an 800px window
    sprig ./page.html

    # Lay out inline HTML in a narrow window
    sprig --width 320 --html '<h1>Title</h1><p>Some text</p>'

    # Dump boxes as JSON using custom tunables and a specific font
    sprig --json --config layout.json --font DejaVuSans.ttf ./page.html
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE", required_unless_present = "html", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Lay out an HTML string instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Window width in pixels (zero or negative uses the configured default)
    #[arg(long, default_value_t = 800, allow_negative_numbers = true)]
    width: i32,

    /// JSON file overriding layout tunables; omitted fields keep their defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Font used to measure text (default: first system font found)
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Print boxes as JSON
    #[arg(long)]
    json: bool,

    /// Keep each text node as one unbreakable run instead of splitting words
    #[arg(long)]
    no_split: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    let html = load_source(&cli)?;
    let mut tree = parse_document(&html);
    if !cli.no_split {
        tree.split_text_nodes();
    }

    let engine = LayoutEngine::new(load_config(cli.config.as_deref())?);
    let font = match &cli.font {
        Some(path) => Some(FontdueMeasurer::from_path(path)?),
        None => FontdueMeasurer::system(),
    };
    let fallback = FallbackMeasurer::from_config(engine.config());
    let measurer: &dyn TextMeasurer = match &font {
        Some(font) => font,
        None => &fallback,
    };

    let result = engine.layout(&tree, tree.root(), measurer, cli.width);

    if cli.json {
        println!("{}", output::boxes_json(&result)?);
    } else {
        output::print_boxes(&tree, &result);
    }
    Ok(())
}

/// Read the document named on the command line.
fn load_source(cli: &Cli) -> Result<String> {
    if let Some(html) = &cli.html {
        Ok(html.clone())
    } else if let Some(path) = &cli.path {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    } else {
        bail!("expected a file path or --html")
    }
}

/// Load and validate layout tunables, or use the defaults.
fn load_config(path: Option<&Path>) -> Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading layout config {}", path.display()))?;
    let config: LayoutConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing layout config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
