//! Block and inline flow layout for the Sprig viewer.
//!
//! # Scope
//!
//! This crate turns a styled [`sprig_dom::DomTree`] into an ordered sequence of
//! positioned, sized [`LayoutBox`]es suitable for painting and hit-testing:
//!
//! - **Tag classification** ([`tags`]) - block, inline or transparent, via
//!   binary search over sorted tag tables
//! - **Style access** ([`length`]) - width / height / font-size overrides
//!   parsed from `N` or `Npx` strings, falling back on anything else
//! - **Text measurement** ([`measure`]) - caller-supplied, with a
//!   deterministic per-character fallback
//! - **Layout context** ([`context`]) - inherited attributes copied and
//!   specialised per container, cursor handed back to the parent on close
//! - **Box buffer** ([`buffer`]) - append-only, index addressed
//! - **Layout engine** ([`engine`]) - the tree evaluation itself, run over an
//!   explicit frame stack so document depth never grows the call stack
//!
//! Cascading, markup parsing, painting, networking and scripting are done by
//! other components; this crate only reads their results.
//!
//! # Example
//!
//! ```
//! use sprig_dom::{DomTree, NodeId};
//! use sprig_layout::{FallbackMeasurer, layout};
//!
//! let mut tree = DomTree::new();
//! let p = tree.element(NodeId::ROOT, "p");
//! let _ = tree.text(p, "Hello");
//!
//! let result = layout(&tree, tree.root(), &FallbackMeasurer::default(), 800);
//! assert_eq!(result.boxes().len(), 2);
//! ```

pub mod buffer;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod layout_box;
pub mod length;
pub mod measure;
pub mod result;
pub mod tags;

// Re-exports for convenience
pub use buffer::{BoxBuffer, BoxIndex};
pub use config::{FontSizes, LayoutConfig};
pub use context::{LayoutContext, ListKind};
pub use engine::{LayoutEngine, layout};
pub use error::LayoutError;
pub use layout_box::{Hints, LayoutBox};
pub use length::{StyleAccessor, parse_dimension};
pub use measure::{FallbackMeasurer, TextMeasurer};
pub use result::LayoutResult;
pub use tags::{TagClass, TagRole, classify, is_excluded};
