//! Common utilities for the Sprig viewer.
//!
//! This crate provides shared infrastructure used by all viewer components:
//! - **Warning System** - deduplicated, colored diagnostics on stderr

pub mod warning;
