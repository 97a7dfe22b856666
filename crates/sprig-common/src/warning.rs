//! Viewer warnings with colored terminal output.
//!
//! Layout never fails on malformed input; it falls back to a default and
//! reports the fallback here. Each distinct message is printed once per
//! document so a page full of `width: 12em` does not flood the terminal.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Messages already printed since the last [`clear_warnings`].
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record `key`, returning `true` the first time it is seen.
fn first_sighting(key: String) -> bool {
    // A panic while holding the lock cannot leave the set half-updated.
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about a fallback or unsupported feature (prints once per unique message).
///
/// # Example
/// ```
/// use sprig_common::warning::warn_once;
///
/// warn_once("Layout", "unsupported unit in width: 12em");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_sighting(format!("[{component}] {message}")) {
        eprintln!("{}", format!("[Sprig {component}] ⚠ {message}").yellow());
    }
}

/// Clear all recorded warnings (call when loading a new document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sighting_deduplicates() {
        let key = "[Test] test_first_sighting_deduplicates".to_string();
        assert!(first_sighting(key.clone()));
        assert!(!first_sighting(key));
    }

    #[test]
    fn test_component_is_part_of_key() {
        assert!(first_sighting("[A] shared message".to_string()));
        assert!(first_sighting("[B] shared message".to_string()));
    }
}
