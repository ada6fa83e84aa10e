//! Query warnings with colored terminal output.
//!
//! Provides deduplication so a backend walking a large document reports
//! each lossy conversion once instead of once per node.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record a warning key, returning `true` the first time it is seen.
fn record(key: String) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about a lossy or unexpected condition (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("JSON", "nested array under 'rows' flattened");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if record(format!("[{component}] {message}")) {
        eprintln!("{YELLOW}[Arbor {component}] ⚠ {message}{RESET}");
    }
}

/// Clear all recorded warnings (call before loading a new document)
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
    fn test_record_deduplicates() {
        assert!(record("[Test] dedup-probe".to_string()));
        assert!(!record("[Test] dedup-probe".to_string()));
    }

    #[test]
    fn test_distinct_components_are_distinct_keys() {
        assert!(record("[A] same-message-probe".to_string()));
        assert!(record("[B] same-message-probe".to_string()));
    }
}
