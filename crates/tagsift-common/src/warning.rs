//! Scanner warnings with colored terminal output.
//!
//! Provides deduplication so a document that repeats the same malformed
//! construct does not flood stderr. Used by the scanner to report recoveries.

use std::collections::HashSet;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Master switch for [`warn_once`]. Suppressed warnings are not recorded.
static ENABLED: AtomicBool = AtomicBool::new(true);

/// Print a warning to stderr, once per unique component and message.
///
/// `location` is printed after the message but is not part of the key, so
/// the same problem at a different place stays quiet and the set of seen
/// warnings is bounded by the messages a component can produce.
///
/// # Example
/// ```ignore
/// warn_once("Scanner", "unterminated-tag", &"line 3, column 7");
/// ```
pub fn warn_once(component: &str, message: &str, location: &impl Display) {
    if !ENABLED.load(Ordering::Relaxed) {
        return;
    }

    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(warning_key(component, message));

    if should_print {
        eprintln!(
            "{}",
            format!("[tagsift {component}] warning: {message} at {location}").yellow()
        );
    }
}

/// Whether `message` from `component` has already been printed.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    let key = warning_key(component, message);
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Turn warning output on or off for the whole process.
pub fn set_warnings_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

fn warning_key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_records_message() {
        warn_once("Test", "recorded once", &"line 1, column 1");
        assert!(has_warned("Test", "recorded once"));
        assert!(!has_warned("Test", "never printed"));
    }

    #[test]
    fn test_messages_are_keyed_by_component() {
        warn_once("First", "shared message", &"line 1, column 1");
        assert!(has_warned("First", "shared message"));
        assert!(!has_warned("Second", "shared message"));
    }

    #[test]
    fn test_location_is_not_part_of_the_key() {
        warn_once("Located", "same problem", &"line 1, column 1");
        warn_once("Located", "same problem", &"line 9, column 4");
        assert!(has_warned("Located", "same problem"));
        assert!(!has_warned("Located", "same problem at line 9, column 4"));
    }
}
