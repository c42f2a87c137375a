//! Deduplicated engine warnings with colored terminal output.
//!
//! The selector parser tolerates malformed input instead of failing, so the
//! only trace of a suspicious selector (an unterminated quote, an unbalanced
//! bracket) is a warning on stderr. Each unique message prints once; repeated
//! queries with the same bad selector stay quiet.

use std::collections::HashSet;
use std::sync::{LazyLock, Mutex};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Messages already printed, keyed by `component` + `message`.
static WARNED: LazyLock<Mutex<HashSet<String>>> = LazyLock::new(|| Mutex::new(HashSet::new()));

/// Warn about degraded input handling (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("selector", "unterminated quote in \"[text='oops]\"");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    if WARNED.lock().unwrap().insert(key) {
        eprintln!("{YELLOW}[Lemur {component}] ⚠ {message}{RESET}");
    }
}

/// Clear all recorded warnings (call when starting on a new snapshot).
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    WARNED.lock().unwrap().clear();
}
