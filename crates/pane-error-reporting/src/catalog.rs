/*
 * catalog.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Catalog of error codes.
//!
//! Codes have the form `P-<subsystem>-<n>`: 1 syntax, 2 structure, 3 value,
//! 4 predicate, 5 lint. The table itself is `error_catalog.json`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Catalog entry for one code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorCodeInfo {
    /// Subsystem name (e.g., "syntax", "structure", "predicate")
    pub subsystem: String,

    pub title: String,

    /// Longer explanation of the error
    pub message_template: String,

    /// First release that emits the code.
    pub since_version: String,
}

/// Global error catalog, loaded lazily from JSON embedded at compile time.
///
/// # Panics
///
/// Panics on first use if the embedded table is not valid JSON, which the
/// tests below rule out.
pub static ERROR_CATALOG: Lazy<HashMap<String, ErrorCodeInfo>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../error_catalog.json"))
        .expect("error_catalog.json is malformed")
});

/// Catalog entry for `code`, if it exists.
///
/// # Example
///
/// ```
/// use pane_error_reporting::catalog::get_error_info;
///
/// let info = get_error_info("P-1-6").unwrap();
/// assert_eq!(info.title, "Missing Value");
/// ```
pub fn get_error_info(code: &str) -> Option<&ErrorCodeInfo> {
    ERROR_CATALOG.get(code)
}

/// Subsystem that owns `code`.
///
/// # Example
///
/// ```
/// use pane_error_reporting::catalog::get_subsystem;
///
/// assert_eq!(get_subsystem("P-4-6"), Some("predicate"));
/// ```
pub fn get_subsystem(code: &str) -> Option<&str> {
    get_error_info(code).map(|info| info.subsystem.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_has_a_title() {
        assert!(ERROR_CATALOG.len() >= 20);
        assert!(ERROR_CATALOG.values().all(|info| !info.title.is_empty()));
    }

    #[test]
    fn test_codes_match_subsystems() {
        let prefixes = [
            ("P-1-", "syntax"),
            ("P-2-", "structure"),
            ("P-3-", "value"),
            ("P-4-", "predicate"),
            ("P-5-", "lint"),
        ];
        for (code, info) in ERROR_CATALOG.iter() {
            let expected = prefixes
                .iter()
                .find(|(prefix, _)| code.starts_with(prefix))
                .map(|(_, subsystem)| *subsystem);
            assert_eq!(expected, Some(info.subsystem.as_str()), "code {}", code);
        }
    }

    #[test]
    fn test_unknown_code() {
        assert!(get_error_info("P-999-999").is_none());
        assert_eq!(get_subsystem("P-999-999"), None);
    }
}
