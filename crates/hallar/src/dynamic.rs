//! Dynamic-value classification.
//!
//! Framework-generated ids and classes (`ember482`, `css-1q2w3e`, GUID
//! fragments) change between builds and sessions; a selector built on one is
//! broken on arrival. `is_dynamic` is the single gate every id, class, and
//! name attribute passes before it is allowed into a CSS or XPath fallback.

use regex::Regex;
use std::sync::OnceLock;

/// The heuristics are tested independently; any match marks the value dynamic.
fn patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // Large hash: a run of 32+ hex-like characters
            r"(?i)[a-z0-9]{32}",
            // 8+ consecutive digits
            r"[0-9]{8,}",
            // Purely numeric
            r"^[0-9]+$",
            // GUID-like hex strings
            r"(?i)[a-f0-9]{8,}",
            // Framework prefixes
            r"(?i)^(ember|ng-|__|_|auto-|id-|view-|v-|jss|css-)",
            // Numeric suffix after a separator
            r"[_-][0-9]+$",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    })
}

/// Returns `true` if the value looks machine-generated and is therefore
/// unsafe to use in a stable selector. Empty input returns `false`.
#[must_use]
pub fn is_dynamic(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    patterns().iter().any(|p| p.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_stable() {
        assert!(!is_dynamic(""));
    }

    #[test]
    fn large_hash_is_dynamic() {
        assert!(is_dynamic("d41d8cd98f00b204e9800998ecf8427e"));
    }

    #[test]
    fn long_digit_run_is_dynamic() {
        assert!(is_dynamic("order-12345678-confirm"));
    }

    #[test]
    fn purely_numeric_is_dynamic() {
        assert!(is_dynamic("42"));
        assert!(is_dynamic("7"));
    }

    #[test]
    fn guid_fragment_is_dynamic() {
        assert!(is_dynamic("widget-deadbeef"));
        assert!(is_dynamic("DEADBEEF99"));
    }

    #[test]
    fn framework_prefixes_are_dynamic() {
        for value in [
            "ember482",
            "ng-pristine",
            "__private",
            "_internal",
            "auto-save",
            "id-col",
            "view-root",
            "v-cloak",
            "jss204",
            "css-1q2w3e",
            "CSS-UPPER",
        ] {
            assert!(is_dynamic(value), "{value} should be dynamic");
        }
    }

    #[test]
    fn numeric_suffix_is_dynamic() {
        assert!(is_dynamic("row-3"));
        assert!(is_dynamic("item_17"));
    }

    #[test]
    fn stable_values_pass() {
        for value in [
            "login-form",
            "submit",
            "searchBox",
            "main.navigation",
            "btnPrimary",
            "email",
        ] {
            assert!(!is_dynamic(value), "{value} should be stable");
        }
    }
}
