//! Fixed-priority selection of the best strategy.
//!
//! The order is a stability ranking, not a scoring model: a role locator
//! that carries an accessible name survives markup churn better than
//! anything attribute-based, and a raw XPath survives it worst. XPath is
//! never chosen as best; the CSS fallback guarantees there is always
//! something to return.

use crate::strategy::{StrategyResult, StrategySet};

/// Pick the best strategy from a full set. Total: always returns a value.
#[must_use]
pub fn best(set: &StrategySet) -> StrategyResult {
    if let Some(role) = &set.role {
        if role.has_role_name() {
            return role.clone();
        }
    }
    if let Some(testid) = &set.testid {
        return testid.clone();
    }
    if let Some(text) = &set.text {
        return text.clone();
    }
    if let Some(label) = &set.label {
        return label.clone();
    }
    if let Some(placeholder) = &set.placeholder {
        return placeholder.clone();
    }
    if let Some(alt) = &set.alt {
        return alt.clone();
    }
    if let Some(title) = &set.title {
        return title.clone();
    }
    if let Some(role) = &set.role {
        return role.clone();
    }
    set.css.clone()
}
