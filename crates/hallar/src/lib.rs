//! Hallar: locator-selection heuristics for web UI automation.
//!
//! Hallar (Spanish: "to find") analyzes static HTML and decides, per
//! element, which locator a generated test should use: an accessible role
//! with a name when one exists, a test id when the page provides one, and
//! progressively weaker fallbacks down to a probed XPath.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     HALLAR Pipeline                              │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌──────────┐    ┌────────────┐    ┌────────┐    ┌──────────┐   │
//! │   │ Document │    │ Strategy   │    │ Ranker │    │ Named    │   │
//! │   │ (HTML)   │───►│ Generators │───►│ (best) │───►│ Elements │   │
//! │   └──────────┘    └─────┬──────┘    └────────┘    └──────────┘   │
//! │                         │ uniqueness probes                      │
//! │                   ┌─────▼──────┐                                 │
//! │                   │ DomQuery   │                                 │
//! │                   └────────────┘                                 │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::indexing_slicing))]

mod collect;
mod descriptor;
mod document;
mod dom;
mod dynamic;
mod rank;
mod result;
mod strategy;
mod xpath;

pub use collect::{
    infer_action, normalize_name, Action, NameRegistry, NamedElement,
};
pub use descriptor::{strip_emoji, ElementDescriptor, TEST_ID_ATTRS};
pub use document::Document;
pub use dom::{DetachedQuery, DomQuery, PathProbe, TreeQuery};
pub use dynamic::is_dynamic;
pub use rank::best;
pub use result::{HallarError, HallarResult};
pub use strategy::{
    LocatorMethod, StrategyEngine, StrategyResult, StrategySet, StrategyType, MAX_TEXT_LEN,
    NAMEABLE_ROLES,
};
pub use xpath::relative_xpath;
