//! Code emission for hallar: locator snippets, full page-object classes,
//! and the tabular locator report, in TypeScript, Java, or Python.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

use serde::{Deserialize, Serialize};

mod class_gen;
mod error;
mod report;
mod snippet;

pub use class_gen::emit_class;
pub use error::{CodegenError, Result};
pub use report::{render_report, to_json};
pub use snippet::{locator_expr, selector_string, snippet, to_camel_case};

/// Target language for emitted code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Playwright for Node (`@playwright/test`)
    #[default]
    TypeScript,
    /// Playwright for Java
    Java,
    /// Playwright for Python (sync API)
    Python,
}

impl Language {
    /// Lenient parse: unrecognized names fall back to TypeScript.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "java" => Self::Java,
            "python" | "py" => Self::Python,
            _ => Self::TypeScript,
        }
    }

    /// File extension for generated sources.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::Java => "java",
            Self::Python => "py",
        }
    }
}
