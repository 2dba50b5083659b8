//! Input boundary: one `Document` type for both a captured page and a pasted
//! fragment.
//!
//! Callers with a live page hand us its serialized HTML; callers with a
//! snippet hand us the snippet. Both parse into the same tree and produce
//! identical entries, so nothing downstream needs to know which it was.

use scraper::{ElementRef, Html, Selector};

use crate::collect::{self, NamedElement};
use crate::dom::{DomQuery, TreeQuery};
use crate::result::{HallarError, HallarResult};

/// A parsed HTML document ready for analysis.
pub struct Document {
    html: Html,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

impl Document {
    /// Parse raw HTML. Fails fast when the input holds no markup at all;
    /// the parser itself is error-recovering, so anything non-empty yields
    /// a usable tree.
    pub fn parse(input: &str) -> HallarResult<Self> {
        if input.trim().is_empty() {
            return Err(HallarError::EmptyInput);
        }
        Ok(Self {
            html: Html::parse_document(input),
        })
    }

    /// The root to analyze: `<body>` when the parse produced one, else the
    /// document root.
    #[must_use]
    pub fn root(&self) -> ElementRef<'_> {
        Selector::parse("body")
            .ok()
            .and_then(|sel| self.html.select(&sel).next())
            .unwrap_or_else(|| self.html.root_element())
    }

    /// Every element in the document, in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.root_element().descendants().filter_map(ElementRef::wrap)
    }

    /// Elements matching a CSS selector, scoped to [`Self::root`], in
    /// document order.
    pub fn select(&self, css: &str) -> HallarResult<Vec<ElementRef<'_>>> {
        let sel = Selector::parse(css)
            .map_err(|e| HallarError::selector(format!("{css:?}: {e}")))?;
        let root = self.root();
        Ok(root.select(&sel).collect())
    }

    /// Text of a `<label for=ID>` bound to the given id, looked up within
    /// this document rather than any ambient global one.
    #[must_use]
    pub fn label_for(&self, id: &str) -> Option<String> {
        if id.contains('"') || id.contains('\\') {
            return None;
        }
        let sel = Selector::parse(&format!("label[for=\"{id}\"]")).ok()?;
        let label = self.html.select(&sel).next()?;
        let text = label.text().collect::<String>().trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Collect interactive elements with full uniqueness probing against
    /// this tree.
    pub fn collect(&self) -> HallarResult<Vec<NamedElement>> {
        let probe = TreeQuery::new(self);
        collect::collect_with(self, &probe)
    }

    /// Collect with a caller-supplied probing capability. Pass
    /// [`crate::dom::DetachedQuery`] when uniqueness cannot be verified;
    /// generation then degrades to non-probed heuristics instead of failing.
    pub fn collect_with(&self, probe: &dyn DomQuery) -> HallarResult<Vec<NamedElement>> {
        collect::collect_with(self, probe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_fails_fast() {
        assert!(matches!(Document::parse(""), Err(HallarError::EmptyInput)));
        assert!(matches!(
            Document::parse("   \n\t "),
            Err(HallarError::EmptyInput)
        ));
    }

    #[test]
    fn fragment_without_body_tag_still_parses() {
        let doc = Document::parse("<button>Go</button>").unwrap();
        assert_eq!(doc.select("button").unwrap().len(), 1);
    }

    #[test]
    fn label_lookup_is_scoped_to_this_document() {
        let doc =
            Document::parse("<label for=\"mail\">Email address</label><input id=\"mail\">")
                .unwrap();
        assert_eq!(doc.label_for("mail").as_deref(), Some("Email address"));
        assert_eq!(doc.label_for("other"), None);
    }
}
