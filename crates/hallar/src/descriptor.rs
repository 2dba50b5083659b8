//! Element descriptors: a derived, on-demand view over a parsed DOM node.
//!
//! Nothing here is stored; a descriptor is computed per node during a single
//! collection pass and dropped with it.

use regex::Regex;
use scraper::ElementRef;
use std::sync::OnceLock;

/// Attributes checked, in order, when looking for a test id.
pub const TEST_ID_ATTRS: &[&str] = &["data-testid", "data-test-id", "data-test"];

fn pictographic() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\p{Extended_Pictographic}").unwrap_or_else(|_| Regex::new("$^").unwrap())
    })
}

/// Strip pictographic characters (emoji) from a value, falling back to the
/// original when stripping would leave nothing to match on.
#[must_use]
pub fn strip_emoji(value: &str) -> String {
    let cleaned = pictographic().replace_all(value, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        value.trim().to_string()
    } else {
        cleaned.to_string()
    }
}

/// A read-only view over a DOM element exposing the handful of facts the
/// strategy generators care about.
#[derive(Debug, Clone, Copy)]
pub struct ElementDescriptor<'a> {
    el: ElementRef<'a>,
}

impl<'a> ElementDescriptor<'a> {
    /// Wrap an element reference.
    #[must_use]
    pub fn new(el: ElementRef<'a>) -> Self {
        Self { el }
    }

    /// The underlying element reference.
    #[must_use]
    pub fn element(&self) -> ElementRef<'a> {
        self.el
    }

    /// Lowercase tag name.
    #[must_use]
    pub fn tag(&self) -> &'a str {
        self.el.value().name()
    }

    /// Raw attribute read.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.el.value().attr(name)
    }

    /// Attribute read that treats empty values as absent.
    #[must_use]
    pub fn attr_non_empty(&self, name: &str) -> Option<&'a str> {
        self.attr(name).filter(|v| !v.is_empty())
    }

    /// The `id` attribute, when present and non-empty.
    #[must_use]
    pub fn id(&self) -> Option<&'a str> {
        self.attr_non_empty("id")
    }

    /// Class list in document order.
    #[must_use]
    pub fn classes(&self) -> Vec<&'a str> {
        self.el.value().classes().collect()
    }

    /// The effective input type: the `type` attribute lowercased, defaulting
    /// to `text` for `<input>` elements without one.
    #[must_use]
    pub fn input_type(&self) -> String {
        let explicit = self.attr("type").map(str::to_ascii_lowercase);
        match explicit {
            Some(t) if !t.is_empty() => t,
            _ if self.tag() == "input" => "text".to_string(),
            _ => String::new(),
        }
    }

    /// Trimmed text content (concatenated descendant text nodes).
    #[must_use]
    pub fn text(&self) -> String {
        self.el.text().collect::<String>().trim().to_string()
    }

    /// Text content with internal whitespace collapsed to single spaces.
    #[must_use]
    pub fn text_collapsed(&self) -> String {
        self.el
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First non-empty test-id attribute.
    #[must_use]
    pub fn test_id(&self) -> Option<&'a str> {
        TEST_ID_ATTRS
            .iter()
            .find_map(|attr| self.attr_non_empty(attr))
    }

    /// `aria-label`, when present and non-empty.
    #[must_use]
    pub fn aria_label(&self) -> Option<&'a str> {
        self.attr_non_empty("aria-label")
    }

    /// Whether this is an `<a>` that carries no interaction signal at all.
    #[must_use]
    pub fn is_inert_anchor(&self) -> bool {
        self.tag() == "a"
            && self.attr("href").is_none()
            && self.attr("onclick").is_none()
            && self.attr("role").is_none()
    }

    /// Zero-based index among preceding same-tag element siblings, plus a
    /// flag for whether any same-tag sibling exists at all.
    #[must_use]
    pub fn sibling_position(&self) -> (usize, bool) {
        let tag = self.tag();
        let mut index = 0;
        let mut has_same = false;
        for sib in self.el.prev_siblings().filter_map(ElementRef::wrap) {
            if sib.value().name() == tag {
                index += 1;
                has_same = true;
            }
        }
        if !has_same {
            has_same = self
                .el
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .any(|sib| sib.value().name() == tag);
        }
        (index, has_same)
    }

    /// Parent element, when it exists.
    #[must_use]
    pub fn parent(&self) -> Option<ElementDescriptor<'a>> {
        self.el
            .parent()
            .and_then(ElementRef::wrap)
            .map(ElementDescriptor::new)
    }
}
