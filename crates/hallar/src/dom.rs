//! DOM-query capability for uniqueness probing.
//!
//! The XPath generator wants to know "how many nodes does this path match"
//! before committing to it. Against a parsed tree we can answer exactly;
//! against nothing (a caller that only had a detached snippet and wants no
//! verification) we answer zero and the generator degrades to non-probed
//! heuristics. The trait keeps the generator logic identical across both.

use std::collections::HashSet;

use ego_tree::NodeId;
use scraper::ElementRef;

use crate::descriptor::ElementDescriptor;
use crate::document::Document;

/// A structured path predicate: the subset of XPath the generator actually
/// probes with. Structured rather than stringly so the tree-walking
/// implementation needs no XPath evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathProbe {
    /// `//*[@id="..."]`
    Id(String),
    /// `//tag[@attr="value"]`
    TagAttr {
        /// Tag name
        tag: String,
        /// Attribute name
        attr: String,
        /// Required attribute value
        value: String,
    },
    /// `//tag[@a="x" and @b="y" ...]`
    TagAttrs {
        /// Tag name
        tag: String,
        /// Attribute name/value conjunction
        pairs: Vec<(String, String)>,
    },
    /// `//tag[text()="..."]` or `//tag[contains(text(), "...")]`
    TagText {
        /// Tag name
        tag: String,
        /// Text to match against trimmed text content
        text: String,
        /// Substring match instead of exact
        contains: bool,
    },
    /// `//tag[contains(@class, "a") and contains(@class, "b")]`
    TagClasses {
        /// Tag name
        tag: String,
        /// Classes that must all be present
        classes: Vec<String>,
    },
    /// `//tag[.//child[text()="..."]]`
    DescendantText {
        /// Tag name of the outer element
        tag: String,
        /// Tag name of the identifying descendant
        child_tag: String,
        /// Descendant text
        text: String,
        /// Substring match instead of exact
        contains: bool,
    },
    /// `anchor/ancestor::tag[depth]//target` - the grid/card stabilizer
    Anchored {
        /// Probe selecting the anchor node(s)
        anchor: Box<PathProbe>,
        /// Ancestor tag to climb to
        ancestor_tag: String,
        /// 1-indexed ancestor occurrence
        depth: usize,
        /// Probe for the target within the ancestor subtree
        target: Box<PathProbe>,
    },
}

/// Read-only counting queries against whatever tree is available.
pub trait DomQuery {
    /// Number of nodes matching the probe.
    fn count(&self, probe: &PathProbe) -> usize;

    /// Whether the probe matches exactly one node.
    fn is_unique(&self, probe: &PathProbe) -> bool {
        self.count(probe) == 1
    }
}

/// Probing over a parsed document: real counts from a full tree walk.
#[derive(Debug)]
pub struct TreeQuery<'a> {
    doc: &'a Document,
}

impl<'a> TreeQuery<'a> {
    /// Wrap a parsed document.
    #[must_use]
    pub fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    fn matching_ids(&self, probe: &PathProbe) -> HashSet<NodeId> {
        match probe {
            PathProbe::Anchored {
                anchor,
                ancestor_tag,
                depth,
                target,
            } => {
                let mut out = HashSet::new();
                for anchor_el in self.doc.elements() {
                    if !matches(anchor_el, anchor) {
                        continue;
                    }
                    let Some(scope) = nth_ancestor(anchor_el, ancestor_tag, *depth) else {
                        continue;
                    };
                    for el in scope.descendants().filter_map(ElementRef::wrap) {
                        if matches(el, target) {
                            out.insert(el.id());
                        }
                    }
                }
                out
            }
            simple => self
                .doc
                .elements()
                .filter(|el| matches(*el, simple))
                .map(|el| el.id())
                .collect(),
        }
    }
}

impl DomQuery for TreeQuery<'_> {
    fn count(&self, probe: &PathProbe) -> usize {
        self.matching_ids(probe).len()
    }
}

/// No-verification probing for detached use: every count is zero, so no
/// candidate ever proves unique and the generator falls through to its
/// non-probed fallbacks.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedQuery;

impl DomQuery for DetachedQuery {
    fn count(&self, _probe: &PathProbe) -> usize {
        0
    }
}

/// The `depth`-th ancestor (1-indexed) carrying the given tag.
fn nth_ancestor<'a>(el: ElementRef<'a>, tag: &str, depth: usize) -> Option<ElementRef<'a>> {
    let mut seen = 0;
    let mut cursor = ElementDescriptor::new(el).parent();
    while let Some(d) = cursor {
        if d.tag() == tag {
            seen += 1;
            if seen == depth {
                return Some(d.element());
            }
        }
        cursor = d.parent();
    }
    None
}

fn matches(el: ElementRef<'_>, probe: &PathProbe) -> bool {
    let d = ElementDescriptor::new(el);
    match probe {
        PathProbe::Id(id) => d.id() == Some(id.as_str()),
        PathProbe::TagAttr { tag, attr, value } => {
            d.tag() == tag && d.attr(attr) == Some(value.as_str())
        }
        PathProbe::TagAttrs { tag, pairs } => {
            d.tag() == tag
                && pairs
                    .iter()
                    .all(|(attr, value)| d.attr(attr) == Some(value.as_str()))
        }
        PathProbe::TagText {
            tag,
            text,
            contains,
        } => {
            if d.tag() != tag {
                return false;
            }
            let own = d.text();
            if *contains {
                own.contains(text.as_str())
            } else {
                own == *text
            }
        }
        PathProbe::TagClasses { tag, classes } => {
            if d.tag() != tag {
                return false;
            }
            let have = d.classes();
            classes.iter().all(|c| have.contains(&c.as_str()))
        }
        PathProbe::DescendantText {
            tag,
            child_tag,
            text,
            contains,
        } => {
            d.tag() == tag
                && el
                    .descendants()
                    .skip(1)
                    .filter_map(ElementRef::wrap)
                    .any(|child| {
                        matches(
                            child,
                            &PathProbe::TagText {
                                tag: child_tag.clone(),
                                text: text.clone(),
                                contains: *contains,
                            },
                        )
                    })
        }
        // Anchored is handled at the counting level; a bare membership test
        // has no anchor context to resolve against.
        PathProbe::Anchored { .. } => false,
    }
}
