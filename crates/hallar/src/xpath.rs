//! Relative-XPath generation with uniqueness probing.
//!
//! Candidates are tried in order of expected stability and the first one
//! the [`DomQuery`] confirms unique wins. Every probe is built as a
//! structured [`PathProbe`] and rendered to an XPath string only once it
//! is accepted. With a probe that cannot verify anything (all counts
//! zero) the generator falls through to the positional path, which is
//! always produced.

use scraper::ElementRef;

use crate::descriptor::{strip_emoji, ElementDescriptor};
use crate::dom::{DomQuery, PathProbe};
use crate::dynamic::is_dynamic;

/// Attributes probed individually, in priority order.
const CURATED_ATTRS: &[&str] = &[
    "name",
    "placeholder",
    "data-testid",
    "data-test-id",
    "aria-label",
    "alt",
    "title",
    "type",
    "role",
];

/// Attributes never used for attribute-based candidates.
const SKIPPED_ATTRS: &[&str] = &["id", "class", "style"];

/// Tags whose short text can identify a sibling-level container.
const DESCENDANT_ANCHOR_TAGS: &[&str] =
    &["h1", "h2", "h3", "h4", "h5", "h6", "strong", "b", "span", "p", "label"];

/// Tags that can anchor an ancestor-scoped path.
const ANCESTOR_ANCHOR_TAGS: &[&str] =
    &["h1", "h2", "h3", "h4", "h5", "h6", "strong", "b", "a", "label", "span"];

/// Attributes allowed to pin the target inside an anchored path.
const ANCHOR_TARGET_ATTRS: &[&str] = &["name", "placeholder", "data-testid", "type"];

const MAX_ANCESTOR_LEVELS: usize = 6;
const MAX_ANCHOR_DEPTH: usize = 3;
const MAX_ANCHORS_PER_TAG: usize = 10;
const MAX_DESCENDANT_ANCHORS_PER_TAG: usize = 3;

/// Generate a relative XPath for the element, preferring probed-unique
/// candidates and degrading to a positional path.
#[must_use]
pub fn relative_xpath(el: ElementRef<'_>, probe: &dyn DomQuery) -> String {
    let d = ElementDescriptor::new(el);

    by_stable_id(&d, probe)
        .or_else(|| by_curated_attr(&d, probe))
        .or_else(|| by_other_attr(&d, probe))
        .or_else(|| by_unique_text(&d, probe))
        .or_else(|| by_classes(&d, probe))
        .or_else(|| by_attr_conjunction(&d, probe))
        .or_else(|| by_descendant_text(&d, probe))
        .or_else(|| by_ancestor_anchor(&d, probe))
        .unwrap_or_else(|| positional_path(&d))
}

/// Values containing a double quote cannot be quoted in our rendering.
fn quotable(value: &str) -> bool {
    !value.contains('"')
}

fn by_stable_id(d: &ElementDescriptor<'_>, probe: &dyn DomQuery) -> Option<String> {
    let id = d.id().filter(|id| !is_dynamic(id) && quotable(id))?;
    let any_tag = PathProbe::Id(id.to_string());
    if probe.is_unique(&any_tag) {
        return Some(format!("//*[@id=\"{id}\"]"));
    }
    let with_tag = PathProbe::TagAttr {
        tag: d.tag().to_string(),
        attr: "id".to_string(),
        value: id.to_string(),
    };
    if probe.is_unique(&with_tag) {
        return Some(format!("//{}[@id=\"{id}\"]", d.tag()));
    }
    None
}

fn attr_candidate(
    d: &ElementDescriptor<'_>,
    probe: &dyn DomQuery,
    attr: &str,
    value: &str,
) -> Option<String> {
    if value.is_empty() || is_dynamic(value) || !quotable(value) {
        return None;
    }
    let p = PathProbe::TagAttr {
        tag: d.tag().to_string(),
        attr: attr.to_string(),
        value: value.to_string(),
    };
    if probe.is_unique(&p) {
        Some(format!("//{}[@{attr}=\"{value}\"]", d.tag()))
    } else {
        None
    }
}

fn by_curated_attr(d: &ElementDescriptor<'_>, probe: &dyn DomQuery) -> Option<String> {
    CURATED_ATTRS.iter().find_map(|attr| {
        let value = d.attr(attr)?;
        attr_candidate(d, probe, attr, value)
    })
}

/// Scan any remaining attribute for a unique handle. Values longer than 60
/// characters are treated as payload rather than identity.
fn by_other_attr(d: &ElementDescriptor<'_>, probe: &dyn DomQuery) -> Option<String> {
    for (attr, value) in d.element().value().attrs() {
        if SKIPPED_ATTRS.contains(&attr) || CURATED_ATTRS.contains(&attr) {
            continue;
        }
        if value.is_empty() || value.len() >= 60 {
            continue;
        }
        if let Some(path) = attr_candidate(d, probe, attr, value) {
            return Some(path);
        }
    }
    None
}

fn by_unique_text(d: &ElementDescriptor<'_>, probe: &dyn DomQuery) -> Option<String> {
    let text = d.text();
    let len = text.chars().count();
    if len == 0 || len >= 50 || text.contains('\n') || !quotable(&text) {
        return None;
    }
    let exact = PathProbe::TagText {
        tag: d.tag().to_string(),
        text: text.clone(),
        contains: false,
    };
    if probe.is_unique(&exact) {
        return Some(format!("//{}[text()=\"{text}\"]", d.tag()));
    }
    // Emoji in the text often breaks exact matching at runtime; a contains()
    // on the stripped remainder is more robust when it stays unique.
    let stripped = strip_emoji(&text);
    if stripped != text && !stripped.is_empty() {
        let contains = PathProbe::TagText {
            tag: d.tag().to_string(),
            text: stripped.clone(),
            contains: true,
        };
        if probe.is_unique(&contains) {
            return Some(format!("//{}[contains(text(), \"{stripped}\")]", d.tag()));
        }
    }
    None
}

fn render_classes(tag: &str, classes: &[&str]) -> String {
    let preds = classes
        .iter()
        .map(|c| format!("contains(@class, \"{c}\")"))
        .collect::<Vec<_>>()
        .join(" and ");
    format!("//{tag}[{preds}]")
}

fn by_classes(d: &ElementDescriptor<'_>, probe: &dyn DomQuery) -> Option<String> {
    let classes: Vec<&str> = d
        .classes()
        .into_iter()
        .filter(|c| !is_dynamic(c) && quotable(c))
        .collect();

    for class in &classes {
        let p = PathProbe::TagClasses {
            tag: d.tag().to_string(),
            classes: vec![(*class).to_string()],
        };
        if probe.is_unique(&p) {
            return Some(render_classes(d.tag(), &[class]));
        }
    }
    for pair in classes.windows(2) {
        let p = PathProbe::TagClasses {
            tag: d.tag().to_string(),
            classes: pair.iter().map(|c| (*c).to_string()).collect(),
        };
        if probe.is_unique(&p) {
            return Some(render_classes(d.tag(), pair));
        }
    }
    None
}

/// Conjunction of type, name, and placeholder; only worth probing when at
/// least two are present.
fn by_attr_conjunction(d: &ElementDescriptor<'_>, probe: &dyn DomQuery) -> Option<String> {
    let pairs: Vec<(String, String)> = ["type", "name", "placeholder"]
        .iter()
        .filter_map(|attr| {
            let value = d.attr_non_empty(attr)?;
            if is_dynamic(value) || !quotable(value) {
                return None;
            }
            Some(((*attr).to_string(), value.to_string()))
        })
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    let p = PathProbe::TagAttrs {
        tag: d.tag().to_string(),
        pairs: pairs.clone(),
    };
    if probe.is_unique(&p) {
        let preds = pairs
            .iter()
            .map(|(a, v)| format!("@{a}=\"{v}\""))
            .collect::<Vec<_>>()
            .join(" and ");
        return Some(format!("//{}[{preds}]", d.tag()));
    }
    None
}

/// Pin the element by the short text of one of its own descendants.
fn by_descendant_text(d: &ElementDescriptor<'_>, probe: &dyn DomQuery) -> Option<String> {
    for child_tag in DESCENDANT_ANCHOR_TAGS {
        let mut seen = 0;
        for child in d
            .element()
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
        {
            if child.value().name() != *child_tag {
                continue;
            }
            seen += 1;
            if seen > MAX_DESCENDANT_ANCHORS_PER_TAG {
                break;
            }
            let text = ElementDescriptor::new(child).text();
            let len = text.chars().count();
            if len == 0 || len >= 50 || text.contains('\n') || !quotable(&text) {
                continue;
            }
            let p = PathProbe::DescendantText {
                tag: d.tag().to_string(),
                child_tag: (*child_tag).to_string(),
                text: text.clone(),
                contains: false,
            };
            if probe.is_unique(&p) {
                return Some(format!(
                    "//{}[.//{child_tag}[text()=\"{text}\"]]",
                    d.tag()
                ));
            }
        }
    }
    None
}

/// Probes identifying the target element inside an anchored scope: its own
/// text first, then a handful of pinning attributes.
fn anchored_target_probes(d: &ElementDescriptor<'_>) -> Vec<(PathProbe, String)> {
    let mut out = Vec::new();
    let text = d.text();
    let len = text.chars().count();
    if len > 0 && len < 50 && !text.contains('\n') && quotable(&text) {
        out.push((
            PathProbe::TagText {
                tag: d.tag().to_string(),
                text: text.clone(),
                contains: false,
            },
            format!("{}[text()=\"{text}\"]", d.tag()),
        ));
    }
    for attr in ANCHOR_TARGET_ATTRS {
        if let Some(value) = d.attr_non_empty(attr) {
            if is_dynamic(value) || !quotable(value) {
                continue;
            }
            out.push((
                PathProbe::TagAttr {
                    tag: d.tag().to_string(),
                    attr: (*attr).to_string(),
                    value: value.to_string(),
                },
                format!("{}[@{attr}=\"{value}\"]", d.tag()),
            ));
        }
    }
    out
}

/// Walk up through enclosing containers looking for a nearby element with
/// identifying text, then express the target relative to it. This is what
/// keeps "the Buy button inside the Pro card" stable across a grid of
/// identical cards.
fn by_ancestor_anchor(d: &ElementDescriptor<'_>, probe: &dyn DomQuery) -> Option<String> {
    let targets = anchored_target_probes(d);
    if targets.is_empty() {
        return None;
    }

    let mut scope = d.parent();
    for _ in 0..MAX_ANCESTOR_LEVELS {
        let container = scope?;
        for anchor_tag in ANCESTOR_ANCHOR_TAGS {
            let mut seen = 0;
            for anchor in container
                .element()
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
            {
                if anchor.value().name() != *anchor_tag {
                    continue;
                }
                seen += 1;
                if seen > MAX_ANCHORS_PER_TAG {
                    break;
                }
                if anchor.id() == d.element().id() {
                    continue;
                }
                let anchor_text = ElementDescriptor::new(anchor).text();
                let tlen = anchor_text.chars().count();
                if tlen <= 2 || tlen >= 100 || !quotable(&anchor_text) {
                    continue;
                }
                let anchor_probe = PathProbe::TagText {
                    tag: (*anchor_tag).to_string(),
                    text: anchor_text.clone(),
                    contains: false,
                };
                if !probe.is_unique(&anchor_probe) {
                    continue;
                }
                for depth in 1..=MAX_ANCHOR_DEPTH {
                    for (target_probe, target_str) in &targets {
                        let p = PathProbe::Anchored {
                            anchor: Box::new(anchor_probe.clone()),
                            ancestor_tag: container.tag().to_string(),
                            depth,
                            target: Box::new(target_probe.clone()),
                        };
                        if probe.is_unique(&p) {
                            return Some(format!(
                                "//{anchor_tag}[text()=\"{anchor_text}\"]/ancestor::{}[{depth}]//{target_str}",
                                container.tag()
                            ));
                        }
                    }
                }
            }
        }
        scope = container.parent();
    }
    None
}

/// Last resort: an indexed path from the nearest stable-id ancestor (or the
/// top of the fragment) down to the element.
fn positional_path(d: &ElementDescriptor<'_>) -> String {
    let mut segments = Vec::new();
    let mut cursor = Some(*d);

    while let Some(current) = cursor {
        let tag = current.tag();
        if tag == "html" || tag == "body" {
            break;
        }
        if let Some(id) = current.id() {
            // Segments already collected hang below this anchor.
            if !is_dynamic(id) && quotable(id) && !segments.is_empty() {
                segments.push(format!("*[@id=\"{id}\"]"));
                segments.reverse();
                return format!("//{}", segments.join("/"));
            }
        }
        let (index, has_same) = current.sibling_position();
        if has_same {
            segments.push(format!("{tag}[{}]", index + 1));
        } else {
            segments.push(tag.to_string());
        }
        cursor = current.parent();
    }

    segments.reverse();
    format!("//{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::dom::{DetachedQuery, TreeQuery};

    fn xpath_for(html: &str, css: &str) -> String {
        let doc = Document::parse(html).unwrap();
        let probe = TreeQuery::new(&doc);
        let el = doc.select(css).unwrap()[0];
        relative_xpath(el, &probe)
    }

    #[test]
    fn stable_id_wins() {
        let x = xpath_for("<div id=\"main\"><input id=\"email\"></div>", "input");
        assert_eq!(x, "//*[@id=\"email\"]");
    }

    #[test]
    fn duplicated_id_narrows_by_tag() {
        let x = xpath_for(
            "<div id=\"dup\"></div><input id=\"dup\">",
            "input",
        );
        assert_eq!(x, "//input[@id=\"dup\"]");
    }

    #[test]
    fn dynamic_id_is_skipped() {
        let x = xpath_for("<input id=\"ember482\" name=\"email\">", "input");
        assert_eq!(x, "//input[@name=\"email\"]");
    }

    #[test]
    fn curated_attr_order_prefers_name() {
        let x = xpath_for(
            "<input name=\"q\" placeholder=\"Search\"><input placeholder=\"Other\">",
            "input[name=q]",
        );
        assert_eq!(x, "//input[@name=\"q\"]");
    }

    #[test]
    fn uncommon_attribute_is_scanned() {
        let x = xpath_for(
            "<button data-action=\"save-draft\">Go</button><button>Go</button>",
            "button[data-action]",
        );
        assert_eq!(x, "//button[@data-action=\"save-draft\"]");
    }

    #[test]
    fn unique_text_candidate() {
        let x = xpath_for(
            "<button class=\"ember482\">Checkout</button><button>Back</button>",
            "button.ember482",
        );
        assert_eq!(x, "//button[text()=\"Checkout\"]");
    }

    #[test]
    fn duplicate_text_falls_through() {
        let x = xpath_for(
            "<button class=\"btn primary\">Buy</button><button class=\"btn\">Buy</button>",
            "button.primary",
        );
        assert_eq!(x, "//button[contains(@class, \"primary\")]");
    }

    #[test]
    fn class_pair_when_single_classes_repeat() {
        let x = xpath_for(
            "<a class=\"nav top\">x</a><a class=\"nav\">x</a><a class=\"top\">x</a>",
            "a.nav.top",
        );
        assert_eq!(
            x,
            "//a[contains(@class, \"nav\") and contains(@class, \"top\")]"
        );
    }

    #[test]
    fn attr_conjunction_of_type_and_name() {
        // Neither type nor name is unique alone; the pair is.
        let html = "<input type=\"text\" name=\"user\">\
                    <input type=\"password\" name=\"user\">\
                    <input type=\"password\" name=\"admin\">";
        let x = xpath_for(html, "input[type=password][name=user]");
        assert_eq!(x, "//input[@type=\"password\" and @name=\"user\"]");
    }

    #[test]
    fn ancestor_anchor_disambiguates_cards() {
        let html = r#"
            <div class="card"><h3>Basic plan</h3><button>Buy</button></div>
            <div class="card"><h3>Pro plan</h3><button>Buy</button></div>
        "#;
        let x = xpath_for(html, "div.card:nth-child(2) > button");
        assert_eq!(
            x,
            "//h3[text()=\"Pro plan\"]/ancestor::div[1]//button[text()=\"Buy\"]"
        );
    }

    #[test]
    fn positional_path_stops_at_stable_id_ancestor() {
        let html = r#"
            <div id="menu">
                <ul><li>a</li><li>b</li><li>b</li></ul>
            </div>
        "#;
        let x = xpath_for(html, "li:nth-child(2)");
        assert_eq!(x, "//*[@id=\"menu\"]/ul/li[2]");
    }

    #[test]
    fn detached_probe_degrades_to_positional() {
        let doc = Document::parse("<div><span>only</span></div>").unwrap();
        let el = doc.select("span").unwrap()[0];
        let x = relative_xpath(el, &DetachedQuery);
        assert_eq!(x, "//div/span");
    }
}
