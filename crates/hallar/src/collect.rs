//! Element collection: walk a document, find everything a test would
//! interact with, and give each element a unique snake_case name, a full
//! strategy set, and an inferred default action.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use scraper::ElementRef;

use crate::descriptor::ElementDescriptor;
use crate::document::Document;
use crate::dom::DomQuery;
use crate::rank;
use crate::result::HallarResult;
use crate::strategy::{StrategyEngine, StrategyResult, StrategySet};

/// Form controls, collected first.
const FORM_SELECTOR: &str = "input, textarea, select";

/// Clickable elements, collected second.
const CLICKABLE_SELECTOR: &str = "button, input[type=\"submit\"], input[type=\"button\"], \
                                  a, [role=\"button\"], [role=\"link\"], [onclick], img";

/// Input types whose default interaction is typing.
const FILLABLE_INPUT_TYPES: &[&str] = &[
    "text",
    "password",
    "email",
    "search",
    "tel",
    "url",
    "number",
    "date",
    "datetime-local",
];

/// Maximum raw-name length before sanitization.
const MAX_RAW_NAME_LEN: usize = 20;

/// The default interaction for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Click it
    Click,
    /// Type into it
    Fill,
    /// Check it
    Check,
    /// Choose an option
    SelectOption,
}

/// One collected element: a stable name plus everything needed to emit
/// code for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NamedElement {
    /// Unique snake_case identifier within the collection
    pub unique_name: String,
    /// The ranked-best strategy
    pub best: StrategyResult,
    /// Every applicable strategy
    pub strategies: StrategySet,
    /// Default interaction
    pub action: Action,
    /// Lowercase tag name
    pub tag: String,
}

/// Hands out unique names, suffixing repeats with `_2`, `_3`, and so on.
#[derive(Debug, Default)]
pub struct NameRegistry {
    taken: HashMap<String, usize>,
}

impl NameRegistry {
    /// Fresh registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a name, appending a numeric suffix when it is already taken.
    pub fn claim(&mut self, base: &str) -> String {
        let count = {
            let c = self.taken.entry(base.to_string()).or_insert(0);
            *c += 1;
            *c
        };
        if count == 1 {
            return base.to_string();
        }
        let mut n = count;
        loop {
            let candidate = format!("{base}_{n}");
            let slot = self.taken.entry(candidate.clone()).or_insert(0);
            if *slot == 0 {
                *slot = 1;
                return candidate;
            }
            n += 1;
        }
    }
}

/// Infer the default interaction from the element kind.
#[must_use]
pub fn infer_action(d: &ElementDescriptor<'_>) -> Action {
    match d.tag() {
        "select" => Action::SelectOption,
        "textarea" => Action::Fill,
        "input" => {
            let t = d.input_type();
            if t == "checkbox" || t == "radio" {
                Action::Check
            } else if FILLABLE_INPUT_TYPES.contains(&t.as_str()) {
                Action::Fill
            } else {
                Action::Click
            }
        }
        _ => Action::Click,
    }
}

/// Collect interactive elements from a document with the given probing
/// capability: form controls first, clickables second, each with a unique
/// name, a full strategy set, and the ranked-best strategy.
pub fn collect_with(doc: &Document, probe: &dyn DomQuery) -> HallarResult<Vec<NamedElement>> {
    let engine = StrategyEngine::new(doc, probe);
    let mut registry = NameRegistry::new();
    let mut out = Vec::new();
    let mut seen_best: Vec<StrategyResult> = Vec::new();

    for el in doc.select(FORM_SELECTOR)? {
        let d = ElementDescriptor::new(el);
        if d.tag() == "input" && d.input_type() == "hidden" {
            continue;
        }
        let raw = form_raw_name(&d);
        push_entry(&engine, &mut registry, &mut out, &mut seen_best, false, el, &raw);
    }

    // Clickables dedup against everything already collected, including the
    // form pass: an element matching both passes must appear once. The form
    // pass itself never dedups, distinct fields may share an unnamed role.
    for el in doc.select(CLICKABLE_SELECTOR)? {
        let d = ElementDescriptor::new(el);
        if d.is_inert_anchor() {
            continue;
        }
        // Button-like inputs already landed in the first pass.
        if d.tag() == "input"
            && matches!(d.input_type().as_str(), "submit" | "button" | "image" | "reset")
        {
            continue;
        }
        let raw = clickable_raw_name(&d);
        push_entry(&engine, &mut registry, &mut out, &mut seen_best, true, el, &raw);
    }

    tracing::debug!(elements = out.len(), "collection finished");
    Ok(out)
}

fn push_entry(
    engine: &StrategyEngine<'_>,
    registry: &mut NameRegistry,
    out: &mut Vec<NamedElement>,
    seen_best: &mut Vec<StrategyResult>,
    dedup: bool,
    el: ElementRef<'_>,
    raw_name: &str,
) {
    let strategies = engine.all(el);
    let best = rank::best(&strategies);
    if dedup && seen_best.contains(&best) {
        tracing::trace!(value = %best.raw_value, "skipping duplicate best selector");
        return;
    }

    let d = ElementDescriptor::new(el);
    let Some(stem) = normalize_name(raw_name) else {
        tracing::trace!(raw = raw_name, "skipping element with unusable name");
        return;
    };
    let base = format!("{stem}{}", type_suffix(&d));
    let unique_name = registry.claim(&base);

    seen_best.push(best.clone());
    out.push(NamedElement {
        unique_name,
        best,
        strategies,
        action: infer_action(&d),
        tag: d.tag().to_string(),
    });
}

fn form_raw_name(d: &ElementDescriptor<'_>) -> String {
    d.attr_non_empty("name")
        .or_else(|| d.id())
        .or_else(|| d.attr_non_empty("placeholder"))
        .or_else(|| d.aria_label())
        .unwrap_or("input")
        .to_string()
}

fn clickable_raw_name(d: &ElementDescriptor<'_>) -> String {
    let text = d.text_collapsed();
    let raw = if !text.is_empty() {
        text
    } else {
        d.id()
            .or_else(|| d.aria_label())
            .or_else(|| d.attr_non_empty("title"))
            .unwrap_or(d.tag())
            .to_string()
    };
    raw.chars().take(MAX_RAW_NAME_LEN).collect()
}

/// Sanitize a raw name into a snake_case identifier. Values that reduce to
/// nothing, or to digits only, mark the element unusable: `None` means the
/// collector skips it rather than inventing a name. Truncation is the
/// clickable pass's concern; derived form-control names keep their full
/// length.
#[must_use]
pub fn normalize_name(raw: &str) -> Option<String> {
    let sanitized: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let trimmed = sanitized.trim_matches('_');
    if trimmed.is_empty() || trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Type suffix appended to the sanitized name.
#[must_use]
pub fn type_suffix(d: &ElementDescriptor<'_>) -> &'static str {
    match d.tag() {
        "textarea" => "_input",
        "select" => "_select",
        "button" => "_button",
        "a" => "_link",
        "input" => match d.input_type().as_str() {
            "checkbox" => "_checkbox",
            "radio" => "_radio",
            "submit" | "button" => "_button",
            _ => "_input",
        },
        _ => "_elem",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(html: &str) -> Vec<NamedElement> {
        Document::parse(html).unwrap().collect().unwrap()
    }

    #[test]
    fn registry_appends_numeric_suffixes() {
        let mut r = NameRegistry::new();
        assert_eq!(r.claim("email_input"), "email_input");
        assert_eq!(r.claim("email_input"), "email_input_2");
        assert_eq!(r.claim("email_input"), "email_input_3");
        assert_eq!(r.claim("other"), "other");
    }

    #[test]
    fn normalization_lowercases_and_underscores() {
        assert_eq!(normalize_name("Search Box!").as_deref(), Some("search_box"));
        assert_eq!(
            normalize_name("Email Address").as_deref(),
            Some("email_address")
        );
        assert_eq!(normalize_name("123456"), None);
        assert_eq!(normalize_name("!!!"), None);
        assert_eq!(
            normalize_name("shipping_address_line_one").as_deref(),
            Some("shipping_address_line_one")
        );
    }

    #[test]
    fn form_controls_come_first() {
        let html = "<button>Go</button><input name=\"email\">";
        let names: Vec<_> = collect(html).into_iter().map(|e| e.unique_name).collect();
        assert_eq!(names, vec!["email_input", "go_button"]);
    }

    #[test]
    fn hidden_inputs_are_skipped() {
        let html = "<input type=\"hidden\" name=\"csrf\"><input name=\"q\">";
        let entries = collect(html);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].unique_name, "q_input");
    }

    #[test]
    fn inert_anchors_are_skipped() {
        let html = "<a>not a link</a><a href=\"/next\">Next</a>";
        let entries = collect(html);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].unique_name, "next_link");
    }

    #[test]
    fn submit_inputs_are_not_collected_twice() {
        let html = "<input type=\"submit\" value=\"Send\">";
        let entries = collect(html);
        assert_eq!(entries.len(), 1);
        // Form-pass names come from name/id/placeholder, not the value.
        assert_eq!(entries[0].unique_name, "input_button");
    }

    #[test]
    fn clickable_form_controls_are_not_collected_twice() {
        // Matches both passes: a form control that is also `[onclick]`.
        let html = "<input type=\"text\" onclick=\"go()\" name=\"q\">";
        let entries = collect(html);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].unique_name, "q_input");
    }

    #[test]
    fn purely_numeric_names_skip_the_element() {
        assert!(collect("<input name=\"12345\">").is_empty());
        assert!(collect("<button>12345</button>").is_empty());
        // Other elements on the page are unaffected.
        let entries = collect("<input name=\"12345\"><input name=\"q\">");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].unique_name, "q_input");
    }

    #[test]
    fn form_control_names_keep_their_full_length() {
        let entries = collect("<input name=\"shipping_address_line_one\">");
        assert_eq!(entries[0].unique_name, "shipping_address_line_one_input");
    }

    #[test]
    fn image_and_reset_inputs_take_the_input_suffix() {
        let html = "<input type=\"image\" name=\"go\"><input type=\"reset\" name=\"clear\">";
        let names: Vec<_> = collect(html).into_iter().map(|e| e.unique_name).collect();
        assert_eq!(names, vec!["go_input", "clear_input"]);
    }

    #[test]
    fn name_collisions_get_suffixes() {
        let html = "<input name=\"email\"><input id=\"email\" type=\"email\">";
        let names: Vec<_> = collect(html).into_iter().map(|e| e.unique_name).collect();
        assert_eq!(names, vec!["email_input", "email_input_2"]);
    }

    #[test]
    fn duplicate_best_selectors_are_deduplicated() {
        // Both anchors resolve to the same named role locator.
        let html = "<a href=\"/a\">Home</a><a href=\"/b\">Home</a>";
        let entries = collect(html);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn actions_follow_element_kind() {
        let html = "<input name=\"a\"><input type=\"checkbox\" name=\"b\">\
                    <select name=\"c\"></select><textarea name=\"d\"></textarea>\
                    <button>Go</button><input type=\"color\" name=\"e\">";
        let entries = collect(html);
        let by_name: HashMap<_, _> = entries
            .iter()
            .map(|e| (e.unique_name.clone(), e.action))
            .collect();
        assert_eq!(by_name["a_input"], Action::Fill);
        assert_eq!(by_name["b_checkbox"], Action::Check);
        assert_eq!(by_name["c_select"], Action::SelectOption);
        assert_eq!(by_name["d_input"], Action::Fill);
        assert_eq!(by_name["go_button"], Action::Click);
        assert_eq!(by_name["e_input"], Action::Click);
    }

    #[test]
    fn long_text_names_are_truncated() {
        let html = "<button>This is a very long button label indeed</button>";
        let entries = collect(html);
        assert_eq!(entries[0].unique_name, "this_is_a_very_long_button");
    }
}
