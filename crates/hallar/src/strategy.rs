//! Strategy generators: nine independent attempts at locating one element.
//!
//! Each generator either returns a non-empty [`StrategyResult`] or signals
//! "not applicable" with `None`. Inapplicability is routine control flow,
//! not an error. The CSS and XPath fallbacks always produce a value.

use serde::{Deserialize, Serialize};
use scraper::ElementRef;

use crate::descriptor::{strip_emoji, ElementDescriptor};
use crate::document::Document;
use crate::dom::DomQuery;
use crate::dynamic::is_dynamic;
use crate::xpath;

/// Maximum length (in characters) for text-derived locator values.
pub const MAX_TEXT_LEN: usize = 50;

/// Roles allowed to carry an accessible name in a role locator.
pub const NAMEABLE_ROLES: &[&str] = &[
    "button",
    "link",
    "heading",
    "checkbox",
    "radio",
    "img",
    "textbox",
    "searchbox",
    "spinbutton",
    "combobox",
    "listbox",
    "listitem",
    "list",
    "tab",
    "switch",
];

/// Which heuristic produced a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyType {
    /// ARIA role, optionally paired with an accessible name
    Role,
    /// Visible text content
    Text,
    /// Bound `<label>` or `aria-label`
    Label,
    /// `placeholder` attribute
    Placeholder,
    /// `alt` attribute
    Alt,
    /// `title` attribute
    Title,
    /// Dedicated test-id attribute
    #[serde(rename = "testid")]
    TestId,
    /// CSS path fallback
    Css,
    /// XPath fallback
    #[serde(rename = "xpath")]
    XPath,
}

/// The accessor family a generated snippet should call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorMethod {
    /// Role-based accessor
    ByRole,
    /// Text accessor
    ByText,
    /// Label accessor
    ByLabel,
    /// Placeholder accessor
    ByPlaceholder,
    /// Alt-text accessor
    ByAltText,
    /// Title accessor
    ByTitle,
    /// Test-id accessor
    ByTestId,
    /// Generic locator accessor taking the raw selector string
    RawLocator,
}

/// One strategy's output for one element. Immutable once returned;
/// `raw_value` is never empty for an applicable strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Which strategy produced this
    pub strategy_type: StrategyType,
    /// The raw locator value (for role: `role` or `role|name`)
    pub raw_value: String,
    /// The accessor family for code emission
    pub method: LocatorMethod,
}

impl StrategyResult {
    fn new(strategy_type: StrategyType, raw_value: impl Into<String>, method: LocatorMethod) -> Self {
        let raw_value = raw_value.into();
        debug_assert!(!raw_value.is_empty(), "applicable strategies carry a value");
        Self {
            strategy_type,
            raw_value,
            method,
        }
    }

    /// For role results: the role plus the optional accessible name.
    #[must_use]
    pub fn role_parts(&self) -> (&str, Option<&str>) {
        match self.raw_value.split_once('|') {
            Some((role, name)) => (role, Some(name)),
            None => (self.raw_value.as_str(), None),
        }
    }

    /// Whether this is a role locator that carries an accessible name.
    #[must_use]
    pub fn has_role_name(&self) -> bool {
        self.strategy_type == StrategyType::Role && self.raw_value.contains('|')
    }
}

/// Every strategy's output for one element. CSS and XPath are always
/// present; the rest only when applicable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategySet {
    /// Role strategy, when a role resolves
    pub role: Option<StrategyResult>,
    /// Text strategy
    pub text: Option<StrategyResult>,
    /// Label strategy
    pub label: Option<StrategyResult>,
    /// Placeholder strategy
    pub placeholder: Option<StrategyResult>,
    /// Alt-text strategy
    pub alt: Option<StrategyResult>,
    /// Title strategy
    pub title: Option<StrategyResult>,
    /// Test-id strategy
    pub testid: Option<StrategyResult>,
    /// CSS fallback (always applicable)
    pub css: StrategyResult,
    /// XPath fallback (always applicable)
    pub xpath: StrategyResult,
}

/// Runs the generators against one document. The probing capability is
/// only consulted by the XPath fallback.
pub struct StrategyEngine<'a> {
    doc: &'a Document,
    probe: &'a dyn DomQuery,
}

impl std::fmt::Debug for StrategyEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyEngine").finish_non_exhaustive()
    }
}

impl<'a> StrategyEngine<'a> {
    /// Create an engine over a document with the given probing capability.
    #[must_use]
    pub fn new(doc: &'a Document, probe: &'a dyn DomQuery) -> Self {
        Self { doc, probe }
    }

    /// Run every generator.
    #[must_use]
    pub fn all(&self, el: ElementRef<'_>) -> StrategySet {
        StrategySet {
            role: self.by_role(el),
            text: self.by_text(el),
            label: self.by_label(el),
            placeholder: self.by_placeholder(el),
            alt: self.by_alt_text(el),
            title: self.by_title(el),
            testid: self.by_test_id(el),
            css: self.css_path(el),
            xpath: self.xpath(el),
        }
    }

    /// Role strategy: explicit `role` attribute or the implicit-role table.
    ///
    /// Accessible name precedence is text content, then `aria-label`, then
    /// `title`, then input `value`; the name is whitespace-collapsed and
    /// emoji-stripped, and only nameable roles under [`MAX_TEXT_LEN`]
    /// characters carry one. A role without a usable name is still emitted
    /// alone.
    #[must_use]
    pub fn by_role(&self, el: ElementRef<'_>) -> Option<StrategyResult> {
        let d = ElementDescriptor::new(el);
        let role = d
            .attr_non_empty("role")
            .map(str::to_string)
            .or_else(|| implicit_role(&d).map(str::to_string))?;

        if !NAMEABLE_ROLES.contains(&role.as_str()) {
            return None;
        }

        let name = accessible_name(&d);
        if let Some(name) = name {
            let clean = strip_emoji(&name);
            if !clean.is_empty() && clean.chars().count() < MAX_TEXT_LEN {
                return Some(StrategyResult::new(
                    StrategyType::Role,
                    format!("{role}|{clean}"),
                    LocatorMethod::ByRole,
                ));
            }
        }
        Some(StrategyResult::new(
            StrategyType::Role,
            role,
            LocatorMethod::ByRole,
        ))
    }

    /// Text strategy: trimmed text content, applicable only for lengths in
    /// `(0, MAX_TEXT_LEN)`.
    #[must_use]
    pub fn by_text(&self, el: ElementRef<'_>) -> Option<StrategyResult> {
        let text = ElementDescriptor::new(el).text();
        let len = text.chars().count();
        if len == 0 || len >= MAX_TEXT_LEN {
            return None;
        }
        Some(StrategyResult::new(
            StrategyType::Text,
            strip_emoji(&text),
            LocatorMethod::ByText,
        ))
    }

    /// Label strategy: a `<label for=ID>` bound within the analyzed root,
    /// falling back to `aria-label`.
    #[must_use]
    pub fn by_label(&self, el: ElementRef<'_>) -> Option<StrategyResult> {
        let d = ElementDescriptor::new(el);
        let label = d
            .id()
            .and_then(|id| self.doc.label_for(id))
            .or_else(|| d.aria_label().map(str::to_string))?;
        Some(StrategyResult::new(
            StrategyType::Label,
            strip_emoji(&label),
            LocatorMethod::ByLabel,
        ))
    }

    /// Placeholder strategy: direct attribute read.
    #[must_use]
    pub fn by_placeholder(&self, el: ElementRef<'_>) -> Option<StrategyResult> {
        attribute_strategy(el, "placeholder", StrategyType::Placeholder, LocatorMethod::ByPlaceholder)
    }

    /// Alt-text strategy: direct attribute read.
    #[must_use]
    pub fn by_alt_text(&self, el: ElementRef<'_>) -> Option<StrategyResult> {
        attribute_strategy(el, "alt", StrategyType::Alt, LocatorMethod::ByAltText)
    }

    /// Title strategy: direct attribute read.
    #[must_use]
    pub fn by_title(&self, el: ElementRef<'_>) -> Option<StrategyResult> {
        attribute_strategy(el, "title", StrategyType::Title, LocatorMethod::ByTitle)
    }

    /// Test-id strategy: first of the dedicated test-id attributes.
    #[must_use]
    pub fn by_test_id(&self, el: ElementRef<'_>) -> Option<StrategyResult> {
        let val = ElementDescriptor::new(el).test_id()?;
        Some(StrategyResult::new(
            StrategyType::TestId,
            val,
            LocatorMethod::ByTestId,
        ))
    }

    /// CSS fallback: test-id attribute, stable id, stable name, stable
    /// classes, bare tag - the first that survives the dynamic-value gate.
    #[must_use]
    pub fn css_path(&self, el: ElementRef<'_>) -> StrategyResult {
        let d = ElementDescriptor::new(el);
        let value = css_fallback(&d);
        StrategyResult::new(StrategyType::Css, value, LocatorMethod::RawLocator)
    }

    /// XPath fallback, probing candidate paths for uniqueness through the
    /// configured [`DomQuery`].
    #[must_use]
    pub fn xpath(&self, el: ElementRef<'_>) -> StrategyResult {
        let value = xpath::relative_xpath(el, self.probe);
        StrategyResult::new(StrategyType::XPath, value, LocatorMethod::RawLocator)
    }
}

/// Accessible name candidates in canonical precedence: text content,
/// `aria-label`, `title`, input `value`.
fn accessible_name(d: &ElementDescriptor<'_>) -> Option<String> {
    let text = d.text_collapsed();
    if !text.is_empty() {
        return Some(text);
    }
    if let Some(label) = d.aria_label() {
        return Some(label.to_string());
    }
    if let Some(title) = d.attr_non_empty("title") {
        return Some(title.to_string());
    }
    if d.tag() == "input" {
        if let Some(value) = d.attr_non_empty("value") {
            return Some(value.to_string());
        }
    }
    None
}

/// Implicit-role table keyed by tag and input type.
fn implicit_role(d: &ElementDescriptor<'_>) -> Option<&'static str> {
    match d.tag() {
        "button" => Some("button"),
        "a" if d.attr("href").is_some() => Some("link"),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some("heading"),
        "img" => Some("img"),
        "ul" | "ol" => Some("list"),
        "li" => Some("listitem"),
        "textarea" => Some("textbox"),
        "select" => {
            let multiple = d.attr("multiple").is_some();
            let size_over_one = d
                .attr("size")
                .and_then(|s| s.parse::<u32>().ok())
                .is_some_and(|s| s > 1);
            if multiple || size_over_one {
                Some("listbox")
            } else {
                Some("combobox")
            }
        }
        "input" => match d.input_type().as_str() {
            "button" | "submit" | "reset" | "image" => Some("button"),
            "checkbox" => Some("checkbox"),
            "radio" => Some("radio"),
            "search" => Some("searchbox"),
            "number" => Some("spinbutton"),
            "text" | "email" | "password" | "tel" | "url" => Some("textbox"),
            _ => None,
        },
        _ => None,
    }
}

fn attribute_strategy(
    el: ElementRef<'_>,
    attr: &str,
    strategy_type: StrategyType,
    method: LocatorMethod,
) -> Option<StrategyResult> {
    let val = ElementDescriptor::new(el).attr_non_empty(attr)?;
    Some(StrategyResult::new(strategy_type, strip_emoji(val), method))
}

fn css_fallback(d: &ElementDescriptor<'_>) -> String {
    if let Some(test_id) = d
        .attr_non_empty("data-testid")
        .or_else(|| d.attr_non_empty("data-test"))
    {
        if !is_dynamic(test_id) {
            return format!("[data-testid=\"{test_id}\"]");
        }
    }
    if let Some(id) = d.id() {
        if !is_dynamic(id) {
            return format!("#{id}");
        }
    }
    if let Some(name) = d.attr_non_empty("name") {
        if !is_dynamic(name) {
            return format!("[name=\"{name}\"]");
        }
    }
    let classes: Vec<&str> = d
        .classes()
        .into_iter()
        .filter(|c| !is_dynamic(c))
        .collect();
    if classes.is_empty() {
        d.tag().to_string()
    } else {
        format!("{}.{}", d.tag(), classes.join("."))
    }
}
