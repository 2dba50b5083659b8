//! Tabular locator report and JSON export.

use serde::Serialize;

use hallar::{NamedElement, StrategyResult};

use crate::error::Result;
use crate::snippet::{selector_string, snippet};
use crate::Language;

/// Strategy rows in ranking order, labeled for display.
fn strategy_rows(e: &NamedElement) -> Vec<(&'static str, &StrategyResult)> {
    let s = &e.strategies;
    let mut rows: Vec<(&'static str, Option<&StrategyResult>)> = vec![
        ("role", s.role.as_ref()),
        ("testid", s.testid.as_ref()),
        ("text", s.text.as_ref()),
        ("label", s.label.as_ref()),
        ("placeholder", s.placeholder.as_ref()),
        ("alt", s.alt.as_ref()),
        ("title", s.title.as_ref()),
    ];
    rows.push(("css", Some(&s.css)));
    rows.push(("xpath", Some(&s.xpath)));
    rows.into_iter()
        .filter_map(|(label, r)| r.map(|r| (label, r)))
        .collect()
}

/// Render the plain-text report: one block per element, every applicable
/// strategy with its snippet, the chosen best marked with an asterisk.
#[must_use]
pub fn render_report(entries: &[NamedElement], lang: Language) -> String {
    let mut out = String::new();
    for e in entries {
        out.push_str(&format!(
            "{} <{}> ({:?})\n",
            e.unique_name,
            e.tag,
            e.action
        ));
        for (label, r) in strategy_rows(e) {
            let marker = if *r == e.best { '*' } else { ' ' };
            out.push_str(&format!(
                "  {marker} {label:<12} {:<40} {}\n",
                selector_string(r),
                snippet(r, e.action, lang)
            ));
        }
        out.push('\n');
    }
    if entries.is_empty() {
        out.push_str("no interactive elements found\n");
    }
    out
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    #[serde(flatten)]
    element: &'a NamedElement,
    selector: String,
    snippet: String,
}

/// Serialize entries with the display selector and an example snippet for
/// the chosen best strategy.
pub fn to_json(entries: &[NamedElement], lang: Language) -> Result<String> {
    let wrapped: Vec<JsonEntry<'_>> = entries
        .iter()
        .map(|e| JsonEntry {
            element: e,
            selector: selector_string(&e.best),
            snippet: snippet(&e.best, e.action, lang),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&wrapped)?)
}
