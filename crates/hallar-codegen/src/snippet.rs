//! Per-language locator expressions and action statements.

use hallar::{Action, LocatorMethod, StrategyResult};

use crate::Language;

/// Placeholder argument used in fill and select statements.
const SAMPLE_VALUE: &str = "value";

/// Escape a value for a single-quoted string literal.
#[must_use]
pub fn escape_single(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Escape a value for a double-quoted string literal.
#[must_use]
pub fn escape_double(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// snake_case to camelCase, for Java member names.
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// The canonical display form of a selector, as shown in reports and
/// stored in emitted page-object properties.
#[must_use]
pub fn selector_string(result: &StrategyResult) -> String {
    match result.method {
        LocatorMethod::ByRole => {
            let (role, name) = result.role_parts();
            match name {
                Some(name) => format!("role={role}[name=\"{name}\"]"),
                None => format!("role={role}"),
            }
        }
        LocatorMethod::ByText => format!("text=\"{}\"", result.raw_value),
        LocatorMethod::ByLabel => format!("label=\"{}\"", result.raw_value),
        LocatorMethod::ByPlaceholder => format!("placeholder=\"{}\"", result.raw_value),
        LocatorMethod::ByAltText => format!("alt=\"{}\"", result.raw_value),
        LocatorMethod::ByTitle => format!("title=\"{}\"", result.raw_value),
        LocatorMethod::ByTestId => format!("[data-testid=\"{}\"]", result.raw_value),
        LocatorMethod::RawLocator => result.raw_value.clone(),
    }
}

/// The Java `AriaRole` constant for a role string.
fn aria_role(role: &str) -> String {
    let upper = role.to_ascii_uppercase();
    // Playwright's Java enum spells it IMG.
    if upper == "IMAGE" {
        "IMG".to_string()
    } else {
        upper
    }
}

/// The locator expression for one strategy, without an action.
#[must_use]
pub fn locator_expr(result: &StrategyResult, lang: Language) -> String {
    let v = &result.raw_value;
    match lang {
        Language::TypeScript => match result.method {
            LocatorMethod::ByRole => {
                let (role, name) = result.role_parts();
                match name {
                    Some(name) => format!(
                        "page.getByRole('{role}', {{ name: '{}' }})",
                        escape_single(name)
                    ),
                    None => format!("page.getByRole('{role}')"),
                }
            }
            LocatorMethod::ByText => format!("page.getByText('{}')", escape_single(v)),
            LocatorMethod::ByLabel => format!("page.getByLabel('{}')", escape_single(v)),
            LocatorMethod::ByPlaceholder => {
                format!("page.getByPlaceholder('{}')", escape_single(v))
            }
            LocatorMethod::ByAltText => format!("page.getByAltText('{}')", escape_single(v)),
            LocatorMethod::ByTitle => format!("page.getByTitle('{}')", escape_single(v)),
            LocatorMethod::ByTestId => format!("page.getByTestId('{}')", escape_single(v)),
            LocatorMethod::RawLocator => format!("page.locator('{}')", escape_single(v)),
        },
        Language::Python => match result.method {
            LocatorMethod::ByRole => {
                let (role, name) = result.role_parts();
                match name {
                    Some(name) => format!(
                        "page.get_by_role('{role}', name='{}')",
                        escape_single(name)
                    ),
                    None => format!("page.get_by_role('{role}')"),
                }
            }
            LocatorMethod::ByText => format!("page.get_by_text('{}')", escape_single(v)),
            LocatorMethod::ByLabel => format!("page.get_by_label('{}')", escape_single(v)),
            LocatorMethod::ByPlaceholder => {
                format!("page.get_by_placeholder('{}')", escape_single(v))
            }
            LocatorMethod::ByAltText => format!("page.get_by_alt_text('{}')", escape_single(v)),
            LocatorMethod::ByTitle => format!("page.get_by_title('{}')", escape_single(v)),
            LocatorMethod::ByTestId => format!("page.get_by_test_id('{}')", escape_single(v)),
            LocatorMethod::RawLocator => format!("page.locator('{}')", escape_single(v)),
        },
        Language::Java => match result.method {
            LocatorMethod::ByRole => {
                let (role, name) = result.role_parts();
                match name {
                    Some(name) => format!(
                        "page.getByRole(AriaRole.{}, new Page.GetByRoleOptions().setName(\"{}\"))",
                        aria_role(role),
                        escape_double(name)
                    ),
                    None => format!("page.getByRole(AriaRole.{})", aria_role(role)),
                }
            }
            LocatorMethod::ByText => format!("page.getByText(\"{}\")", escape_double(v)),
            LocatorMethod::ByLabel => format!("page.getByLabel(\"{}\")", escape_double(v)),
            LocatorMethod::ByPlaceholder => {
                format!("page.getByPlaceholder(\"{}\")", escape_double(v))
            }
            LocatorMethod::ByAltText => format!("page.getByAltText(\"{}\")", escape_double(v)),
            LocatorMethod::ByTitle => format!("page.getByTitle(\"{}\")", escape_double(v)),
            LocatorMethod::ByTestId => format!("page.getByTestId(\"{}\")", escape_double(v)),
            LocatorMethod::RawLocator => format!("page.locator(\"{}\")", escape_double(v)),
        },
    }
}

fn action_call(action: Action, lang: Language) -> String {
    match (action, lang) {
        (Action::Click, _) => ".click()".to_string(),
        (Action::Check, _) => ".check()".to_string(),
        (Action::Fill, Language::Java) => format!(".fill(\"{SAMPLE_VALUE}\")"),
        (Action::Fill, _) => format!(".fill('{SAMPLE_VALUE}')"),
        (Action::SelectOption, Language::Java) => format!(".selectOption(\"{SAMPLE_VALUE}\")"),
        (Action::SelectOption, Language::TypeScript) => {
            format!(".selectOption('{SAMPLE_VALUE}')")
        }
        (Action::SelectOption, Language::Python) => format!(".select_option('{SAMPLE_VALUE}')"),
    }
}

/// A complete example statement: locator plus default action.
#[must_use]
pub fn snippet(result: &StrategyResult, action: Action, lang: Language) -> String {
    let expr = locator_expr(result, lang);
    let call = action_call(action, lang);
    match lang {
        Language::TypeScript => format!("await {expr}{call};"),
        Language::Python => format!("{expr}{call}"),
        Language::Java => format!("{expr}{call};"),
    }
}
