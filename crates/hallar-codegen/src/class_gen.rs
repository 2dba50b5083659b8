//! Full page-object class emission.
//!
//! One class per analyzed page: TypeScript stores selector strings in
//! readonly properties, Python assigns them in `__init__`, Java exposes
//! lazy `Locator` methods that call the matching accessor directly.

use hallar::{LocatorMethod, NamedElement};

use crate::error::{CodegenError, Result};
use crate::snippet::{escape_double, escape_single, locator_expr, selector_string, to_camel_case};
use crate::Language;

/// Validate a class name as a conservative identifier accepted by all
/// three target languages.
fn validate_class_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    match chars.next() {
        None => {
            return Err(CodegenError::invalid_class_name(name, "must not be empty"));
        }
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
            return Err(CodegenError::invalid_class_name(
                name,
                "must start with a letter or underscore",
            ));
        }
        Some(_) => {}
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(CodegenError::invalid_class_name(
            name,
            format!("contains invalid character '{bad}'"),
        ));
    }
    Ok(())
}

/// Emit a complete page-object class for the given language.
pub fn emit_class(
    lang: Language,
    class_name: &str,
    entries: &[NamedElement],
) -> Result<String> {
    validate_class_name(class_name)?;
    let out = match lang {
        Language::TypeScript => emit_typescript(class_name, entries),
        Language::Java => emit_java(class_name, entries),
        Language::Python => emit_python(class_name, entries),
    };
    Ok(out)
}

/// The entry driving the `search(query)` convenience method, when any
/// element name mentions search.
fn search_entry(entries: &[NamedElement]) -> Option<&NamedElement> {
    entries.iter().find(|e| e.unique_name.contains("search"))
}

fn emit_typescript(class_name: &str, entries: &[NamedElement]) -> String {
    let mut lines = vec![
        "import { BasePage } from './BasePage';".to_string(),
        "import { Page } from '@playwright/test';".to_string(),
        String::new(),
        format!("export class {class_name} extends BasePage {{"),
    ];
    for e in entries {
        let selector = escape_single(&selector_string(&e.best));
        lines.push(format!(
            "    readonly {}: string = '{selector}';",
            e.unique_name
        ));
    }
    lines.push(String::new());
    lines.push("    constructor(page: Page) {".to_string());
    lines.push("        super(page);".to_string());
    lines.push("    }".to_string());
    if let Some(search) = search_entry(entries) {
        let name = &search.unique_name;
        lines.push(String::new());
        lines.push("    async search(query: string) {".to_string());
        lines.push(format!("        await this.fill(this.{name}, query);"));
        lines.push(format!("        await this.pressKey(this.{name}, 'Enter');"));
        lines.push("    }".to_string());
    }
    lines.push("}".to_string());
    lines.join("\n")
}

fn java_locator_stmt(e: &NamedElement) -> String {
    match e.best.method {
        // Every accessor family maps one-to-one onto the Java Page API.
        LocatorMethod::ByRole
        | LocatorMethod::ByText
        | LocatorMethod::ByLabel
        | LocatorMethod::ByPlaceholder
        | LocatorMethod::ByAltText
        | LocatorMethod::ByTitle
        | LocatorMethod::ByTestId => {
            format!("return {};", locator_expr(&e.best, Language::Java))
        }
        LocatorMethod::RawLocator => {
            format!(
                "return page.locator(\"{}\");",
                escape_double(&selector_string(&e.best))
            )
        }
    }
}

fn emit_java(class_name: &str, entries: &[NamedElement]) -> String {
    let mut lines = vec![
        "package pages;".to_string(),
        "import com.microsoft.playwright.*;".to_string(),
        "import com.microsoft.playwright.options.AriaRole;".to_string(),
        String::new(),
        format!("public class {class_name} extends BasePage {{"),
        "    private final Page page;".to_string(),
        String::new(),
        format!("    public {class_name}(Page page) {{"),
        "        super(page);".to_string(),
        "        this.page = page;".to_string(),
        "    }".to_string(),
    ];
    for e in entries {
        let method = to_camel_case(&e.unique_name);
        lines.push(String::new());
        lines.push(format!("    private Locator {method}() {{"));
        lines.push(format!("        {}", java_locator_stmt(e)));
        lines.push("    }".to_string());
    }
    if let Some(search) = search_entry(entries) {
        let method = to_camel_case(&search.unique_name);
        lines.push(String::new());
        lines.push("    public void search(String query) {".to_string());
        lines.push(format!("        {method}().fill(query);"));
        lines.push(format!("        {method}().press(\"Enter\");"));
        lines.push("    }".to_string());
    }
    lines.push("}".to_string());
    lines.join("\n")
}

fn emit_python(class_name: &str, entries: &[NamedElement]) -> String {
    let mut lines = vec![
        "from .base_page import BasePage".to_string(),
        "from playwright.sync_api import Page".to_string(),
        String::new(),
        format!("class {class_name}(BasePage):"),
        "    def __init__(self, page: Page):".to_string(),
        "        super().__init__(page)".to_string(),
    ];
    for e in entries {
        let selector = escape_single(&selector_string(&e.best));
        lines.push(format!("        self.{} = '{selector}'", e.unique_name));
    }
    if let Some(search) = search_entry(entries) {
        let name = &search.unique_name;
        lines.push(String::new());
        lines.push("    def search(self, query: str):".to_string());
        lines.push(format!("        self.fill(self.{name}, query)"));
        lines.push(format!("        self.press_key(self.{name}, 'Enter')"));
    }
    lines.join("\n")
}
