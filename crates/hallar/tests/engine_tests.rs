//! End-to-end engine tests: parse, collect, rank.

use hallar::{Action, Document, StrategyType};

fn collect(html: &str) -> Vec<hallar::NamedElement> {
    Document::parse(html).unwrap().collect().unwrap()
}

// ============================================================================
// Ranking scenarios
// ============================================================================

#[test]
fn text_content_wins_over_aria_label_for_the_role_name() {
    let entries = collect("<button aria-label=\"Submit order\">Go</button>");
    assert_eq!(entries.len(), 1);
    let best = &entries[0].best;
    assert_eq!(best.strategy_type, StrategyType::Role);
    assert_eq!(best.raw_value, "button|Go");
}

#[test]
fn test_id_wins_when_the_role_has_no_name() {
    let entries = collect("<input data-testid=\"email-field\" type=\"email\">");
    let best = &entries[0].best;
    assert_eq!(best.strategy_type, StrategyType::TestId);
    assert_eq!(best.raw_value, "email-field");
}

#[test]
fn named_role_outranks_test_id() {
    let entries = collect("<button data-testid=\"go\">Checkout</button>");
    let best = &entries[0].best;
    assert_eq!(best.strategy_type, StrategyType::Role);
    assert_eq!(best.raw_value, "button|Checkout");
}

#[test]
fn xpath_is_present_but_never_best() {
    let html = "<div><input><button>Go</button></div>";
    for entry in collect(html) {
        assert_ne!(entry.best.strategy_type, StrategyType::XPath);
        assert!(entry.strategies.xpath.raw_value.starts_with("//"));
    }
}

// ============================================================================
// Dynamic-value handling
// ============================================================================

#[test]
fn framework_ids_never_reach_emitted_selectors() {
    let html = "<button id=\"ember482\" class=\"btn-primary\">Submit</button>";
    let entries = collect(html);
    let e = &entries[0];
    assert_eq!(e.best.raw_value, "button|Submit");
    assert!(!e.strategies.css.raw_value.contains("ember482"));
    assert!(!e.strategies.xpath.raw_value.contains("ember482"));
    assert_eq!(e.strategies.css.raw_value, "button.btn-primary");
}

#[test]
fn fully_dynamic_attributes_degrade_to_bare_tag_css() {
    let html = "<input id=\"ng-823\" class=\"css-1q2w3e\" name=\"12345678\">";
    let entries = collect(html);
    assert_eq!(entries[0].strategies.css.raw_value, "input");
}

// ============================================================================
// Collection and naming
// ============================================================================

#[test]
fn colliding_names_get_numeric_suffixes() {
    let html = "<input name=\"email\"><input id=\"email\" type=\"email\">";
    let names: Vec<_> = collect(html).into_iter().map(|e| e.unique_name).collect();
    assert_eq!(names, vec!["email_input", "email_input_2"]);
}

#[test]
fn submit_input_appears_exactly_once() {
    let html = "<form><input name=\"q\"><input type=\"submit\" value=\"Search\"></form>";
    let entries = collect(html);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].unique_name, "q_input");
    // Form pass names come from name/id/placeholder, not the value.
    assert_eq!(entries[1].unique_name, "input_button");
    assert_eq!(entries[1].best.raw_value, "button|Search");
}

#[test]
fn clickables_with_identical_best_selectors_collapse() {
    let html = "<a href=\"/a\">Docs</a><a href=\"/b\">Docs</a><a href=\"/c\">Blog</a>";
    let names: Vec<_> = collect(html).into_iter().map(|e| e.unique_name).collect();
    assert_eq!(names, vec!["docs_link", "blog_link"]);
}

#[test]
fn collection_is_deterministic() {
    let html = r#"
        <form>
            <label for="user">Username</label>
            <input id="user" name="user">
            <input type="password" placeholder="Password">
            <input type="checkbox" name="remember">
            <select name="country"><option>ES</option></select>
            <button type="submit">Sign in</button>
        </form>
        <a href="/help" title="Help center">Help</a>
    "#;
    let first = collect(html);
    let second = collect(html);
    assert_eq!(first, second);

    let names: Vec<_> = first.iter().map(|e| e.unique_name.as_str()).collect();
    let mut deduped = names.clone();
    deduped.dedup();
    assert_eq!(names, deduped, "all names are unique");
}

#[test]
fn full_login_page_fixture() {
    let html = r#"
        <form>
            <label for="mail">Email address</label>
            <input id="mail" type="email" name="mail">
            <input type="password" name="pass" placeholder="Password">
            <input type="checkbox" name="remember">
            <button type="submit">Sign in</button>
        </form>
        <a href="/forgot">Forgot password?</a>
    "#;
    let entries = collect(html);
    let names: Vec<_> = entries.iter().map(|e| e.unique_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "mail_input",
            "pass_input",
            "remember_checkbox",
            "sign_in_button",
            "forgot_password_link",
        ]
    );

    let mail = &entries[0];
    assert_eq!(mail.action, Action::Fill);
    assert_eq!(mail.best.strategy_type, StrategyType::Label);
    assert_eq!(mail.best.raw_value, "Email address");

    let remember = &entries[2];
    assert_eq!(remember.action, Action::Check);

    let button = &entries[3];
    assert_eq!(button.best.raw_value, "button|Sign in");
    assert_eq!(button.action, Action::Click);
}

#[test]
fn empty_input_is_rejected() {
    assert!(Document::parse("").is_err());
    assert!(Document::parse(" \n ").is_err());
}

#[test]
fn page_with_no_interactive_elements_yields_empty_list() {
    let entries = collect("<div><p>Just text</p></div>");
    assert!(entries.is_empty());
}
