use super::*;
use crate::test_support::FakePage;

const MARKERS: [Option<&str>; 3] = [Some("guest"), Some("auth"), Some("admin")];

fn record(token: Option<&str>, role: &str) -> SessionRecord {
    SessionRecord {
        token: token.map(str::to_owned),
        role: role.to_owned(),
        username: String::new(),
    }
}

fn render(record: &SessionRecord) -> Vec<bool> {
    let page = FakePage::with_markers(&MARKERS);
    render_navbar(page.nav_items(), record);
    page.visibility()
}

// =============================================================
// RoleMarker
// =============================================================

#[test]
fn role_marker_parses_known_values() {
    assert_eq!(RoleMarker::parse("guest"), Some(RoleMarker::Guest));
    assert_eq!(RoleMarker::parse("auth"), Some(RoleMarker::Auth));
    assert_eq!(RoleMarker::parse("admin"), Some(RoleMarker::Admin));
}

#[test]
fn role_marker_rejects_unknown_and_case_variants() {
    assert_eq!(RoleMarker::parse("Admin"), None);
    assert_eq!(RoleMarker::parse("user"), None);
    assert_eq!(RoleMarker::parse(""), None);
}

// =============================================================
// render_navbar
// =============================================================

#[test]
fn token_with_guest_role_shows_only_auth_items() {
    assert_eq!(render(&record(Some("t"), "guest")), [false, true, false]);
}

#[test]
fn token_with_admin_role_shows_auth_and_admin_items() {
    assert_eq!(render(&record(Some("t"), "admin")), [false, true, true]);
}

#[test]
fn no_token_shows_only_guest_items() {
    assert_eq!(render(&record(None, "guest")), [true, false, false]);
}

#[test]
fn no_token_hides_admin_items_even_with_admin_role() {
    assert_eq!(render(&record(None, "admin")), [true, false, false]);
}

#[test]
fn unknown_or_missing_marker_stays_shown() {
    let page = FakePage::with_markers(&[Some("moderator"), None]);
    for item in &page.items {
        item.set_visible(false);
    }
    render_navbar(page.nav_items(), &record(None, "guest"));
    assert_eq!(page.visibility(), [true, true]);
}

#[test]
fn previously_hidden_item_is_shown_again() {
    let page = FakePage::with_markers(&MARKERS);
    render_navbar(page.nav_items(), &record(None, "guest"));
    render_navbar(page.nav_items(), &record(Some("t"), "user"));
    assert_eq!(page.visibility(), [false, true, false]);
}

#[test]
fn render_is_idempotent() {
    let page = FakePage::with_markers(&MARKERS);
    let r = record(Some("t"), "admin");
    render_navbar(page.nav_items(), &r);
    let first = page.visibility();
    render_navbar(page.nav_items(), &r);
    assert_eq!(page.visibility(), first);
}
