//! Integration tests for entity and character reference resolution.

use tagsift_scan::{lookup_entity, resolve_entity};

#[test]
fn test_lookup_markup_entities() {
    assert_eq!(lookup_entity("amp"), Some('&'));
    assert_eq!(lookup_entity("lt"), Some('<'));
    assert_eq!(lookup_entity("gt"), Some('>'));
    assert_eq!(lookup_entity("quot"), Some('"'));
    assert_eq!(lookup_entity("apos"), Some('\''));
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert_eq!(lookup_entity("Eacute"), Some('\u{00C9}'));
    assert_eq!(lookup_entity("eacute"), Some('\u{00E9}'));
    assert_eq!(lookup_entity("AMP"), None);
}

#[test]
fn test_lookup_symbols_and_greek() {
    assert_eq!(lookup_entity("nbsp"), Some('\u{00A0}'));
    assert_eq!(lookup_entity("euro"), Some('\u{20AC}'));
    assert_eq!(lookup_entity("Omega"), Some('\u{03A9}'));
    assert_eq!(lookup_entity("hearts"), Some('\u{2665}'));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity"), None);
    assert_eq!(lookup_entity(""), None);
    // Names are stored without the semicolon
    assert_eq!(lookup_entity("amp;"), None);
}

#[test]
fn test_resolve_decimal_and_hex() {
    assert_eq!(resolve_entity("#38"), Some('&'));
    assert_eq!(resolve_entity("#x26"), Some('&'));
    assert_eq!(resolve_entity("#X26"), Some('&'));
    assert_eq!(resolve_entity("#0065"), Some('A'));
    assert_eq!(resolve_entity("#x1F600"), Some('\u{1F600}'));
}

#[test]
fn test_resolve_rejects_unusable_code_points() {
    assert_eq!(resolve_entity("#0"), None);
    assert_eq!(resolve_entity("#xD800"), None);
    assert_eq!(resolve_entity("#x110000"), None);
    assert_eq!(resolve_entity("#99999999999999999999"), None);
}

#[test]
fn test_resolve_rejects_malformed_digits() {
    assert_eq!(resolve_entity("#"), None);
    assert_eq!(resolve_entity("#x"), None);
    assert_eq!(resolve_entity("#12a"), None);
    assert_eq!(resolve_entity("#xZZ"), None);
}

#[test]
fn test_resolve_named() {
    assert_eq!(resolve_entity("copy"), Some('\u{00A9}'));
    assert_eq!(resolve_entity("bogus"), None);
}
