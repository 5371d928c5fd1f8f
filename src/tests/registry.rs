use super::*;
use crate::parser::parse_document;
use crate::richtext::RegionRole;

const DOC: &str = "<section id=\"t1\"><h1>Hello</h1></section><section id=\"p1\">\
<div class=\"headline\">Q1</div><div id=\"c1\" class=\"problem-text\">Solve <b>this</b></div>\
</section>";

fn key(id: &str, occurrence: usize, slot: RegionSlot) -> RegionKey {
    RegionKey {
        section_id: id.to_string(),
        occurrence,
        slot,
    }
}

#[test]
fn test_regions_are_created_lazily() {
    let model = parse_document(DOC);
    let mut registry = SessionRegistry::new();
    assert!(registry.is_empty());

    assert_eq!(registry.open_section(&model, 0), 1);
    assert_eq!(registry.len(), 1);
    assert!(!registry.contains(&key("p1", 0, RegionSlot::Content)));

    assert_eq!(registry.open_section(&model, 1), 2);
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.open_section(&model, 7), 0);
}

#[test]
fn test_roles_follow_section_shape() {
    let model = parse_document(DOC);
    let mut registry = SessionRegistry::new();
    registry.open_all(&model);
    let role = |k: RegionKey| registry.get(&k).map(Region::role);
    assert_eq!(
        role(key("t1", 0, RegionSlot::Headline)),
        Ok(RegionRole::TitleHeadline)
    );
    assert_eq!(
        role(key("p1", 0, RegionSlot::Headline)),
        Ok(RegionRole::ContentHeadline)
    );
    assert_eq!(
        role(key("p1", 0, RegionSlot::Content)),
        Ok(RegionRole::ContentBody)
    );
}

#[test]
fn test_reopening_keeps_edits() {
    let model = parse_document(DOC);
    let mut registry = SessionRegistry::new();
    registry.open_all(&model);
    let k = key("p1", 0, RegionSlot::Content);
    registry
        .get_mut(&k)
        .expect("registered")
        .insert_text(" now");

    registry.open_all(&model);
    assert_eq!(registry.len(), 3);
    assert_eq!(
        registry.get(&k).map(Region::plain_text),
        Ok("Solve this now".to_string())
    );
}

#[test]
fn test_unknown_region_is_an_error() {
    let registry = SessionRegistry::new();
    let k = key("missing", 0, RegionSlot::Headline);
    assert_eq!(
        registry.get(&k).map(Region::role),
        Err(ExportError::UnknownRegion(k.clone()))
    );
}

#[test]
fn test_duplicate_ids_get_distinct_keys() {
    let model = parse_document("<section id=\"d\">one</section><section id=\"d\">two</section>");
    let mut registry = SessionRegistry::new();
    registry.open_all(&model);
    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry
            .get(&key("d", 1, RegionSlot::Headline))
            .map(Region::plain_text),
        Ok("two".to_string())
    );
}

#[test]
fn test_key_display() {
    assert_eq!(key("p1", 0, RegionSlot::Content).to_string(), "p1-content");
    assert_eq!(key("d", 1, RegionSlot::Headline).to_string(), "d-headline#1");
}

#[test]
fn test_key_for_section() {
    let model = parse_document(DOC);
    assert_eq!(
        RegionKey::for_section(&model, 1, RegionSlot::Content),
        Some(key("p1", 0, RegionSlot::Content))
    );
    assert_eq!(RegionKey::for_section(&model, 2, RegionSlot::Content), None);
}
