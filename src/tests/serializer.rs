use super::*;
use crate::parser::parse_document;
use crate::section::SectionKind;

const SCENARIO: &str = "<section id=\"t1\"><h1>Hello</h1></section><section id=\"p1\">\
<div class=\"headline\">Q1</div><div id=\"c1\" class=\"problem-text\">Solve <b>this</b></div>\
</section>";

fn export(html: &str) -> String {
    let model = parse_document(html);
    let mut registry = SessionRegistry::new();
    registry.open_all(&model);
    serialize(&model, &registry).unwrap()
}

#[test]
fn test_concrete_scenario_export() {
    assert_eq!(
        export(SCENARIO),
        "<section id=\"t1\">Hello</section>\n\
         <section id=\"p1\"><div class=\"headline\"><h2>Q1</h2></div>\
         <div id=\"c1\" class=\"problem-text\"><p>Solve <strong>this</strong></p></div></section>\n"
    );
}

#[test]
fn test_order_and_variants_survive_round_trip() {
    let html = "<section id=\"z\"><h1>T</h1></section>\
                <section id=\"b\"><div class=\"headline\">1</div><div id=\"x\" class=\"problem-text\">a</div></section>\
                <section id=\"a\"><div class=\"headline\">2</div><div id=\"y\" class=\"problem-text\">b</div></section>";
    let before = parse_document(html);
    let after = parse_document(&export(html));
    let shape = |m: &SectionModel| {
        m.iter()
            .map(|s| (s.id().to_string(), s.kind()))
            .collect::<Vec<_>>()
    };
    assert_eq!(shape(&before), shape(&after));
    assert_eq!(
        shape(&after).iter().map(|(_, k)| *k).collect::<Vec<_>>(),
        [SectionKind::Title, SectionKind::Content, SectionKind::Content]
    );
    let content_ids: Vec<String> = after
        .iter()
        .filter_map(|s| match s {
            Section::Content { content_id, .. } => Some(content_id.clone()),
            Section::Title { .. } => None,
        })
        .collect();
    assert_eq!(content_ids, ["x", "y"]);
}

#[test]
fn test_unedited_export_is_stable() {
    let first = export(SCENARIO);
    let second = export(&first);
    assert_eq!(first, second);
}

#[test]
fn test_edits_are_exported() {
    let model = parse_document(SCENARIO);
    let mut registry = SessionRegistry::new();
    registry.open_all(&model);
    let body = registry
        .get_mut(&RegionKey::for_section(&model, 1, RegionSlot::Content).unwrap())
        .unwrap();
    body.select_all();
    body.apply(crate::richtext::Command::Italic);
    let out = serialize(&model, &registry).unwrap();
    assert!(out.contains(
        "class=\"problem-text\"><p><em>Solve </em><strong><em>this</em></strong></p></div>"
    ));
}

#[test]
fn test_missing_region_fails_whole_export() {
    let model = parse_document(SCENARIO);
    let mut registry = SessionRegistry::new();
    registry.open_section(&model, 0);
    let err = serialize(&model, &registry).unwrap_err();
    assert_eq!(
        err,
        ExportError::UnknownRegion(RegionKey {
            section_id: "p1".to_string(),
            occurrence: 0,
            slot: RegionSlot::Headline,
        })
    );
}

#[test]
fn test_title_with_several_blocks_is_kept_whole() {
    assert_eq!(
        export("<section id=\"t\"><h1>a</h1><h1>b</h1></section>"),
        "<section id=\"t\"><h1>a</h1><h1>b</h1></section>\n"
    );
}

#[test]
fn test_ids_are_escaped() {
    assert_eq!(
        export("<section id='a\"b'>x</section>"),
        "<section id=\"a&quot;b\">x</section>\n"
    );
}

#[test]
fn test_empty_model_exports_nothing() {
    assert_eq!(export("<p>nothing</p>"), "");
}
