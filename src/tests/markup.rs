use super::*;

/// The first element in the body, returned with its DOM so the tree stays alive.
fn first_element(html: &str) -> (RcDom, Handle) {
    let dom = parse_to_dom(html);
    let node = body_children(&dom)
        .into_iter()
        .find(|n| tag_name(n).is_some())
        .expect("no element in body");
    (dom, node)
}

#[test]
fn test_tag_name_is_lowercased() {
    let (_dom, node) = first_element("<SECTION ID=\"a\"></SECTION>");
    assert_eq!(tag_name(&node).as_deref(), Some("section"));
    assert_eq!(attr(&node, "id").as_deref(), Some("a"));
    assert_eq!(attr(&node, "ID").as_deref(), Some("a"));
}

#[test]
fn test_missing_attribute_is_none() {
    let (_dom, node) = first_element("<section></section>");
    assert_eq!(attr(&node, "id"), None);
}

#[test]
fn test_has_class_matches_whole_tokens() {
    let (_dom, node) = first_element("<div class=\"big  headline\"></div>");
    assert!(has_class(&node, "headline"));
    assert!(has_class(&node, "big"));
    assert!(!has_class(&node, "head"));
}

#[test]
fn test_find_descendant_with_class_uses_document_order() {
    let (_dom, node) = first_element(
        "<section class=\"headline\"><div><p class=\"headline\">first</p></div>\
         <div class=\"headline\">second</div></section>",
    );
    let found = find_descendant_with_class(&node, "headline").expect("headline");
    assert_eq!(text_content(&found), "first");
}

#[test]
fn test_find_descendant_excludes_the_node_itself() {
    let (_dom, node) = first_element("<div class=\"headline\">only</div>");
    assert!(find_descendant_with_class(&node, "headline").is_none());
}

#[test]
fn test_inner_html_escapes_and_keeps_structure() {
    let (_dom, node) = first_element(
        "<div><p>a &amp; b &lt;c&gt;</p><br><img src=\"x.png\" alt='say \"hi\"'><!-- note --></div>",
    );
    assert_eq!(
        inner_html(&node),
        "<p>a &amp; b &lt;c&gt;</p><br><img src=\"x.png\" alt=\"say &quot;hi&quot;\"><!-- note -->"
    );
}

#[test]
fn test_inner_html_leaves_script_text_alone() {
    let (_dom, node) = first_element("<div><script>if (a < b) {}</script></div>");
    assert_eq!(inner_html(&node), "<script>if (a < b) {}</script>");
}

#[test]
fn test_escape_helpers() {
    assert_eq!(escape_text("1 < 2 & 3 > 2"), "1 &lt; 2 &amp; 3 &gt; 2");
    assert_eq!(escape_attr("a\"b&c<d"), "a&quot;b&amp;c<d");
    assert_eq!(escape_text("a\u{a0}b"), "a&nbsp;b");
}
