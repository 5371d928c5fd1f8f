use super::*;
use crate::richtext::load::read_fragment;
use crate::richtext::document::Marks;

fn roundtrip(html: &str) -> String {
    blocks_to_html(&read_fragment(html).0)
}

#[test]
fn test_paragraph_with_marks() {
    assert_eq!(
        roundtrip("Solve <b>this</b>"),
        "<p>Solve <strong>this</strong></p>"
    );
}

#[test]
fn test_shared_marks_stay_open() {
    let runs = vec![
        TextRun::marked("a", Marks::from([Mark::Bold])),
        TextRun::marked("b", Marks::from([Mark::Bold, Mark::Italic])),
        TextRun::plain("c"),
    ];
    assert_eq!(inline_html(&runs), "<strong>a<em>b</em></strong>c");
}

#[test]
fn test_text_is_escaped() {
    assert_eq!(
        inline_html(&[TextRun::plain("1 < 2 & 3")]),
        "1 &lt; 2 &amp; 3"
    );
    assert_eq!(
        roundtrip("<pre><code>a &lt; b</code></pre>"),
        "<pre><code>a &lt; b</code></pre>"
    );
}

#[test]
fn test_lists_group_items() {
    assert_eq!(
        roundtrip("<ul><li>a</li><li>b</li></ul>"),
        "<ul><li><p>a</p></li><li><p>b</p></li></ul>"
    );
    assert_eq!(
        roundtrip("<ol start=\"3\"><li>x</li></ol>"),
        "<ol start=\"3\"><li><p>x</p></li></ol>"
    );
}

#[test]
fn test_nested_containers() {
    let html = "<blockquote><p>q</p><ul><li><p>x</p></li></ul></blockquote>";
    assert_eq!(roundtrip(html), html);
}

#[test]
fn test_adjacent_lists_stay_separate() {
    let html = "<ul><li><p>a</p></li></ul><ul><li><p>b</p></li></ul>";
    assert_eq!(roundtrip(html), html);
}

#[test]
fn test_headings() {
    assert_eq!(roundtrip("<h2>Q1</h2>"), "<h2>Q1</h2>");
}
