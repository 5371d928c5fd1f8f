//! Thin helpers over the html5ever DOM shared by the section parser and the rich text loader.
//!
//! Both consumers want the same things from a parsed tree: the children of `<body>`, element
//! names and attributes, class membership, and the inner markup of an element written back out
//! as text.

use html5ever::{parse_document, ParseOpts};
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Builds a DOM from markup text. Tree construction is error tolerant and never fails.
#[must_use]
pub fn parse_to_dom(input: &str) -> RcDom {
    parse_document(RcDom::default(), ParseOpts::default()).one(input)
}

/// Children of the document `<body>`, or of the document itself when no body exists.
#[must_use]
pub fn body_children(dom: &RcDom) -> Vec<Handle> {
    find_element(&dom.document, "body")
        .map_or_else(|| children(&dom.document), |body| children(&body))
}

/// Depth-first search for the first element with the given local name.
fn find_element(node: &Handle, name: &str) -> Option<Handle> {
    if tag_name(node).is_some_and(|tag| tag.eq_ignore_ascii_case(name)) {
        return Some(node.clone());
    }
    node.children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, name))
}

/// Snapshot of a node's children.
#[must_use]
pub fn children(node: &Handle) -> Vec<Handle> {
    node.children.borrow().clone()
}

/// Lowercased local name when the node is an element.
#[must_use]
pub fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string().to_ascii_lowercase()),
        _ => None,
    }
}

/// Value of an attribute on an element node.
#[must_use]
pub fn attr(node: &Handle, key: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| str::eq_ignore_ascii_case(&a.name.local, key))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Whether the element's whitespace-separated `class` list contains `class`.
#[must_use]
pub fn has_class(node: &Handle, class: &str) -> bool {
    attr(node, "class").is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
}

/// First descendant (document order, excluding `node` itself) carrying the given class.
#[must_use]
pub fn find_descendant_with_class(node: &Handle, class: &str) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        if has_class(child, class) {
            return Some(child.clone());
        }
        if let Some(found) = find_descendant_with_class(child, class) {
            return Some(found);
        }
    }
    None
}

/// Concatenated text of every text node under `node`.
#[must_use]
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Elements whose text children are written without escaping.
fn is_raw_text(tag: &str) -> bool {
    matches!(
        tag,
        "script" | "style" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext"
    )
}

/// Markup of the node's children, the equivalent of a DOM `innerHTML` read.
#[must_use]
pub fn inner_html(node: &Handle) -> String {
    let raw = tag_name(node).is_some_and(|tag| is_raw_text(&tag));
    let mut out = String::new();
    for child in node.children.borrow().iter() {
        write_node(child, raw, &mut out);
    }
    out
}

fn write_node(node: &Handle, raw_text: bool, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => {
            let text = contents.borrow();
            if raw_text {
                out.push_str(&text);
            } else {
                out.push_str(&escape_text(&text));
            }
        }
        NodeData::Comment { contents } => {
            out.push_str("<!--");
            out.push_str(contents);
            out.push_str("-->");
        }
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string();
            out.push('<');
            out.push_str(&tag);
            for a in attrs.borrow().iter() {
                out.push(' ');
                out.push_str(&a.name.local);
                out.push_str("=\"");
                out.push_str(&escape_attr(&a.value));
                out.push('"');
            }
            out.push('>');
            if is_void(&tag) {
                return;
            }
            let raw = is_raw_text(&tag);
            for child in node.children.borrow().iter() {
                write_node(child, raw, out);
            }
            out.push_str("</");
            out.push_str(&tag);
            out.push('>');
        }
        _ => {
            for child in node.children.borrow().iter() {
                write_node(child, raw_text, out);
            }
        }
    }
}

/// Escapes text content for element bodies.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes a value for a double-quoted attribute.
#[must_use]
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/markup.rs"]
mod tests;
