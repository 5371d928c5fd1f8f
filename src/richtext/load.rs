//! Reading a markup fragment into document blocks.
//!
//! The walk mirrors how a browser editor reads pasted HTML: block elements open text blocks,
//! container elements push wrappers, mark elements add marks to the text beneath them, and loose
//! inline content gets an implicit paragraph. Whitespace outside code blocks is collapsed.

use super::document::{Block, BlockKind, Mark, Marks, TextRun, Wrapper, WrapperKind};
use crate::markup;
use markup5ever_rcdom::{Handle, NodeData};

/// Blocks read from `html`, with the next unused wrapper id.
pub(crate) fn read_fragment(html: &str) -> (Vec<Block>, u32) {
    let dom = markup::parse_to_dom(html);
    let mut reader = FragmentReader::default();
    for node in markup::body_children(&dom) {
        reader.walk(&node);
    }
    reader.close_block();
    let mut blocks = reader.blocks;
    for block in &mut blocks {
        if block.kind != BlockKind::CodeBlock {
            collapse_whitespace(&mut block.runs);
        }
    }
    (blocks, reader.next_id)
}

#[derive(Default)]
struct FragmentReader {
    blocks: Vec<Block>,
    open: Option<Block>,
    wrappers: Vec<Wrapper>,
    marks: Marks,
    next_id: u32,
}

impl FragmentReader {
    fn fresh(&mut self, kind: WrapperKind) -> Wrapper {
        let id = self.next_id;
        self.next_id += 1;
        Wrapper { kind, id }
    }

    fn close_block(&mut self) {
        if let Some(block) = self.open.take() {
            self.blocks.push(block);
        }
    }

    fn open_block(&mut self, kind: BlockKind) {
        self.close_block();
        self.open = Some(Block {
            kind,
            runs: Vec::new(),
            wrappers: self.wrappers.clone(),
        });
    }

    fn push_text(&mut self, text: &str) {
        if self.open.is_none() {
            if text.chars().all(|c| c.is_ascii_whitespace()) {
                return;
            }
            self.open_block(BlockKind::Paragraph);
        }
        if let Some(block) = self.open.as_mut() {
            block.runs.push(TextRun::marked(text, self.marks.clone()));
        }
    }

    fn walk_children(&mut self, node: &Handle) {
        for child in markup::children(node) {
            self.walk(&child);
        }
    }

    fn walk(&mut self, node: &Handle) {
        match &node.data {
            NodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                self.push_text(&text);
            }
            NodeData::Element { .. } => {
                let tag = markup::tag_name(node).unwrap_or_default();
                self.element(&tag, node);
            }
            _ => {}
        }
    }

    fn element(&mut self, tag: &str, node: &Handle) {
        match tag {
            "p" => self.text_block(BlockKind::Paragraph, node),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = tag[1..].parse().unwrap_or(1);
                self.text_block(BlockKind::Heading(level), node);
            }
            "pre" => {
                self.close_block();
                let text = markup::text_content(node);
                let mut block = Block {
                    kind: BlockKind::CodeBlock,
                    runs: vec![TextRun::plain(text.trim_end_matches('\n'))],
                    wrappers: self.wrappers.clone(),
                };
                block.runs.retain(|r| !r.is_empty());
                self.blocks.push(block);
            }
            "blockquote" => {
                self.close_block();
                let quote = self.fresh(WrapperKind::Blockquote);
                self.wrappers.push(quote);
                self.walk_children(node);
                self.close_block();
                self.wrappers.pop();
            }
            "ul" | "ol" => self.list(tag == "ol", node),
            "strong" | "b" => self.marked(Mark::Bold, node),
            "em" | "i" => self.marked(Mark::Italic, node),
            "sup" => self.marked(Mark::Superscript, node),
            "sub" => self.marked(Mark::Subscript, node),
            "code" => self.marked(Mark::Code, node),
            "br" => self.push_text(" "),
            "script" | "style" | "template" | "head" | "title" | "meta" | "link" | "noscript" => {}
            _ if is_block_container(tag) => {
                self.close_block();
                self.walk_children(node);
                self.close_block();
            }
            _ => self.walk_children(node),
        }
    }

    fn text_block(&mut self, kind: BlockKind, node: &Handle) {
        self.open_block(kind);
        self.walk_children(node);
        self.close_block();
    }

    fn marked(&mut self, mark: Mark, node: &Handle) {
        let had = self.marks.contains(&mark);
        self.marks.insert(mark);
        self.walk_children(node);
        if !had {
            self.marks.remove(&mark);
        }
    }

    fn list(&mut self, ordered: bool, node: &Handle) {
        self.close_block();
        let start = markup::attr(node, "start")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(1);
        let list = self.fresh(WrapperKind::List { ordered, start });
        self.wrappers.push(list);
        for child in markup::children(node) {
            let is_item = markup::tag_name(&child).as_deref() == Some("li");
            let blank = matches!(&child.data, NodeData::Text { contents }
                if contents.borrow().chars().all(|c| c.is_ascii_whitespace()));
            if blank {
                continue;
            }
            let item = self.fresh(WrapperKind::ListItem);
            self.wrappers.push(item);
            if is_item {
                self.walk_children(&child);
            } else {
                self.walk(&child);
            }
            self.close_block();
            self.wrappers.pop();
        }
        self.wrappers.pop();
    }
}

fn is_block_container(tag: &str) -> bool {
    matches!(
        tag,
        "div"
            | "section"
            | "article"
            | "aside"
            | "header"
            | "footer"
            | "main"
            | "nav"
            | "figure"
            | "figcaption"
            | "li"
            | "dl"
            | "dt"
            | "dd"
            | "table"
            | "thead"
            | "tbody"
            | "tr"
            | "td"
            | "th"
            | "hr"
            | "address"
            | "details"
            | "summary"
    )
}

/// Collapses whitespace runs to one space and trims the block's ends, across run boundaries.
fn collapse_whitespace(runs: &mut Vec<TextRun>) {
    let mut after_space = true;
    for run in runs.iter_mut() {
        let mut text = String::with_capacity(run.text.len());
        for ch in run.text.chars() {
            if ch.is_ascii_whitespace() {
                if !after_space {
                    text.push(' ');
                }
                after_space = true;
            } else {
                text.push(ch);
                after_space = false;
            }
        }
        run.text = text;
    }
    if let Some(last) = runs.iter_mut().rev().find(|r| !r.text.is_empty()) {
        if last.text.ends_with(' ') {
            last.text.pop();
        }
    }
    runs.retain(|r| !r.text.is_empty());
}

#[cfg(test)]
#[path = "../tests/load.rs"]
mod tests;
