//! Writing document blocks back out as markup.

use super::document::{Block, BlockKind, Mark, TextRun, Wrapper, WrapperKind};
use crate::markup::escape_text;

/// Markup for a whole document.
pub(crate) fn blocks_to_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    write_level(blocks, 0, &mut out);
    out
}

/// Markup for one block's inline content, without the block's own element.
pub(crate) fn inline_html(runs: &[TextRun]) -> String {
    let mut out = String::new();
    write_inline(runs, &mut out);
    out
}

/// Writes `blocks`, grouping consecutive blocks that share the wrapper at `depth`.
fn write_level(blocks: &[Block], depth: usize, out: &mut String) {
    let mut i = 0;
    while i < blocks.len() {
        let Some(wrapper) = blocks[i].wrappers.get(depth).copied() else {
            write_block(&blocks[i], out);
            i += 1;
            continue;
        };
        let mut j = i + 1;
        while j < blocks.len() && blocks[j].wrappers.get(depth) == Some(&wrapper) {
            j += 1;
        }
        open_wrapper(wrapper, out);
        write_level(&blocks[i..j], depth + 1, out);
        close_wrapper(wrapper, out);
        i = j;
    }
}

fn open_wrapper(wrapper: Wrapper, out: &mut String) {
    match wrapper.kind {
        WrapperKind::Blockquote => out.push_str("<blockquote>"),
        WrapperKind::List { ordered: false, .. } => out.push_str("<ul>"),
        WrapperKind::List {
            ordered: true,
            start: 1,
        } => out.push_str("<ol>"),
        WrapperKind::List {
            ordered: true,
            start,
        } => {
            out.push_str(&format!("<ol start=\"{start}\">"));
        }
        WrapperKind::ListItem => out.push_str("<li>"),
    }
}

fn close_wrapper(wrapper: Wrapper, out: &mut String) {
    out.push_str(match wrapper.kind {
        WrapperKind::Blockquote => "</blockquote>",
        WrapperKind::List { ordered: false, .. } => "</ul>",
        WrapperKind::List { ordered: true, .. } => "</ol>",
        WrapperKind::ListItem => "</li>",
    });
}

fn write_block(block: &Block, out: &mut String) {
    match block.kind {
        BlockKind::Paragraph => {
            out.push_str("<p>");
            write_inline(&block.runs, out);
            out.push_str("</p>");
        }
        BlockKind::Heading(level) => {
            out.push_str(&format!("<h{level}>"));
            write_inline(&block.runs, out);
            out.push_str(&format!("</h{level}>"));
        }
        BlockKind::CodeBlock => {
            out.push_str("<pre><code>");
            out.push_str(&escape_text(&block.text()));
            out.push_str("</code></pre>");
        }
    }
}

/// Writes runs, keeping marks shared with the previous run open across the boundary.
fn write_inline(runs: &[TextRun], out: &mut String) {
    let mut open: Vec<Mark> = Vec::new();
    for run in runs {
        let marks: Vec<Mark> = run.marks.iter().copied().collect();
        let keep = open
            .iter()
            .zip(&marks)
            .take_while(|(a, b)| a == b)
            .count();
        while open.len() > keep {
            if let Some(mark) = open.pop() {
                close_mark(mark, out);
            }
        }
        for mark in &marks[keep..] {
            out.push('<');
            out.push_str(mark.tag());
            out.push('>');
            open.push(*mark);
        }
        out.push_str(&escape_text(&run.text));
    }
    while let Some(mark) = open.pop() {
        close_mark(mark, out);
    }
}

fn close_mark(mark: Mark, out: &mut String) {
    out.push_str("</");
    out.push_str(mark.tag());
    out.push('>');
}

#[cfg(test)]
#[path = "../tests/render.rs"]
mod tests;
