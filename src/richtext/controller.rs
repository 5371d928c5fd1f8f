//! Rich text controllers: one live editing state per region, gated by role.

use super::document::{
    add_mark, Block, BlockKind, Mark, Marks, Position, RichDocument, Selection, WrapperKind,
};
use super::load::read_fragment;
use super::render::{blocks_to_html, inline_html};
use super::schema::{
    Capabilities, Command, ContentBody, ContentHeadline, RegionRole, Schema, TitleHeadline,
};
use std::marker::PhantomData;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Caret movements.
pub enum Motion {
    /// One character back, crossing into the previous block.
    Left,
    /// One character forward, crossing into the next block.
    Right,
    /// Same offset in the previous block.
    Up,
    /// Same offset in the next block.
    Down,
    /// Start of the block.
    LineStart,
    /// End of the block.
    LineEnd,
}

#[derive(Debug, Clone)]
/// Editing state for one region whose content is limited to what `S` allows.
///
/// Inline toggles exist for every role. Block toggles and inline code only exist on
/// `RichTextController<ContentBody>`, so a headline cannot be asked to become a list.
pub struct RichTextController<S: Schema> {
    doc: RichDocument,
    selection: Selection,
    stored_marks: Option<Marks>,
    schema: PhantomData<S>,
}

impl<S: Schema> RichTextController<S> {
    #[must_use]
    /// Loads `html` into a new controller, coercing it into the role's schema.
    pub fn new(html: &str) -> Self {
        let (mut blocks, next_id) = read_fragment(html);
        S::capabilities().coerce(&mut blocks);
        let doc = RichDocument::from_blocks(blocks, next_id);
        tracing::debug!(role = %S::ROLE, blocks = doc.blocks().len(), "created controller");
        Self {
            selection: Selection::caret(doc.end()),
            doc,
            stored_marks: None,
            schema: PhantomData,
        }
    }

    #[must_use]
    /// Role of the region this controller edits.
    pub fn role(&self) -> RegionRole {
        S::ROLE
    }

    #[must_use]
    /// What this controller's content may contain.
    pub fn capabilities(&self) -> &'static Capabilities {
        S::capabilities()
    }

    #[must_use]
    /// Current document.
    pub fn document(&self) -> &RichDocument {
        &self.doc
    }

    #[must_use]
    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    /// Snapshot of the current content as markup.
    pub fn to_html(&self) -> String {
        blocks_to_html(self.doc.blocks())
    }

    #[must_use]
    /// Inline markup of the content when it is exactly one heading, without the heading tag.
    pub fn heading_inner_html(&self) -> Option<String> {
        match self.doc.blocks() {
            [only] if matches!(only.kind, BlockKind::Heading(_)) && only.wrappers.is_empty() => {
                Some(inline_html(&only.runs))
            }
            _ => None,
        }
    }

    #[must_use]
    /// Unformatted text, one line per block.
    pub fn plain_text(&self) -> String {
        self.doc.plain_text()
    }

    /// Selects from `anchor` to `head`, clamped into the document.
    pub fn set_selection(&mut self, anchor: Position, head: Position) {
        self.selection = Selection {
            anchor: self.doc.clamp(anchor),
            head: self.doc.clamp(head),
        };
        self.stored_marks = None;
    }

    /// Collapses the selection to `pos`.
    pub fn set_cursor(&mut self, pos: Position) {
        let pos = self.doc.clamp(pos);
        self.set_selection(pos, pos);
    }

    /// Selects the whole document.
    pub fn select_all(&mut self) {
        let end = self.doc.end();
        self.set_selection(Position::default(), end);
    }

    /// Moves the caret; with `extend` the anchor stays put.
    pub fn move_cursor(&mut self, motion: Motion, extend: bool) {
        let head = self.selection.head;
        let blocks = self.doc.blocks();
        let len = |i: usize| blocks.get(i).map_or(0, Block::len);
        let next = match motion {
            Motion::Left if head.offset > 0 => Position::new(head.block, head.offset - 1),
            Motion::Left if head.block > 0 => Position::new(head.block - 1, len(head.block - 1)),
            Motion::Right if head.offset < len(head.block) => {
                Position::new(head.block, head.offset + 1)
            }
            Motion::Right if head.block + 1 < blocks.len() => Position::new(head.block + 1, 0),
            Motion::Up if head.block > 0 => Position::new(head.block - 1, head.offset),
            Motion::Down if head.block + 1 < blocks.len() => {
                Position::new(head.block + 1, head.offset)
            }
            Motion::LineStart => Position::new(head.block, 0),
            Motion::LineEnd => Position::new(head.block, len(head.block)),
            _ => head,
        };
        let next = self.doc.clamp(next);
        let anchor = if extend { self.selection.anchor } else { next };
        self.set_selection(anchor, next);
    }

    /// Types `text` over the selection.
    ///
    /// Uses the stored marks if a toggle was made at a collapsed caret, otherwise the marks of
    /// the text before the caret. Outside code blocks, line breaks become spaces.
    pub fn insert_text(&mut self, text: &str) {
        let (from, to) = self.selection.range();
        let stored = self.stored_marks.take();
        let at = self.doc.delete_range(from, to);
        let in_code = self
            .doc
            .blocks()
            .get(at.block)
            .is_some_and(|b| b.kind == BlockKind::CodeBlock);
        let text = if in_code {
            text.to_string()
        } else {
            text.replace(['\n', '\r'], " ")
        };
        let marks = stored.unwrap_or_else(|| self.doc.marks_at(at));
        let caret = self.doc.insert_text(at, &text, &marks);
        self.selection = Selection::caret(caret);
    }

    /// Backspace: deletes the selection, the previous character, or joins with the previous
    /// block. At the start of a nested block the block is first lifted out of its container.
    pub fn delete_backward(&mut self) {
        let (from, to) = self.selection.range();
        self.stored_marks = None;
        let caret = if from != to {
            self.doc.delete_range(from, to)
        } else if from.offset > 0 {
            self.doc
                .delete_range(Position::new(from.block, from.offset - 1), from)
        } else {
            let blocks = self.doc.blocks();
            let nested = blocks.get(from.block).is_some_and(|b| {
                !b.wrappers.is_empty()
                    && (from.block == 0 || blocks[from.block - 1].wrappers != b.wrappers)
            });
            if nested && self.doc.lift_block(from.block) {
                from
            } else {
                self.doc.join_backward(from.block).unwrap_or(from)
            }
        };
        self.selection = Selection::caret(self.doc.clamp(caret));
    }

    /// Enter: splits the current block at the caret.
    ///
    /// In a code block this inserts a line break instead. Splitting at the end of a block starts
    /// the role's default block; an empty list item is lifted out of its list.
    pub fn split_block(&mut self) {
        let (from, to) = self.selection.range();
        self.stored_marks = None;
        let at = self.doc.delete_range(from, to);
        let Some(block) = self.doc.blocks().get(at.block) else {
            return;
        };
        if block.kind == BlockKind::CodeBlock {
            let caret = self.doc.insert_text(at, "\n", &Marks::new());
            self.selection = Selection::caret(caret);
            return;
        }
        let in_item = block
            .wrappers
            .last()
            .is_some_and(|w| w.kind == WrapperKind::ListItem);
        if in_item && block.is_empty() {
            self.doc.lift_block(at.block);
            self.selection = Selection::caret(at);
            return;
        }
        let kind = if at.offset >= block.len() {
            S::capabilities().default_block()
        } else {
            block.kind
        };
        let caret = self.doc.split_block(at, kind);
        self.selection = Selection::caret(caret);
    }

    fn toggle_mark(&mut self, mark: Mark) {
        if !S::capabilities().marks.contains(&mark) {
            return;
        }
        let (from, to) = self.selection.range();
        if from == to {
            let mut stored = self
                .stored_marks
                .take()
                .unwrap_or_else(|| self.doc.marks_at(from));
            if !stored.remove(&mark) {
                add_mark(&mut stored, mark);
            }
            self.stored_marks = Some(stored);
            return;
        }
        let on = !self.doc.range_has_mark(from, to, mark);
        self.doc.set_mark(from, to, mark, on);
    }

    /// Toggles bold on the selection.
    pub fn toggle_bold(&mut self) {
        self.toggle_mark(Mark::Bold);
    }

    /// Toggles italic on the selection.
    pub fn toggle_italic(&mut self) {
        self.toggle_mark(Mark::Italic);
    }

    /// Toggles superscript on the selection.
    pub fn toggle_superscript(&mut self) {
        self.toggle_mark(Mark::Superscript);
    }

    /// Toggles subscript on the selection.
    pub fn toggle_subscript(&mut self) {
        self.toggle_mark(Mark::Subscript);
    }

    fn block_span(&self) -> (usize, usize) {
        let (from, to) = self.selection.range();
        (from.block, to.block)
    }

    fn apply_inline(&mut self, command: Command) -> bool {
        match command {
            Command::Bold => self.toggle_bold(),
            Command::Italic => self.toggle_italic(),
            Command::Superscript => self.toggle_superscript(),
            Command::Subscript => self.toggle_subscript(),
            _ => return false,
        }
        true
    }
}

impl RichTextController<ContentBody> {
    /// Toggles inline code on the selection.
    pub fn toggle_code(&mut self) {
        self.toggle_mark(Mark::Code);
    }

    /// Wraps the selected blocks in a blockquote, or lifts them out of one.
    pub fn toggle_blockquote(&mut self) {
        let (lo, hi) = self.block_span();
        self.doc.toggle_blockquote(lo, hi);
    }

    /// Turns the selected blocks into a code block, or back into paragraphs.
    pub fn toggle_code_block(&mut self) {
        let (lo, hi) = self.block_span();
        self.doc.toggle_code_block(lo, hi);
        self.selection = Selection {
            anchor: self.doc.clamp(self.selection.anchor),
            head: self.doc.clamp(self.selection.head),
        };
    }

    /// Wraps the selected blocks in a bullet list, lifts them out, or converts an ordered list.
    pub fn toggle_bullet_list(&mut self) {
        let (lo, hi) = self.block_span();
        self.doc.toggle_list(lo, hi, false);
    }

    /// Wraps the selected blocks in an ordered list, lifts them out, or converts a bullet list.
    pub fn toggle_ordered_list(&mut self) {
        let (lo, hi) = self.block_span();
        self.doc.toggle_list(lo, hi, true);
    }
}

#[derive(Debug, Clone)]
/// A registered region's controller, typed by role.
pub enum Region {
    /// Headline of a title section.
    Title(RichTextController<TitleHeadline>),
    /// Headline of a content section.
    Headline(RichTextController<ContentHeadline>),
    /// Body of a content section.
    Body(RichTextController<ContentBody>),
}

/// Dispatches an expression over whichever controller a [`Region`] holds.
macro_rules! each_controller {
    ($region:expr, $c:ident => $body:expr) => {
        match $region {
            Region::Title($c) => $body,
            Region::Headline($c) => $body,
            Region::Body($c) => $body,
        }
    };
}

impl Region {
    #[must_use]
    /// Role of the region.
    pub fn role(&self) -> RegionRole {
        each_controller!(self, c => c.role())
    }

    #[must_use]
    /// Commands the region's menu offers.
    pub fn commands(&self) -> &'static [Command] {
        each_controller!(self, c => c.capabilities().commands)
    }

    /// Runs `command` if the region's role offers it; returns whether it ran.
    pub fn apply(&mut self, command: Command) -> bool {
        match self {
            Self::Title(c) => c.apply_inline(command),
            Self::Headline(c) => c.apply_inline(command),
            Self::Body(c) => match command {
                Command::Code => {
                    c.toggle_code();
                    true
                }
                Command::Blockquote => {
                    c.toggle_blockquote();
                    true
                }
                Command::CodeBlock => {
                    c.toggle_code_block();
                    true
                }
                Command::BulletList => {
                    c.toggle_bullet_list();
                    true
                }
                Command::OrderedList => {
                    c.toggle_ordered_list();
                    true
                }
                _ => c.apply_inline(command),
            },
        }
    }

    #[must_use]
    /// Snapshot of the region's content as markup.
    pub fn to_html(&self) -> String {
        each_controller!(self, c => c.to_html())
    }

    #[must_use]
    /// The region's document.
    pub fn document(&self) -> &RichDocument {
        each_controller!(self, c => c.document())
    }

    #[must_use]
    /// The region's selection.
    pub fn selection(&self) -> Selection {
        each_controller!(self, c => c.selection())
    }

    #[must_use]
    /// Unformatted text of the region.
    pub fn plain_text(&self) -> String {
        each_controller!(self, c => c.plain_text())
    }

    /// Types text at the caret.
    pub fn insert_text(&mut self, text: &str) {
        each_controller!(self, c => c.insert_text(text));
    }

    /// Backspace.
    pub fn delete_backward(&mut self) {
        each_controller!(self, c => c.delete_backward());
    }

    /// Enter.
    pub fn split_block(&mut self) {
        each_controller!(self, c => c.split_block());
    }

    /// Moves the caret.
    pub fn move_cursor(&mut self, motion: Motion, extend: bool) {
        each_controller!(self, c => c.move_cursor(motion, extend));
    }

    /// Selects everything.
    pub fn select_all(&mut self) {
        each_controller!(self, c => c.select_all());
    }
}

#[cfg(test)]
#[path = "../tests/controller.rs"]
mod tests;
