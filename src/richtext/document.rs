//! The editable document behind every rich text controller.
//!
//! A document is a flat list of text blocks. Nesting (blockquotes, lists, list items) is kept as
//! a stack of [`Wrapper`]s on each block, outermost first; adjacent blocks that share a wrapper
//! id belong to the same element. This keeps range operations simple (a selection is just a span
//! of blocks and character offsets) while still serialising to properly nested markup.
//!
//! Offsets are counted in `char`s, never bytes.

use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Inline formatting. The declaration order is the nesting order used when serialising.
pub enum Mark {
    /// `<strong>`
    Bold,
    /// `<em>`
    Italic,
    /// `<sup>`
    Superscript,
    /// `<sub>`
    Subscript,
    /// `<code>`; excludes every other mark.
    Code,
}

impl Mark {
    #[must_use]
    /// Tag name emitted for this mark.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Bold => "strong",
            Self::Italic => "em",
            Self::Superscript => "sup",
            Self::Subscript => "sub",
            Self::Code => "code",
        }
    }
}

/// Set of marks carried by a run, iterated in nesting order.
pub type Marks = BTreeSet<Mark>;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
/// A stretch of text sharing one set of marks.
pub struct TextRun {
    /// The characters of the run.
    pub text: String,
    /// Formatting applied to every character of the run.
    pub marks: Marks,
}

impl TextRun {
    #[must_use]
    /// An unformatted run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Marks::new(),
        }
    }

    #[must_use]
    /// A run carrying `marks`.
    pub fn marked(text: impl Into<String>, marks: Marks) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    #[must_use]
    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    /// Whether the run holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn slice(&self, from: usize, to: usize) -> Self {
        Self {
            text: char_slice(&self.text, from, to).to_string(),
            marks: self.marks.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What kind of text block a block is.
pub enum BlockKind {
    /// `<p>`
    Paragraph,
    /// `<h1>` to `<h6>`.
    Heading(u8),
    /// `<pre><code>`; holds unmarked text with newlines preserved.
    CodeBlock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Container element kinds a block can sit inside.
pub enum WrapperKind {
    /// `<blockquote>`
    Blockquote,
    /// `<ul>` or `<ol>`; always directly followed by a [`WrapperKind::ListItem`].
    List {
        /// `<ol>` when set, `<ul>` otherwise.
        ordered: bool,
        /// First number of an ordered list.
        start: u32,
    },
    /// `<li>`
    ListItem,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// One container element; blocks with an equal wrapper at the same depth share the element.
pub struct Wrapper {
    /// Element kind.
    pub kind: WrapperKind,
    /// Document-unique element identity.
    pub id: u32,
}

impl Wrapper {
    fn is_list(self) -> bool {
        matches!(self.kind, WrapperKind::List { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A text block and the containers it is nested in.
pub struct Block {
    /// Block type.
    pub kind: BlockKind,
    /// Inline content.
    pub runs: Vec<TextRun>,
    /// Enclosing containers, outermost first.
    pub wrappers: Vec<Wrapper>,
}

impl Block {
    #[must_use]
    /// An empty block of `kind` at the top level.
    pub fn empty(kind: BlockKind) -> Self {
        Self {
            kind,
            runs: Vec::new(),
            wrappers: Vec::new(),
        }
    }

    #[must_use]
    /// Length in characters.
    pub fn len(&self) -> usize {
        self.runs.iter().map(TextRun::len).sum()
    }

    #[must_use]
    /// Whether the block holds no text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(TextRun::is_empty)
    }

    #[must_use]
    /// Unformatted text of the block.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    fn normalize(&mut self) {
        let mut merged: Vec<TextRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.marks == run.marks => last.text.push_str(&run.text),
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// A caret location: block index, then character offset inside the block.
pub struct Position {
    /// Index into the document's blocks.
    pub block: usize,
    /// Character offset inside the block.
    pub offset: usize,
}

impl Position {
    #[must_use]
    /// Position at `offset` characters into block `block`.
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
/// Anchor and head of a selection; collapsed when they are equal.
pub struct Selection {
    /// Where the selection started.
    pub anchor: Position,
    /// Where the selection currently ends (the caret).
    pub head: Position,
}

impl Selection {
    #[must_use]
    /// A collapsed selection at `pos`.
    pub fn caret(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    #[must_use]
    /// Whether anchor and head coincide.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    #[must_use]
    /// The selection as an ordered `(from, to)` pair.
    pub fn range(&self) -> (Position, Position) {
        if self.anchor <= self.head {
            (self.anchor, self.head)
        } else {
            (self.head, self.anchor)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Blocks plus the wrapper id allocator.
pub struct RichDocument {
    blocks: Vec<Block>,
    next_id: u32,
}

impl RichDocument {
    #[must_use]
    /// Builds a document from blocks whose wrapper ids are all below `next_id`.
    pub fn from_blocks(blocks: Vec<Block>, next_id: u32) -> Self {
        let mut doc = Self { blocks, next_id };
        for block in &mut doc.blocks {
            block.normalize();
        }
        doc
    }

    #[must_use]
    /// The document's blocks in order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    /// Text of every block, one line per block.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn fresh_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[must_use]
    /// Clamps a position into the document.
    pub fn clamp(&self, pos: Position) -> Position {
        if self.blocks.is_empty() {
            return Position::default();
        }
        let block = pos.block.min(self.blocks.len() - 1);
        Position::new(block, pos.offset.min(self.blocks[block].len()))
    }

    #[must_use]
    /// Position just past the last character.
    pub fn end(&self) -> Position {
        self.blocks
            .last()
            .map_or_else(Position::default, |b| Position::new(self.blocks.len() - 1, b.len()))
    }

    /// Per-block character spans covered by `from..to`.
    fn spans(&self, from: Position, to: Position) -> Vec<(usize, usize, usize)> {
        if self.blocks.is_empty() {
            return Vec::new();
        }
        (from.block..=to.block.min(self.blocks.len().saturating_sub(1)))
            .map(|i| {
                let start = if i == from.block { from.offset } else { 0 };
                let end = if i == to.block {
                    to.offset
                } else {
                    self.blocks[i].len()
                };
                (i, start, end.max(start))
            })
            .collect()
    }

    #[must_use]
    /// Marks that apply to text typed at `pos`: those of the preceding character, or of the
    /// following one at the start of a block.
    pub fn marks_at(&self, pos: Position) -> Marks {
        let Some(block) = self.blocks.get(pos.block) else {
            return Marks::new();
        };
        let mut at = 0;
        for run in &block.runs {
            let len = run.len();
            if pos.offset > at && pos.offset <= at + len {
                return run.marks.clone();
            }
            if pos.offset == 0 && len > 0 {
                return run.marks.clone();
            }
            at += len;
        }
        Marks::new()
    }

    #[must_use]
    /// Whether every markable character in `from..to` carries `mark`.
    ///
    /// Code blocks hold no marks and are ignored. Inline code cannot carry other marks, so it
    /// counts as covered as long as some other text in the range has the mark. A range where
    /// nothing carries the mark reports `false`.
    pub fn range_has_mark(&self, from: Position, to: Position, mark: Mark) -> bool {
        let mut carried = false;
        for (i, start, end) in self.spans(from, to) {
            let block = &self.blocks[i];
            if block.kind == BlockKind::CodeBlock {
                continue;
            }
            let (_, mid, _) = split_runs(&block.runs, start, end);
            for run in mid {
                if run.marks.contains(&mark) {
                    carried = true;
                } else if mark == Mark::Code || !run.marks.contains(&Mark::Code) {
                    return false;
                }
            }
        }
        carried
    }

    /// Adds or removes `mark` on every markable character in `from..to`.
    ///
    /// Adding code strips the other marks, nothing is added to code text,
    /// and superscript and subscript replace each other.
    pub fn set_mark(&mut self, from: Position, to: Position, mark: Mark, on: bool) {
        for (i, start, end) in self.spans(from, to) {
            let block = &mut self.blocks[i];
            if block.kind == BlockKind::CodeBlock || start == end {
                continue;
            }
            let (before, mut mid, after) = split_runs(&block.runs, start, end);
            for run in &mut mid {
                if on {
                    add_mark(&mut run.marks, mark);
                } else {
                    run.marks.remove(&mark);
                }
            }
            block.runs = before.into_iter().chain(mid).chain(after).collect();
            block.normalize();
        }
    }

    /// Removes the text in `from..to`, joining the end block onto the start block.
    pub fn delete_range(&mut self, from: Position, to: Position) -> Position {
        if from >= to || self.blocks.is_empty() {
            return self.clamp(from);
        }
        let from = self.clamp(from);
        let to = self.clamp(to);
        let (head, _, _) = split_runs(
            &self.blocks[from.block].runs,
            from.offset,
            self.blocks[from.block].len(),
        );
        let tail_block = &self.blocks[to.block];
        let (_, _, tail) = split_runs(&tail_block.runs, 0, to.offset);
        let joined = &mut self.blocks[from.block];
        joined.runs = head.into_iter().chain(tail).collect();
        joined.normalize();
        if to.block > from.block {
            self.blocks.drain(from.block + 1..=to.block);
        }
        from
    }

    /// Inserts `text` carrying `marks` at `pos`, returning the position after it.
    pub fn insert_text(&mut self, pos: Position, text: &str, marks: &Marks) -> Position {
        if self.blocks.is_empty() {
            return pos;
        }
        let pos = self.clamp(pos);
        let block = &mut self.blocks[pos.block];
        let marks = if block.kind == BlockKind::CodeBlock {
            Marks::new()
        } else {
            marks.clone()
        };
        let (before, _, after) = split_runs(&block.runs, pos.offset, pos.offset);
        block.runs = before
            .into_iter()
            .chain(std::iter::once(TextRun::marked(text, marks)))
            .chain(after)
            .collect();
        block.normalize();
        Position::new(pos.block, pos.offset + text.chars().count())
    }

    /// Splits the block at `pos`; the new second half gets `kind`.
    ///
    /// Inside a list item the second half starts a new item, and so do any later blocks of the
    /// same item.
    pub fn split_block(&mut self, pos: Position, kind: BlockKind) -> Position {
        if self.blocks.is_empty() {
            return pos;
        }
        let pos = self.clamp(pos);
        let block = &self.blocks[pos.block];
        let (head, _, tail) = split_runs(&block.runs, pos.offset, pos.offset);
        let mut second = Block {
            kind,
            runs: tail,
            wrappers: block.wrappers.clone(),
        };
        second.normalize();
        self.blocks[pos.block].runs = head;
        self.blocks[pos.block].normalize();

        if let Some(depth) = second
            .wrappers
            .iter()
            .rposition(|w| w.kind == WrapperKind::ListItem)
        {
            let old = second.wrappers[depth];
            let item = Wrapper {
                kind: WrapperKind::ListItem,
                id: self.fresh_id(),
            };
            second.wrappers[depth] = item;
            for later in self.blocks.iter_mut().skip(pos.block + 1) {
                if later.wrappers.get(depth) != Some(&old) {
                    break;
                }
                later.wrappers[depth] = item;
            }
        }
        self.blocks.insert(pos.block + 1, second);
        Position::new(pos.block + 1, 0)
    }

    /// Appends block `index` onto the previous block.
    pub fn join_backward(&mut self, index: usize) -> Option<Position> {
        if index == 0 || index >= self.blocks.len() {
            return None;
        }
        let removed = self.blocks.remove(index);
        let prev = &mut self.blocks[index - 1];
        let at = Position::new(index - 1, prev.len());
        prev.runs.extend(removed.runs);
        prev.normalize();
        Some(at)
    }

    /// Drops the innermost container of block `index` (a list item takes its list with it).
    pub fn lift_block(&mut self, index: usize) -> bool {
        let Some(block) = self.blocks.get_mut(index) else {
            return false;
        };
        match block.wrappers.last().map(|w| w.kind) {
            Some(WrapperKind::ListItem) => {
                let keep = block.wrappers.len().saturating_sub(2);
                block.wrappers.truncate(keep);
                true
            }
            Some(_) => {
                block.wrappers.pop();
                true
            }
            None => false,
        }
    }

    /// Wrappers shared by every block in `lo..=hi`.
    fn common_prefix(&self, lo: usize, hi: usize) -> Vec<Wrapper> {
        let mut prefix = self.blocks[lo].wrappers.clone();
        for block in &self.blocks[lo + 1..=hi] {
            let shared = prefix
                .iter()
                .zip(&block.wrappers)
                .take_while(|(a, b)| a == b)
                .count();
            prefix.truncate(shared);
        }
        prefix
    }

    /// Grows `lo..=hi` so it covers whole children of the container at `depth - 1`.
    fn expand_to_children(&self, mut lo: usize, mut hi: usize, depth: usize) -> (usize, usize) {
        if let Some(w) = self.blocks[lo].wrappers.get(depth) {
            while lo > 0 && self.blocks[lo - 1].wrappers.get(depth) == Some(w) {
                lo -= 1;
            }
        }
        if let Some(w) = self.blocks[hi].wrappers.get(depth) {
            while hi + 1 < self.blocks.len() && self.blocks[hi + 1].wrappers.get(depth) == Some(w) {
                hi += 1;
            }
        }
        (lo, hi)
    }

    /// The shared container depth a wrap of `lo..=hi` happens at, plus the expanded range.
    fn wrap_target(&self, lo: usize, hi: usize) -> (usize, usize, usize) {
        let mut prefix = self.common_prefix(lo, hi);
        // Containers never go directly inside a list: wrap the list itself instead.
        if prefix.last().is_some_and(|w| w.is_list()) {
            prefix.pop();
        }
        let depth = prefix.len();
        let (lo, hi) = self.expand_to_children(lo, hi, depth);
        (depth, lo, hi)
    }

    /// Toggles a blockquote around blocks `lo..=hi`.
    pub fn toggle_blockquote(&mut self, lo: usize, hi: usize) {
        if self.blocks.is_empty() {
            return;
        }
        let prefix = self.common_prefix(lo, hi);
        if let Some(depth) = prefix
            .iter()
            .rposition(|w| w.kind == WrapperKind::Blockquote)
        {
            let (lo, hi) = self.expand_to_children(lo, hi, depth + 1);
            for block in &mut self.blocks[lo..=hi] {
                block.wrappers.remove(depth);
            }
            return;
        }
        let (depth, lo, hi) = self.wrap_target(lo, hi);
        let quote = Wrapper {
            kind: WrapperKind::Blockquote,
            id: self.fresh_id(),
        };
        for block in &mut self.blocks[lo..=hi] {
            block.wrappers.insert(depth, quote);
        }
    }

    /// Toggles a list of the given kind around blocks `lo..=hi`.
    ///
    /// Inside a list of the other kind, the whole list switches kind instead.
    pub fn toggle_list(&mut self, lo: usize, hi: usize, ordered: bool) {
        if self.blocks.is_empty() {
            return;
        }
        let prefix = self.common_prefix(lo, hi);
        if let Some(depth) = prefix.iter().rposition(|w| w.is_list()) {
            let list = prefix[depth];
            if matches!(list.kind, WrapperKind::List { ordered: o, .. } if o == ordered) {
                let (lo, hi) = self.expand_to_children(lo, hi, depth + 1);
                for block in &mut self.blocks[lo..=hi] {
                    let end = (depth + 2).min(block.wrappers.len());
                    block.wrappers.drain(depth..end);
                }
            } else {
                let start = match list.kind {
                    WrapperKind::List { start, .. } => start,
                    _ => 1,
                };
                let retyped = Wrapper {
                    kind: WrapperKind::List { ordered, start },
                    id: list.id,
                };
                for block in &mut self.blocks {
                    if let Some(w) = block.wrappers.get_mut(depth).filter(|w| **w == list) {
                        *w = retyped;
                    }
                }
            }
            return;
        }

        let (depth, lo, hi) = self.wrap_target(lo, hi);
        let list = Wrapper {
            kind: WrapperKind::List { ordered, start: 1 },
            id: self.fresh_id(),
        };
        let mut previous_child: Option<Wrapper> = None;
        let mut item = Wrapper {
            kind: WrapperKind::ListItem,
            id: 0,
        };
        for index in lo..=hi {
            let child = self.blocks[index].wrappers.get(depth).copied();
            if child.is_none() || child != previous_child || index == lo {
                item.id = self.fresh_id();
            }
            previous_child = child;
            let block = &mut self.blocks[index];
            block.wrappers.insert(depth, item);
            block.wrappers.insert(depth, list);
        }
    }

    /// Turns blocks `lo..=hi` into code blocks, or back into paragraphs when all already are.
    pub fn toggle_code_block(&mut self, lo: usize, hi: usize) {
        if self.blocks.is_empty() {
            return;
        }
        let all_code = self.blocks[lo..=hi]
            .iter()
            .all(|b| b.kind == BlockKind::CodeBlock);
        for block in &mut self.blocks[lo..=hi] {
            if all_code {
                block.kind = BlockKind::Paragraph;
            } else {
                block.kind = BlockKind::CodeBlock;
                block.runs = vec![TextRun::plain(block.text())];
                block.normalize();
            }
        }
    }
}

/// Adds `mark` to `marks`, honouring exclusions.
///
/// [`Mark::Code`] replaces every other mark and no other mark joins it. Superscript and
/// subscript exclude each other.
pub(crate) fn add_mark(marks: &mut Marks, mark: Mark) {
    match mark {
        Mark::Code => marks.clear(),
        _ if marks.contains(&Mark::Code) => return,
        Mark::Superscript => {
            marks.remove(&Mark::Subscript);
        }
        Mark::Subscript => {
            marks.remove(&Mark::Superscript);
        }
        Mark::Bold | Mark::Italic => {}
    }
    marks.insert(mark);
}

/// Splits runs into the parts before, inside and after the character span `from..to`.
pub(crate) fn split_runs(
    runs: &[TextRun],
    from: usize,
    to: usize,
) -> (Vec<TextRun>, Vec<TextRun>, Vec<TextRun>) {
    let mut before = Vec::new();
    let mut mid = Vec::new();
    let mut after = Vec::new();
    let mut at = 0;
    for run in runs {
        let len = run.len();
        let a = from.clamp(at, at + len) - at;
        let b = to.clamp(at, at + len) - at;
        if a > 0 {
            before.push(run.slice(0, a));
        }
        if b > a {
            mid.push(run.slice(a, b));
        }
        if len > b {
            after.push(run.slice(b, len));
        }
        at += len;
    }
    (before, mid, after)
}

fn char_slice(s: &str, from: usize, to: usize) -> &str {
    let start = byte_index(s, from);
    let end = byte_index(s, to);
    &s[start..end.max(start)]
}

fn byte_index(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}

#[cfg(test)]
#[path = "../tests/document.rs"]
mod tests;
