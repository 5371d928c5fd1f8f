//! Region roles and the capability set each one exposes.
//!
//! Every editable region has a role, fixed by where it sits in its section. The role decides
//! which blocks and marks its document may contain and which commands its menu offers. Roles are
//! types so that body-only operations simply do not exist on headline controllers.

use super::document::{Block, BlockKind, Mark, WrapperKind};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// The role of an editable region.
pub enum RegionRole {
    /// The single headline of a title section.
    TitleHeadline,
    /// The `.headline` of a content section.
    ContentHeadline,
    /// The `.problem-text` body of a content section.
    ContentBody,
}

impl fmt::Display for RegionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleHeadline => f.write_str("title"),
            Self::ContentHeadline => f.write_str("headline"),
            Self::ContentBody => f.write_str("problem text"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A formatting operation offered by a region's menu.
pub enum Command {
    /// Toggle [`Mark::Bold`].
    Bold,
    /// Toggle [`Mark::Italic`].
    Italic,
    /// Toggle [`Mark::Superscript`].
    Superscript,
    /// Toggle [`Mark::Subscript`].
    Subscript,
    /// Toggle [`Mark::Code`].
    Code,
    /// Wrap in or lift out of a blockquote.
    Blockquote,
    /// Switch between code block and paragraph.
    CodeBlock,
    /// Wrap in or lift out of a bullet list.
    BulletList,
    /// Wrap in or lift out of an ordered list.
    OrderedList,
}

impl Command {
    #[must_use]
    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Superscript => "superscript",
            Self::Subscript => "subscript",
            Self::Code => "code",
            Self::Blockquote => "quote",
            Self::CodeBlock => "code block",
            Self::BulletList => "bullet list",
            Self::OrderedList => "ordered list",
        }
    }

    #[must_use]
    /// Key that triggers the command in the editor (with Alt held).
    pub fn key(self) -> char {
        match self {
            Self::Bold => 'b',
            Self::Italic => 'i',
            Self::Superscript => 'p',
            Self::Subscript => 'd',
            Self::Code => 'e',
            Self::Blockquote => 'q',
            Self::CodeBlock => 'k',
            Self::BulletList => 'l',
            Self::OrderedList => 'o',
        }
    }
}

const INLINE_COMMANDS: &[Command] = &[
    Command::Bold,
    Command::Italic,
    Command::Superscript,
    Command::Subscript,
];

const BODY_COMMANDS: &[Command] = &[
    Command::Bold,
    Command::Italic,
    Command::Superscript,
    Command::Subscript,
    Command::Code,
    Command::Blockquote,
    Command::CodeBlock,
    Command::BulletList,
    Command::OrderedList,
];

const HEADLINE_MARKS: &[Mark] = &[Mark::Bold, Mark::Italic, Mark::Superscript, Mark::Subscript];

const BODY_MARKS: &[Mark] = &[
    Mark::Bold,
    Mark::Italic,
    Mark::Superscript,
    Mark::Subscript,
    Mark::Code,
];

#[derive(Debug)]
/// The closed set of content a role allows.
pub struct Capabilities {
    /// Heading levels allowed.
    pub headings: &'static [u8],
    /// Whether paragraphs are allowed.
    pub paragraph: bool,
    /// Whether code blocks are allowed.
    pub code_block: bool,
    /// Whether bullet and ordered lists are allowed.
    pub lists: bool,
    /// Whether blockquotes are allowed.
    pub blockquote: bool,
    /// Inline marks allowed.
    pub marks: &'static [Mark],
    /// Commands the role's menu exposes.
    pub commands: &'static [Command],
}

impl Capabilities {
    #[must_use]
    /// Whether `command` is offered.
    pub fn allows(&self, command: Command) -> bool {
        self.commands.contains(&command)
    }

    #[must_use]
    /// The block new content falls back to.
    pub fn default_block(&self) -> BlockKind {
        if self.paragraph {
            BlockKind::Paragraph
        } else {
            BlockKind::Heading(self.headings.first().copied().unwrap_or(1))
        }
    }

    fn coerce_kind(&self, kind: BlockKind) -> BlockKind {
        match kind {
            BlockKind::Heading(level) if self.headings.contains(&level) => kind,
            BlockKind::Paragraph if self.paragraph => kind,
            BlockKind::CodeBlock if self.code_block => kind,
            _ => self.default_block(),
        }
    }

    /// Rewrites blocks so they only use what this role allows.
    ///
    /// Disallowed blocks become the default block, disallowed containers are flattened and
    /// disallowed marks dropped. An empty document gains one empty default block.
    pub fn coerce(&self, blocks: &mut Vec<Block>) {
        for block in blocks.iter_mut() {
            block.kind = self.coerce_kind(block.kind);
            block.wrappers.retain(|w| match w.kind {
                WrapperKind::Blockquote => self.blockquote,
                WrapperKind::List { .. } | WrapperKind::ListItem => self.lists,
            });
            for run in &mut block.runs {
                run.marks.retain(|m| self.marks.contains(m));
            }
        }
        if blocks.is_empty() {
            blocks.push(Block::empty(self.default_block()));
        }
    }
}

/// A region role at the type level.
pub trait Schema {
    /// Runtime tag of the role.
    const ROLE: RegionRole;

    /// What the role's documents may contain.
    fn capabilities() -> &'static Capabilities;
}

#[derive(Debug, Clone, Copy)]
/// Role marker: title section headline. Heading level 1 only.
pub struct TitleHeadline;

#[derive(Debug, Clone, Copy)]
/// Role marker: content section headline. Heading level 2 only.
pub struct ContentHeadline;

#[derive(Debug, Clone, Copy)]
/// Role marker: content section body. Full block and mark set.
pub struct ContentBody;

static TITLE_CAPABILITIES: Capabilities = Capabilities {
    headings: &[1],
    paragraph: false,
    code_block: false,
    lists: false,
    blockquote: false,
    marks: HEADLINE_MARKS,
    commands: INLINE_COMMANDS,
};

static HEADLINE_CAPABILITIES: Capabilities = Capabilities {
    headings: &[2],
    paragraph: false,
    code_block: false,
    lists: false,
    blockquote: false,
    marks: HEADLINE_MARKS,
    commands: INLINE_COMMANDS,
};

static BODY_CAPABILITIES: Capabilities = Capabilities {
    headings: &[1, 2, 3, 4, 5, 6],
    paragraph: true,
    code_block: true,
    lists: true,
    blockquote: true,
    marks: BODY_MARKS,
    commands: BODY_COMMANDS,
};

impl Schema for TitleHeadline {
    const ROLE: RegionRole = RegionRole::TitleHeadline;

    fn capabilities() -> &'static Capabilities {
        &TITLE_CAPABILITIES
    }
}

impl Schema for ContentHeadline {
    const ROLE: RegionRole = RegionRole::ContentHeadline;

    fn capabilities() -> &'static Capabilities {
        &HEADLINE_CAPABILITIES
    }
}

impl Schema for ContentBody {
    const ROLE: RegionRole = RegionRole::ContentBody;

    fn capabilities() -> &'static Capabilities {
        &BODY_CAPABILITIES
    }
}
