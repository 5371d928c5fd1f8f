use super::*;

fn para(text: &str) -> Block {
    Block {
        kind: BlockKind::Paragraph,
        runs: vec![TextRun::plain(text)],
        wrappers: Vec::new(),
    }
}

fn doc(blocks: Vec<Block>) -> RichDocument {
    RichDocument::from_blocks(blocks, 0)
}

fn bold() -> Marks {
    Marks::from([Mark::Bold])
}

#[test]
fn test_set_mark_splits_and_merges_runs() {
    let mut d = doc(vec![para("hello world")]);
    d.set_mark(Position::new(0, 0), Position::new(0, 5), Mark::Bold, true);
    assert_eq!(
        d.blocks()[0].runs,
        vec![TextRun::marked("hello", bold()), TextRun::plain(" world")]
    );
    assert!(d.range_has_mark(Position::new(0, 0), Position::new(0, 5), Mark::Bold));
    assert!(!d.range_has_mark(Position::new(0, 0), Position::new(0, 6), Mark::Bold));

    d.set_mark(Position::new(0, 0), Position::new(0, 5), Mark::Bold, false);
    assert_eq!(d.blocks()[0].runs, vec![TextRun::plain("hello world")]);
}

#[test]
fn test_code_mark_excludes_other_marks() {
    let mut d = doc(vec![Block {
        kind: BlockKind::Paragraph,
        runs: vec![TextRun::marked("ab", bold())],
        wrappers: Vec::new(),
    }]);
    let (from, to) = (Position::new(0, 0), Position::new(0, 2));
    d.set_mark(from, to, Mark::Code, true);
    assert_eq!(d.blocks()[0].runs[0].marks, Marks::from([Mark::Code]));

    d.set_mark(from, to, Mark::Italic, true);
    assert_eq!(d.blocks()[0].runs[0].marks, Marks::from([Mark::Code]));
}

#[test]
fn test_inline_code_counts_as_covered() {
    let original = vec![Block {
        kind: BlockKind::Paragraph,
        runs: vec![
            TextRun::plain("a"),
            TextRun::marked("b", Marks::from([Mark::Code])),
        ],
        wrappers: Vec::new(),
    }];
    let mut d = doc(original.clone());
    let (from, to) = (Position::new(0, 0), Position::new(0, 2));
    assert!(!d.range_has_mark(from, to, Mark::Bold));

    d.set_mark(from, to, Mark::Bold, true);
    assert!(d.range_has_mark(from, to, Mark::Bold));
    assert!(!d.range_has_mark(Position::new(0, 1), to, Mark::Bold));

    d.set_mark(from, to, Mark::Bold, false);
    assert_eq!(d.blocks(), original.as_slice());
}

#[test]
fn test_superscript_and_subscript_replace_each_other() {
    let mut d = doc(vec![para("x")]);
    let (from, to) = (Position::new(0, 0), Position::new(0, 1));
    d.set_mark(from, to, Mark::Superscript, true);
    d.set_mark(from, to, Mark::Subscript, true);
    assert_eq!(d.blocks()[0].runs[0].marks, Marks::from([Mark::Subscript]));
    d.set_mark(from, to, Mark::Superscript, true);
    assert_eq!(d.blocks()[0].runs[0].marks, Marks::from([Mark::Superscript]));
}

#[test]
fn test_add_mark_exclusions() {
    let mut marks = Marks::from([Mark::Bold, Mark::Subscript]);
    add_mark(&mut marks, Mark::Superscript);
    assert_eq!(marks, Marks::from([Mark::Bold, Mark::Superscript]));
    add_mark(&mut marks, Mark::Code);
    assert_eq!(marks, Marks::from([Mark::Code]));
    add_mark(&mut marks, Mark::Italic);
    assert_eq!(marks, Marks::from([Mark::Code]));
}

#[test]
fn test_code_blocks_carry_no_marks() {
    let mut d = doc(vec![Block {
        kind: BlockKind::CodeBlock,
        runs: vec![TextRun::plain("x")],
        wrappers: Vec::new(),
    }]);
    let end = d.insert_text(Position::new(0, 1), "y", &bold());
    assert_eq!(end, Position::new(0, 2));
    assert_eq!(d.blocks()[0].runs, vec![TextRun::plain("xy")]);
    assert!(!d.range_has_mark(Position::new(0, 0), end, Mark::Bold));
}

#[test]
fn test_marks_at_follows_preceding_character() {
    let d = doc(vec![Block {
        kind: BlockKind::Paragraph,
        runs: vec![TextRun::marked("ab", bold()), TextRun::plain("cd")],
        wrappers: Vec::new(),
    }]);
    assert_eq!(d.marks_at(Position::new(0, 0)), bold());
    assert_eq!(d.marks_at(Position::new(0, 2)), bold());
    assert_eq!(d.marks_at(Position::new(0, 3)), Marks::new());
}

#[test]
fn test_delete_range_across_blocks() {
    let mut d = doc(vec![para("abc"), para("def")]);
    let at = d.delete_range(Position::new(0, 1), Position::new(1, 2));
    assert_eq!(at, Position::new(0, 1));
    assert_eq!(d.plain_text(), "af");
}

#[test]
fn test_offsets_count_chars_not_bytes() {
    let mut d = doc(vec![para("héllo")]);
    d.set_mark(Position::new(0, 1), Position::new(0, 2), Mark::Italic, true);
    assert_eq!(d.blocks()[0].runs[1].text, "é");
    assert_eq!(d.end(), Position::new(0, 5));
}

#[test]
fn test_join_backward() {
    let mut d = doc(vec![para("ab"), para("cd")]);
    assert_eq!(d.join_backward(0), None);
    assert_eq!(d.join_backward(1), Some(Position::new(0, 2)));
    assert_eq!(d.plain_text(), "abcd");
}

#[test]
fn test_split_inside_list_item_starts_new_item() {
    let mut d = doc(vec![para("one two")]);
    d.toggle_list(0, 0, false);
    let caret = d.split_block(Position::new(0, 3), BlockKind::Paragraph);
    assert_eq!(caret, Position::new(1, 0));
    let blocks = d.blocks();
    assert_eq!(blocks[0].text(), "one");
    assert_eq!(blocks[1].text(), " two");
    assert_eq!(blocks[0].wrappers[0], blocks[1].wrappers[0]);
    assert_ne!(blocks[0].wrappers[1], blocks[1].wrappers[1]);
}

#[test]
fn test_blockquote_toggle_restores_blocks() {
    let original = vec![para("a"), para("b")];
    let mut d = doc(original.clone());
    d.toggle_blockquote(0, 1);
    assert!(d
        .blocks()
        .iter()
        .all(|b| b.wrappers.len() == 1 && b.wrappers[0].kind == WrapperKind::Blockquote));
    assert_eq!(d.blocks()[0].wrappers, d.blocks()[1].wrappers);
    d.toggle_blockquote(0, 1);
    assert_eq!(d.blocks(), original.as_slice());
}

#[test]
fn test_list_toggle_restores_blocks() {
    let original = vec![para("a"), para("b")];
    let mut d = doc(original.clone());
    d.toggle_list(0, 1, true);
    let blocks = d.blocks();
    assert_eq!(blocks[0].wrappers[0], blocks[1].wrappers[0]);
    assert_ne!(blocks[0].wrappers[1], blocks[1].wrappers[1]);
    d.toggle_list(0, 1, true);
    assert_eq!(d.blocks(), original.as_slice());
}

#[test]
fn test_list_toggle_switches_kind_in_place() {
    let mut d = doc(vec![para("a")]);
    d.toggle_list(0, 0, false);
    let id = d.blocks()[0].wrappers[0].id;
    d.toggle_list(0, 0, true);
    let list = d.blocks()[0].wrappers[0];
    assert_eq!(list.id, id);
    assert_eq!(
        list.kind,
        WrapperKind::List {
            ordered: true,
            start: 1
        }
    );
}

#[test]
fn test_list_kind_switch_keeps_start() {
    let list = Wrapper {
        kind: WrapperKind::List {
            ordered: true,
            start: 5,
        },
        id: 0,
    };
    let item = Wrapper {
        kind: WrapperKind::ListItem,
        id: 1,
    };
    let mut d = RichDocument::from_blocks(
        vec![Block {
            wrappers: vec![list, item],
            ..para("a")
        }],
        2,
    );
    d.toggle_list(0, 0, false);
    d.toggle_list(0, 0, true);
    assert_eq!(d.blocks()[0].wrappers, vec![list, item]);
}

#[test]
fn test_lift_list_item_removes_list() {
    let mut d = doc(vec![para("a")]);
    d.toggle_list(0, 0, false);
    assert!(d.lift_block(0));
    assert!(d.blocks()[0].wrappers.is_empty());
    assert!(!d.lift_block(0));
}

#[test]
fn test_code_block_toggle_drops_marks() {
    let mut d = doc(vec![Block {
        kind: BlockKind::Paragraph,
        runs: vec![TextRun::marked("ab", bold()), TextRun::plain("c")],
        wrappers: Vec::new(),
    }]);
    d.toggle_code_block(0, 0);
    assert_eq!(d.blocks()[0].kind, BlockKind::CodeBlock);
    assert_eq!(d.blocks()[0].runs, vec![TextRun::plain("abc")]);
    d.toggle_code_block(0, 0);
    assert_eq!(d.blocks()[0].kind, BlockKind::Paragraph);
}

#[test]
fn test_selection_range_is_ordered() {
    let sel = Selection {
        anchor: Position::new(1, 2),
        head: Position::new(0, 4),
    };
    assert_eq!(sel.range(), (Position::new(0, 4), Position::new(1, 2)));
    assert!(!sel.is_collapsed());
    assert!(Selection::caret(Position::new(0, 1)).is_collapsed());
}

#[test]
fn test_clamp_keeps_positions_inside() {
    let d = doc(vec![para("ab")]);
    assert_eq!(d.clamp(Position::new(5, 9)), Position::new(0, 2));
}
