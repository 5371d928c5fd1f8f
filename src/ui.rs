//! The UI renders the application state into something visible and editable.
//!
//! The draw function dispatches based on the current view (document or editor). Rich text is
//! drawn with terminal styles standing in for its marks, and containers as line prefixes.

use crate::app_state::{AppState, View};
use crate::registry::RegionKey;
use crate::richtext::{
    Block as TextBlock, BlockKind, Mark, Marks, Position, Region, RegionRole, Selection,
    WrapperKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &AppState) {
    match app.current_view {
        View::Document | View::Command => draw_document(f, app),
        View::Edit => draw_editor(f, app),
    }
}

fn role_style(role: RegionRole) -> Style {
    match role {
        RegionRole::TitleHeadline => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        RegionRole::ContentHeadline => Style::default().fg(Color::Blue),
        RegionRole::ContentBody => Style::default().fg(Color::DarkGray),
    }
}

fn mark_style(marks: &Marks) -> Style {
    marks.iter().fold(Style::default(), |style, mark| match mark {
        Mark::Bold => style.add_modifier(Modifier::BOLD),
        Mark::Italic => style.add_modifier(Modifier::ITALIC),
        Mark::Superscript => style.fg(Color::Cyan),
        Mark::Subscript => style.fg(Color::Magenta),
        Mark::Code => style.fg(Color::Yellow).bg(Color::Rgb(40, 40, 40)),
    })
}

fn block_style(kind: BlockKind) -> Style {
    match kind {
        BlockKind::Paragraph => Style::default(),
        BlockKind::Heading(_) => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        BlockKind::CodeBlock => Style::default().fg(Color::Yellow),
    }
}

/// Number shown for the item of the list at `depth` that block `index` sits in.
fn item_number(blocks: &[TextBlock], index: usize, depth: usize) -> u32 {
    let list = blocks[index].wrappers[depth];
    let start = match list.kind {
        WrapperKind::List { start, .. } => start,
        _ => 1,
    };
    let mut seen = Vec::new();
    for block in &blocks[..=index] {
        if block.wrappers.get(depth) == Some(&list) {
            if let Some(item) = block.wrappers.get(depth + 1) {
                if !seen.contains(&item.id) {
                    seen.push(item.id);
                }
            }
        }
    }
    let count = u32::try_from(seen.len()).unwrap_or(u32::MAX);
    start.saturating_add(count.saturating_sub(1))
}

/// Prefix drawn before block `index`: quote bars and list markers, indented per level.
fn block_prefix(blocks: &[TextBlock], index: usize) -> String {
    let block = &blocks[index];
    let mut prefix = String::new();
    for (depth, wrapper) in block.wrappers.iter().enumerate() {
        match wrapper.kind {
            WrapperKind::Blockquote => prefix.push_str("│ "),
            WrapperKind::List { ordered, .. } => {
                let first_of_item = block.wrappers.get(depth + 1).is_some_and(|item| {
                    index == 0 || blocks[index - 1].wrappers.get(depth + 1) != Some(item)
                });
                let marker = match (first_of_item, ordered) {
                    (false, _) => "   ".to_string(),
                    (true, false) => " • ".to_string(),
                    (true, true) => format!("{:>2}.", item_number(blocks, index, depth)),
                };
                prefix.push_str(&marker);
                prefix.push(' ');
            }
            WrapperKind::ListItem => {}
        }
    }
    prefix
}

/// Lines for `blocks`, with the selected characters of `selection` reversed.
///
/// Each block starts a line; line breaks inside a code block start further lines with the same
/// prefix.
fn block_lines(blocks: &[TextBlock], selection: Option<Selection>) -> Vec<Line<'static>> {
    let (from, to) = selection.map_or_else(Default::default, |s| s.range());
    let mut lines = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        let base = block_style(block.kind);
        let prefix = block_prefix(blocks, index);
        let prefix_span = || Span::styled(prefix.clone(), Style::default().fg(Color::DarkGray));
        let mut spans = vec![prefix_span()];
        if let BlockKind::Heading(level) = block.kind {
            spans.push(Span::styled("#".repeat(usize::from(level)) + " ", base));
        }
        let sel_start = if index == from.block { from.offset } else { 0 };
        let sel_end = if index == to.block { to.offset } else { usize::MAX };
        let selected_block = index >= from.block && index <= to.block && from != to;
        let mut at = 0;
        for run in &block.runs {
            let style = base.patch(mark_style(&run.marks));
            for (i, ch) in run.text.chars().enumerate() {
                if ch == '\n' {
                    lines.push(Line::from(std::mem::replace(&mut spans, vec![prefix_span()])));
                    continue;
                }
                let offset = at + i;
                let selected = selected_block && offset >= sel_start && offset < sel_end;
                let style = if selected {
                    style.add_modifier(Modifier::REVERSED)
                } else {
                    style
                };
                let past_prefix = spans.len() > 1;
                match spans.last_mut() {
                    Some(last) if past_prefix && last.style == style => {
                        last.content.to_mut().push(ch);
                    }
                    _ => spans.push(Span::styled(ch.to_string(), style)),
                }
            }
            at += run.len();
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn region_label(key: &RegionKey, region: &Region) -> String {
    let id = if key.section_id.is_empty() {
        "(no id)"
    } else {
        key.section_id.as_str()
    };
    format!("{id} · {}", region.role())
}

fn draw_document(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = app
        .regions
        .iter()
        .filter_map(|key| {
            let region = app.region(key)?;
            let mut lines = vec![Line::from(Span::styled(
                region_label(key, region),
                role_style(region.role()),
            ))];
            lines.extend(
                block_lines(region.document().blocks(), None)
                    .into_iter()
                    .map(|mut line| {
                        line.spans.insert(0, Span::raw("  "));
                        line
                    }),
            );
            Some(ListItem::new(lines))
        })
        .collect();

    let title = app.session.file_name().map_or_else(
        || "No document".to_string(),
        |name| format!("{name} ({} regions)", app.regions.len()),
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(app.current_region));
    f.render_stateful_widget(list, chunks[0], &mut state);

    let help_text = if app.current_view == View::Command {
        format!(":{}", app.command_buffer)
    } else if let Some(ref msg) = app.message {
        msg.clone()
    } else {
        "↑/↓: Navigate | Enter: Edit | :w Export | :e <path> Open | :q Quit".to_string()
    };
    let title = if app.current_view == View::Command {
        "Command"
    } else {
        ""
    };
    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(help, chunks[1]);
}

fn draw_editor(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumb
            Constraint::Min(0),    // Editor
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let Some((key, region)) = app
        .current_key()
        .and_then(|key| app.region(key).map(|region| (key, region)))
    else {
        return;
    };

    let breadcrumb = format!(
        "{} > {}",
        app.session.file_name().unwrap_or_default(),
        region_label(key, region)
    );
    let breadcrumb_widget =
        Paragraph::new(breadcrumb).block(Block::default().borders(Borders::ALL).title("Navigation"));
    f.render_widget(breadcrumb_widget, chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Editing {}", region.role()));
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);

    let blocks = region.document().blocks();
    let selection = region.selection();
    f.render_widget(Paragraph::new(block_lines(blocks, Some(selection))), inner);
    place_cursor(f, inner, blocks, selection);

    let help_text = app.message.clone().unwrap_or_else(|| {
        let mut parts: Vec<String> = region
            .commands()
            .iter()
            .map(|c| format!("Alt+{} {}", c.key(), c.label()))
            .collect();
        parts.push("Esc: Done".to_string());
        parts.join(" | ")
    });
    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

/// Line and column of the caret within the lines drawn by [`block_lines`].
fn cursor_cell(blocks: &[TextBlock], head: Position) -> Option<(usize, usize)> {
    let block = blocks.get(head.block)?;
    let before: String = block.text().chars().take(head.offset).collect();
    let line = blocks[..head.block]
        .iter()
        .map(|b| b.text().matches('\n').count() + 1)
        .sum::<usize>()
        + before.matches('\n').count();
    let heading = match block.kind {
        BlockKind::Heading(level) => usize::from(level) + 1,
        _ => 0,
    };
    let column = block_prefix(blocks, head.block).chars().count()
        + heading
        + before.chars().rev().take_while(|c| *c != '\n').count();
    Some((line, column))
}

fn place_cursor(f: &mut Frame, area: Rect, blocks: &[TextBlock], selection: Selection) {
    let Some((line, column)) = cursor_cell(blocks, selection.head) else {
        return;
    };
    let x = area
        .x
        .saturating_add(u16::try_from(column).unwrap_or(u16::MAX));
    let y = area
        .y
        .saturating_add(u16::try_from(line).unwrap_or(u16::MAX));
    if x < area.right() && y < area.bottom() {
        f.set_cursor_position((x, y));
    }
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
