//! The state machine bridging the editing session and the terminal front-end.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user navigates
//! and edits. The session owns the document; this adds what the screen needs on top: a flat
//! list of the document's regions in reading order, which one is selected, which view is active,
//! and the status line.

use crate::error::SessionError;
use crate::registry::{RegionKey, RegionSlot};
use crate::richtext::{Command, Motion, Region};
use crate::section::Section;
use crate::session::{LoadState, Session};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Shows every section with its regions; arrows pick a region.
    Document,
    /// Edits the selected region in place.
    Edit,
    /// Captures vim-style command input after ':' keystroke.
    Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What the event loop should do after a command runs.
pub enum Flow {
    /// Keep running.
    Continue,
    /// Leave the application.
    Quit,
}

/// Bridges the editing session and the interactive screen.
pub struct AppState {
    /// The loaded document and its controllers.
    pub session: Session,
    /// Every region of the loaded document, in reading order.
    pub regions: Vec<RegionKey>,
    /// Selected entry of `regions`.
    pub current_region: usize,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Accumulates vim-style command input after ':' is pressed.
    pub command_buffer: String,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Where `:w` writes exported files.
    pub export_dir: PathBuf,
}

impl AppState {
    #[must_use]
    /// Wraps a session, opening every region of its document.
    pub fn new(session: Session, export_dir: PathBuf) -> Self {
        let mut app = Self {
            session,
            regions: Vec::new(),
            current_region: 0,
            current_view: View::Document,
            command_buffer: String::new(),
            message: None,
            export_dir,
        };
        app.refresh_regions();
        app
    }

    /// Rebuilds the region list from the session's current model.
    fn refresh_regions(&mut self) {
        self.session.open_regions();
        self.regions.clear();
        self.current_region = 0;
        if let Some(model) = self.session.model() {
            for (index, section) in model.iter().enumerate() {
                let slots: &[RegionSlot] = match section {
                    Section::Title { .. } => &[RegionSlot::Headline],
                    Section::Content { .. } => &[RegionSlot::Headline, RegionSlot::Content],
                };
                self.regions.extend(
                    slots
                        .iter()
                        .filter_map(|&slot| RegionKey::for_section(model, index, slot)),
                );
            }
        }
        if let LoadState::Failed { file_name, error } = self.session.state() {
            self.message = Some(format!("Could not read {file_name}: {error}"));
        }
    }

    /// Loads another file, replacing the document and every controller.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read; the previous document is discarded either way.
    pub fn load_file(&mut self, path: &Path) -> Result<(), SessionError> {
        let loaded = self.session.load_path(path);
        self.current_view = View::Document;
        self.message = None;
        self.refresh_regions();
        loaded
    }

    #[must_use]
    /// Key of the selected region.
    pub fn current_key(&self) -> Option<&RegionKey> {
        self.regions.get(self.current_region)
    }

    #[must_use]
    /// Controller of the region for `key`.
    pub fn region(&self, key: &RegionKey) -> Option<&Region> {
        self.session.registry().and_then(|r| r.get(key).ok())
    }

    /// Controller of the selected region, mutably.
    pub fn current_region_mut(&mut self) -> Option<&mut Region> {
        let key = self.regions.get(self.current_region)?.clone();
        let (_, registry) = self.session.parts_mut()?;
        registry.get_mut(&key)
    }

    /// Selects the previous region.
    pub fn select_prev(&mut self) {
        self.current_region = self.current_region.saturating_sub(1);
    }

    /// Selects the next region.
    pub fn select_next(&mut self) {
        if self.current_region + 1 < self.regions.len() {
            self.current_region += 1;
        }
    }

    /// Starts editing the selected region.
    pub fn enter_edit_view(&mut self) {
        if self.current_key().is_some() {
            self.current_view = View::Edit;
            self.message = None;
        }
    }

    /// Stops editing; edits stay in the controller until the next export.
    pub fn exit_edit_view(&mut self) {
        self.current_view = View::Document;
    }

    /// Runs a formatting command on the selected region, reporting when its role lacks it.
    pub fn apply_command(&mut self, command: Command) -> bool {
        let Some(region) = self.current_region_mut() else {
            return false;
        };
        let role = region.role();
        let applied = region.apply(command);
        if !applied {
            self.message = Some(format!("No {} in the {role}", command.label()));
        }
        applied
    }

    /// Handles a key press while editing.
    pub fn edit_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::ALT) {
            if let KeyCode::Char(c) = key.code {
                let command = self
                    .current_region_mut()
                    .and_then(|r| r.commands().iter().copied().find(|cmd| cmd.key() == c));
                match command {
                    Some(command) => {
                        self.apply_command(command);
                    }
                    None => self.message = Some(format!("Nothing bound to Alt+{c} here")),
                }
            }
            return;
        }
        if key.code == KeyCode::Esc {
            self.exit_edit_view();
            return;
        }
        let extend = key.modifiers.contains(KeyModifiers::SHIFT);
        let Some(region) = self.current_region_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                region.select_all();
            }
            KeyCode::Char(c) => region.insert_text(c.encode_utf8(&mut [0; 4])),
            KeyCode::Backspace => region.delete_backward(),
            KeyCode::Enter => region.split_block(),
            KeyCode::Left => region.move_cursor(Motion::Left, extend),
            KeyCode::Right => region.move_cursor(Motion::Right, extend),
            KeyCode::Up => region.move_cursor(Motion::Up, extend),
            KeyCode::Down => region.move_cursor(Motion::Down, extend),
            KeyCode::Home => region.move_cursor(Motion::LineStart, extend),
            KeyCode::End => region.move_cursor(Motion::LineEnd, extend),
            _ => {}
        }
    }

    /// Exports the document into the export directory.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is loaded, a region is missing, or the file cannot be written.
    pub fn export(&self) -> Result<PathBuf, SessionError> {
        let file = self.session.export()?;
        file.write_to_dir(&self.export_dir)
    }

    /// Runs a `:` command line.
    pub fn run_command(&mut self, line: &str) -> Flow {
        let line = line.trim();
        let (cmd, arg) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, a)| (c, a.trim()));
        match cmd {
            "w" => {
                self.report_export();
            }
            "wq" | "x" => {
                if self.report_export() {
                    return Flow::Quit;
                }
            }
            "q" | "q!" => return Flow::Quit,
            "e" if !arg.is_empty() => {
                if let Err(e) = self.load_file(Path::new(arg)) {
                    self.message = Some(format!("Error loading {arg}: {e}"));
                }
            }
            "e" => self.message = Some("Usage: :e <path>".to_string()),
            _ => self.message = Some(format!("Unknown command: {line}")),
        }
        Flow::Continue
    }

    fn report_export(&mut self) -> bool {
        match self.export() {
            Ok(path) => {
                self.message = Some(format!("Exported to {}", path.display()));
                true
            }
            Err(e) => {
                self.message = Some(format!("Error exporting: {e}"));
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
