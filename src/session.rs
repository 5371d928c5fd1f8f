//! The editing session: which file is loaded, its section model, and its live controllers.
//!
//! Session state is one value that is replaced wholesale on every load. The model and the
//! registry only exist together inside [`LoadState::Ready`], so a new file can never be
//! rendered against the previous file's controllers.
//!
//! ```text
//! Unresolved -> Loading -> Ready
//!                  |   \-> Failed
//!                  \ (begin_load again: the earlier ticket goes stale)
//! ```

use crate::error::{ExportError, ParseError, SessionError};
use crate::parser;
use crate::registry::SessionRegistry;
use crate::section::SectionModel;
use crate::serializer;
use std::fs;
use std::path::{Path, PathBuf};

/// Media type of exported documents.
pub const EXPORT_MIME: &str = "text/html";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Receipt for a started load. Only the most recently issued ticket can complete.
pub struct LoadTicket(u64);

#[derive(Debug)]
/// Where the session is in its load lifecycle.
pub enum LoadState {
    /// No file chosen yet.
    Unresolved,
    /// A file was chosen and its contents are being read.
    Loading {
        /// Name of the chosen file.
        file_name: String,
        /// Ticket that may complete this load.
        ticket: LoadTicket,
    },
    /// The file parsed; its regions may be opened, edited and exported.
    Ready {
        /// Name of the loaded file.
        file_name: String,
        /// Structure and order of the document.
        model: SectionModel,
        /// Controllers for the regions opened so far.
        registry: SessionRegistry,
    },
    /// The file could not be read.
    Failed {
        /// Name of the file that failed.
        file_name: String,
        /// Why it failed.
        error: ParseError,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A finished export, ready to be handed to whatever saves it.
pub struct ExportedFile {
    /// File name to save under; the same name the document was loaded from.
    pub file_name: String,
    /// Media type of `contents`.
    pub mime: &'static str,
    /// The serialized document.
    pub contents: String,
}

impl ExportedFile {
    /// Writes the file into `dir`, creating the directory if needed. Returns the written path.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the directory cannot be created or the file cannot be written.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, SessionError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.contents)?;
        tracing::info!(path = %path.display(), bytes = self.contents.len(), "wrote export");
        Ok(path)
    }
}

#[derive(Debug)]
/// One user's editing session.
pub struct Session {
    state: LoadState,
    issued: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    /// A session with no file chosen.
    pub fn new() -> Self {
        Self {
            state: LoadState::Unresolved,
            issued: 0,
        }
    }

    #[must_use]
    /// Current state.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Starts loading `file_name`, discarding the current model and every controller at once.
    pub fn begin_load(&mut self, file_name: impl Into<String>) -> LoadTicket {
        self.issued += 1;
        let ticket = LoadTicket(self.issued);
        let file_name = file_name.into();
        tracing::info!(%file_name, "loading");
        self.state = LoadState::Loading { file_name, ticket };
        ticket
    }

    /// Completes the load `ticket` started with the file's bytes.
    ///
    /// Returns `false` and changes nothing if another load was started since: the most recently
    /// chosen file always wins, whatever order reads finish in.
    pub fn finish_load(&mut self, ticket: LoadTicket, bytes: &[u8]) -> bool {
        let LoadState::Loading {
            file_name,
            ticket: current,
        } = &mut self.state
        else {
            tracing::debug!(?ticket, "ignoring load result, nothing is loading");
            return false;
        };
        if *current != ticket {
            tracing::debug!(?ticket, "ignoring stale load result");
            return false;
        }
        let file_name = std::mem::take(file_name);
        self.state = match parser::parse_bytes(bytes) {
            Ok(model) => {
                tracing::info!(%file_name, sections = model.len(), "loaded");
                LoadState::Ready {
                    file_name,
                    model,
                    registry: SessionRegistry::new(),
                }
            }
            Err(error) => {
                tracing::warn!(%file_name, %error, "could not read file");
                LoadState::Failed { file_name, error }
            }
        };
        true
    }

    /// Loads `file_name` from bytes already in hand.
    pub fn load(&mut self, file_name: impl Into<String>, bytes: &[u8]) {
        let ticket = self.begin_load(file_name);
        self.finish_load(ticket, bytes);
    }

    /// Reads `path` from disk and loads it under its file name.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read; the session is then left unresolved.
    pub fn load_path(&mut self, path: &Path) -> Result<(), SessionError> {
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let ticket = self.begin_load(file_name);
        match fs::read(path) {
            Ok(bytes) => {
                self.finish_load(ticket, &bytes);
                Ok(())
            }
            Err(e) => {
                self.state = LoadState::Unresolved;
                Err(e.into())
            }
        }
    }

    #[must_use]
    /// Name of the chosen file, in any state but unresolved.
    pub fn file_name(&self) -> Option<&str> {
        match &self.state {
            LoadState::Unresolved => None,
            LoadState::Loading { file_name, .. }
            | LoadState::Ready { file_name, .. }
            | LoadState::Failed { file_name, .. } => Some(file_name),
        }
    }

    #[must_use]
    /// The section model, when ready.
    pub fn model(&self) -> Option<&SectionModel> {
        match &self.state {
            LoadState::Ready { model, .. } => Some(model),
            _ => None,
        }
    }

    #[must_use]
    /// The registry, when ready.
    pub fn registry(&self) -> Option<&SessionRegistry> {
        match &self.state {
            LoadState::Ready { registry, .. } => Some(registry),
            _ => None,
        }
    }

    /// Model and registry together, when ready.
    pub fn parts_mut(&mut self) -> Option<(&SectionModel, &mut SessionRegistry)> {
        match &mut self.state {
            LoadState::Ready {
                model, registry, ..
            } => Some((model, registry)),
            _ => None,
        }
    }

    /// Opens every region of the loaded document. Returns how many regions are registered.
    pub fn open_regions(&mut self) -> usize {
        let Some((model, registry)) = self.parts_mut() else {
            return 0;
        };
        registry.open_all(model);
        registry.len()
    }

    /// Serializes the current document.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NotReady`] unless a document is loaded, or
    /// [`ExportError::UnknownRegion`] if a region was never opened.
    pub fn export(&self) -> Result<ExportedFile, ExportError> {
        let LoadState::Ready {
            file_name,
            model,
            registry,
        } = &self.state
        else {
            return Err(ExportError::NotReady);
        };
        let contents = serializer::serialize(model, registry)?;
        tracing::info!(%file_name, sections = model.len(), "exported");
        Ok(ExportedFile {
            file_name: file_name.clone(),
            mime: EXPORT_MIME,
            contents,
        })
    }
}

#[cfg(test)]
#[path = "tests/session.rs"]
mod tests;
