//! Editor context capability.
//!
//! Identifies which client/editor initiated a request and, optionally, how
//! to open a UI window back in that client. Construction is fallible:
//! requests naming an editor this service cannot talk to are rejected
//! before any operation runs.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::CoreError;

/// Callback used to open a UI window in the client that issued the request.
pub type OpenWindowFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Editors this service knows how to talk back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Editor {
    Sublime,
    Atom,
    VsCode,
}

impl Editor {
    pub fn name(&self) -> &'static str {
        match self {
            Editor::Sublime => "sublime",
            Editor::Atom => "atom",
            Editor::VsCode => "vscode",
        }
    }
}

impl FromStr for Editor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sublime" => Ok(Editor::Sublime),
            "atom" => Ok(Editor::Atom),
            "vscode" | "code" => Ok(Editor::VsCode),
            _ => Err(CoreError::UnsupportedEditor(s.to_string())),
        }
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability handed to operations describing the initiating client.
#[derive(Clone)]
pub struct EditorContext {
    editor: Editor,
    open_window: Option<OpenWindowFn>,
}

impl EditorContext {
    /// Build the capability from a requested editor name.
    ///
    /// Fails with [`CoreError::UnsupportedEditor`] for names this service
    /// does not support; the dispatcher folds that into the normal error
    /// envelope.
    pub fn new(name: &str, open_window: Option<OpenWindowFn>) -> Result<Self, CoreError> {
        Ok(Self {
            editor: name.parse()?,
            open_window,
        })
    }

    pub fn editor(&self) -> Editor {
        self.editor
    }

    /// Open a window in the initiating client, if a callback was supplied.
    ///
    /// Returns whether anything was opened.
    pub fn open_window(&self, url: &str) -> bool {
        match &self.open_window {
            Some(open) => {
                open(url);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorContext")
            .field("editor", &self.editor)
            .field("open_window", &self.open_window.is_some())
            .finish()
    }
}
