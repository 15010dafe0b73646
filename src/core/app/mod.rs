use std::time::Instant;

use crate::core::transcript::Transcript;

pub mod actions;
pub mod session;
pub mod ui_state;

pub use actions::{apply_action, apply_actions, AppAction, AppCommand};
pub use session::SessionContext;
pub use ui_state::{HistoryMetrics, UiState};

/// State of the chat window. Owned by the UI loop; completion workers only
/// ever see snapshots of the transcript.
pub struct App {
    pub session: SessionContext,
    pub transcript: Transcript,
    pub ui: UiState,
}

impl App {
    pub fn new(session: SessionContext, ui: UiState) -> Self {
        Self {
            session,
            transcript: Transcript::new(),
            ui,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.ui.is_pending()
    }

    pub fn assistant_name(&self) -> &str {
        &self.session.assistant_name
    }

    pub(crate) fn push_user(&mut self, content: String, now: Instant) {
        self.transcript.push_user(content);
        self.ui.note_message_added(now);
    }

    pub(crate) fn push_assistant(&mut self, content: String, now: Instant) {
        self.transcript.push_assistant(content);
        self.ui.note_message_added(now);
    }

    pub(crate) fn push_app_error(&mut self, content: String, now: Instant) {
        self.transcript.push_app_error(content);
        self.ui.note_message_added(now);
    }
}
