use std::time::{Duration, Instant};

use tui_textarea::TextArea;

use crate::ui::bubbles::{fade_progress, FADE_DURATION};
use crate::ui::chrome::WindowChrome;
use crate::ui::theme::Theme;
use crate::utils::scroll::ScrollState;

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
const SPINNER_FRAME_TIME: Duration = Duration::from_millis(100);

/// Line counts from the most recent history layout, kept for scroll math
/// between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryMetrics {
    pub total_lines: usize,
    pub viewport_height: u16,
}

pub struct UiState {
    pub theme: Theme,
    pub chrome: WindowChrome,
    pub scroll: ScrollState,
    pub history: HistoryMetrics,
    pub exit_requested: bool,
    textarea: TextArea<'static>,
    pending_since: Option<Instant>,
    message_shown_at: Vec<Instant>,
}

impl UiState {
    pub fn new(theme: Theme, chrome: WindowChrome) -> Self {
        let mut ui = Self {
            theme,
            chrome,
            scroll: ScrollState::default(),
            history: HistoryMetrics::default(),
            exit_requested: false,
            textarea: TextArea::default(),
            pending_since: None,
            message_shown_at: Vec::new(),
        };
        ui.configure_textarea();
        ui
    }

    pub(crate) fn configure_textarea(&mut self) {
        let enabled = !self.is_pending();
        let style = if enabled {
            self.theme.input_text_style
        } else {
            self.theme.disabled_input_style()
        };
        self.textarea.set_style(style);
        self.textarea.set_cursor_line_style(ratatui::style::Style::default());
        self.textarea.set_cursor_style(if enabled {
            self.theme.input_cursor_style
        } else {
            style
        });
        self.textarea.set_placeholder_text("Type a message, Enter to send");
        self.textarea.set_placeholder_style(self.theme.placeholder_style);
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn clear_input(&mut self) {
        self.textarea = TextArea::default();
        self.configure_textarea();
    }

    /// Apply an edit to the input. Edits are dropped while the input is disabled.
    pub fn apply_textarea_edit<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        if self.is_pending() {
            return false;
        }
        f(&mut self.textarea);
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    pub fn is_input_enabled(&self) -> bool {
        !self.is_pending()
    }

    pub(crate) fn begin_pending(&mut self, now: Instant) {
        self.pending_since = Some(now);
        self.configure_textarea();
    }

    pub(crate) fn end_pending(&mut self) {
        self.pending_since = None;
        self.configure_textarea();
    }

    /// Record that the transcript grew by one entry, starting its fade-in.
    pub(crate) fn note_message_added(&mut self, now: Instant) {
        self.message_shown_at.push(now);
    }

    /// Eased fade-in progress for the message at `index`.
    pub fn fade_progress(&self, index: usize, now: Instant) -> f32 {
        self.message_shown_at
            .get(index)
            .map(|shown| fade_progress(now.saturating_duration_since(*shown)))
            .unwrap_or(1.0)
    }

    pub fn spinner_frame(&self, now: Instant) -> Option<&'static str> {
        let since = self.pending_since?;
        let ticks = now.saturating_duration_since(since).as_millis()
            / SPINNER_FRAME_TIME.as_millis();
        Some(SPINNER_FRAMES[ticks as usize % SPINNER_FRAMES.len()])
    }

    /// True while anything on screen changes without input: a fade or the spinner.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.is_pending()
            || self
                .message_shown_at
                .last()
                .is_some_and(|shown| now.saturating_duration_since(*shown) < FADE_DURATION)
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll.scroll_up(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let HistoryMetrics {
            total_lines,
            viewport_height,
        } = self.history;
        self.scroll.scroll_down(lines, total_lines, viewport_height);
    }

    /// Page size for PageUp/PageDown, one line short of the viewport.
    pub fn page_lines(&self) -> u16 {
        self.history.viewport_height.saturating_sub(1).max(1)
    }
}
