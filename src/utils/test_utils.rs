use std::sync::Arc;

use ratatui::layout::Rect;

use crate::core::app::{App, SessionContext, UiState};
use crate::core::completion::CompletionBackend;
use crate::core::worker::test_support::ScriptedBackend;
use crate::ui::chrome::{ChromeOptions, WindowChrome};
use crate::ui::theme::Theme;

pub const TEST_SCREEN: Rect = Rect {
    x: 0,
    y: 0,
    width: 120,
    height: 40,
};

pub fn create_test_app_with_backend(backend: Arc<dyn CompletionBackend>) -> App {
    let session = SessionContext::new(backend, "test-model", "ChatGPT");
    let chrome = WindowChrome::new("Test Window", ChromeOptions::default(), (100, 30), TEST_SCREEN);
    let ui = UiState::new(Theme::dark_default(), chrome);
    App::new(session, ui)
}

pub fn create_test_app() -> App {
    create_test_app_with_backend(Arc::new(ScriptedBackend::new(Vec::new())))
}
