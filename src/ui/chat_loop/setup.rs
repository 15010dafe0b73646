use std::sync::Arc;

use ratatui::layout::Rect;
use tokio::sync::Mutex;
use tracing::info;

use super::AppHandle;

use crate::core::{
    app::{App, SessionContext, UiState},
    completion::OpenAiCompletionClient,
    config::data::{Config, WindowConfig},
};
use crate::ui::chrome::{ChromeOptions, WindowChrome};
use crate::ui::theme::Theme;

/// Everything the chat window needs beyond the config file itself.
pub struct ChatLaunch {
    pub api_key: String,
    pub model_override: Option<String>,
}

/// Unset flags give a movable window with only a close button.
pub(crate) fn chrome_options(window: &WindowConfig) -> ChromeOptions {
    ChromeOptions {
        movable: window.movable.unwrap_or(true),
        closable: window.closable.unwrap_or(true),
        maximizable: window.maximizable.unwrap_or(false),
        minimizable: window.minimizable.unwrap_or(false),
    }
}

/// Build the application state for the chat loop from a loaded config.
pub fn bootstrap_app(
    config: &Config,
    launch: ChatLaunch,
    screen: Rect,
) -> Result<AppHandle, Box<dyn std::error::Error>> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("minichat/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let model = launch
        .model_override
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| config.model().to_string());

    let backend = OpenAiCompletionClient::new(client, config.base_url(), launch.api_key);
    info!(model = %model, base_url = %backend.base_url(), "chat session ready");

    let session = SessionContext::new(Arc::new(backend), model, config.assistant_name());
    let chrome = WindowChrome::new(
        config.window_title(),
        chrome_options(&config.window),
        config.window_size(),
        screen,
    );
    let ui = UiState::new(Theme::dark_default(), chrome);

    Ok(Arc::new(Mutex::new(App::new(session, ui))))
}
