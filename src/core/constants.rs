//! Shared constants used across the application

/// Credential written to a freshly created config file.
pub const PLACEHOLDER_API_KEY: &str = "APIKeyHere";

/// Model identifier sent with every completion request unless overridden.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_ASSISTANT_NAME: &str = "ChatGPT";

pub const DEFAULT_WINDOW_TITLE: &str = "ChatGPT MiniGUI";

/// Window size in cells used at startup and when restoring from maximized.
pub const DEFAULT_WINDOW_WIDTH: u16 = 100;
pub const DEFAULT_WINDOW_HEIGHT: u16 = 30;

/// Smallest window the resize handles will produce. Title bar, separator,
/// a few history rows and the input box must still fit.
pub const MIN_WINDOW_WIDTH: u16 = 30;
pub const MIN_WINDOW_HEIGHT: u16 = 12;
