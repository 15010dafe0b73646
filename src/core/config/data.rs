use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::constants::{
    DEFAULT_ASSISTANT_NAME, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_WINDOW_HEIGHT,
    DEFAULT_WINDOW_TITLE, DEFAULT_WINDOW_WIDTH, PLACEHOLDER_API_KEY,
};

/// Credentials section. Only a single static key is supported.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ApiKeys {
    pub openai: Option<String>,
}

/// Window chrome and initial geometry.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: Option<String>,
    /// Initial width in terminal cells
    pub width: Option<u16>,
    /// Initial height in terminal cells
    pub height: Option<u16>,
    pub movable: Option<bool>,
    pub closable: Option<bool>,
    pub maximizable: Option<bool>,
    pub minimizable: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Model identifier sent with every request (e.g., "gpt-3.5-turbo")
    pub model: Option<String>,
    /// Base URL of an OpenAI-compatible API
    pub base_url: Option<String>,
    /// Header shown above assistant replies
    pub assistant_name: Option<String>,
    #[serde(default)]
    pub api_keys: ApiKeys,
    #[serde(default)]
    pub window: WindowConfig,
}

/// Keys accepted by `minichat set` and `minichat unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ApiKey,
    Model,
    BaseUrl,
    AssistantName,
    Title,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::ApiKey,
        ConfigKey::Model,
        ConfigKey::BaseUrl,
        ConfigKey::AssistantName,
        ConfigKey::Title,
    ];

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(key.trim()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::ApiKey => "api-key",
            ConfigKey::Model => "model",
            ConfigKey::BaseUrl => "base-url",
            ConfigKey::AssistantName => "assistant-name",
            ConfigKey::Title => "title",
        }
    }
}

impl Config {
    /// Contents written on first run: defaults spelled out so the user can see
    /// what to edit, plus a placeholder credential.
    pub fn first_run() -> Self {
        Self {
            model: Some(DEFAULT_MODEL.to_string()),
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            api_keys: ApiKeys {
                openai: Some(PLACEHOLDER_API_KEY.to_string()),
            },
            ..Default::default()
        }
    }

    pub fn model(&self) -> &str {
        non_empty(self.model.as_deref()).unwrap_or(DEFAULT_MODEL)
    }

    pub fn base_url(&self) -> &str {
        non_empty(self.base_url.as_deref()).unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn assistant_name(&self) -> &str {
        non_empty(self.assistant_name.as_deref()).unwrap_or(DEFAULT_ASSISTANT_NAME)
    }

    pub fn window_title(&self) -> &str {
        non_empty(self.window.title.as_deref()).unwrap_or(DEFAULT_WINDOW_TITLE)
    }

    pub fn window_size(&self) -> (u16, u16) {
        (
            self.window.width.unwrap_or(DEFAULT_WINDOW_WIDTH),
            self.window.height.unwrap_or(DEFAULT_WINDOW_HEIGHT),
        )
    }

    /// The stored credential, or `None` when it is missing or still the placeholder.
    pub fn stored_api_key(&self) -> Option<&str> {
        non_empty(self.api_keys.openai.as_deref()).filter(|key| *key != PLACEHOLDER_API_KEY)
    }

    pub fn set(&mut self, key: ConfigKey, value: String) {
        let value = Some(value);
        match key {
            ConfigKey::ApiKey => self.api_keys.openai = value,
            ConfigKey::Model => self.model = value,
            ConfigKey::BaseUrl => self.base_url = value,
            ConfigKey::AssistantName => self.assistant_name = value,
            ConfigKey::Title => self.window.title = value,
        }
    }

    pub fn unset(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::ApiKey => self.api_keys.openai = None,
            ConfigKey::Model => self.model = None,
            ConfigKey::BaseUrl => self.base_url = None,
            ConfigKey::AssistantName => self.assistant_name = None,
            ConfigKey::Title => self.window.title = None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Mask all but the last four characters of a credential for display.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
