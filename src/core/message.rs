use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptRole {
    User,
    Assistant,
    AppError,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub role: TranscriptRole,
    pub content: String,
    pub created_at: DateTime<Local>,
}

impl TranscriptRole {
    /// Role name on the wire, or `None` for app-authored messages that are
    /// rendered locally but never transmitted.
    pub fn to_api_role(self) -> Option<&'static str> {
        match self {
            TranscriptRole::User => Some("user"),
            TranscriptRole::Assistant => Some("assistant"),
            _ => None,
        }
    }

    pub fn is_user(self) -> bool {
        self == TranscriptRole::User
    }

    pub fn is_assistant(self) -> bool {
        self == TranscriptRole::Assistant
    }

    pub fn is_app(self) -> bool {
        self == TranscriptRole::AppError
    }
}

impl Message {
    pub fn new(role: TranscriptRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Local::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TranscriptRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TranscriptRole::Assistant, content)
    }

    pub fn app_error(content: impl Into<String>) -> Self {
        Self::new(TranscriptRole::AppError, content)
    }

    pub fn is_user(&self) -> bool {
        self.role.is_user()
    }

    pub fn is_assistant(&self) -> bool {
        self.role.is_assistant()
    }

    pub fn is_app(&self) -> bool {
        self.role.is_app()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_roles_are_not_sent_to_the_api() {
        assert_eq!(TranscriptRole::AppError.to_api_role(), None);
        assert_eq!(TranscriptRole::User.to_api_role(), Some("user"));
        assert_eq!(TranscriptRole::Assistant.to_api_role(), Some("assistant"));
    }

    #[test]
    fn constructors_set_roles() {
        assert!(Message::user("hi").is_user());
        assert!(Message::assistant("hello").is_assistant());
        assert!(Message::app_error("boom").is_app());
    }
}
