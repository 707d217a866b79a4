use std::fmt;

use crate::error::AdvisorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-visible message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub detail: Option<String>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            detail: None,
        }
    }

    pub fn warning(message: impl Into<String>, err: &AdvisorError) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
            detail: Some(err.to_string()),
        }
    }

    pub fn error(message: impl Into<String>, err: &AdvisorError) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            detail: Some(err.to_string()),
        }
    }

    /// Validation failures are shown with their own wording.
    pub fn rejected(err: &AdvisorError) -> Self {
        let message = match err {
            AdvisorError::Validation(v) => v.to_string(),
            other => other.to_string(),
        };
        Self {
            level: NoticeLevel::Warning,
            message,
            detail: None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({})", self.message, detail),
            None => f.write_str(&self.message),
        }
    }
}
