use crate::PlayerId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RaceError>;

#[derive(Error, Debug)]
pub enum RaceError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Operation not allowed: {0}")]
    Precondition(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Payment code error: {0}")]
    Render(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification used by front ends to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Precondition,
    Other,
}

impl RaceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::PlayerNotFound(_) => ErrorKind::NotFound,
            Self::Precondition(_) => ErrorKind::Precondition,
            _ => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_error_kinds() {
        assert_eq!(RaceError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(
            RaceError::PlayerNotFound(Uuid::new_v4()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(RaceError::precondition("x").kind(), ErrorKind::Precondition);
        assert_eq!(RaceError::config("x").kind(), ErrorKind::Other);
    }

    #[test]
    fn test_error_display() {
        let err = RaceError::precondition("race already started");
        assert_eq!(err.to_string(), "Operation not allowed: race already started");
    }
}
