//! Error types for promptlib
//!
//! This module defines the single error type shared by the store, the
//! session layer and the command bridge. Every variant maps to a
//! user-facing message and a category so the UI layer can decide how to
//! present it.

use thiserror::Error;

/// Result type alias for promptlib operations
pub type Result<T> = std::result::Result<T, PromptLibError>;

/// Main error type for promptlib
#[derive(Debug, Error)]
pub enum PromptLibError {
    /// Input failed validation (empty title, title too long, empty text, ...)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The owner already has a prompt with this title
    #[error("A prompt already exists with title '{title}'")]
    DuplicateTitle { title: String },

    /// No prompt with the given id
    #[error("Prompt {id} not found")]
    NotFound { id: i64 },

    /// Command not found in registry
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid command arguments
    #[error("Invalid arguments for command '{command}': {reason}")]
    InvalidArgs { command: String, reason: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error (catch-all)
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for PromptLibError {
    fn from(err: anyhow::Error) -> Self {
        PromptLibError::Other(err.to_string())
    }
}

impl From<String> for PromptLibError {
    fn from(err: String) -> Self {
        PromptLibError::Other(err)
    }
}

impl From<&str> for PromptLibError {
    fn from(err: &str) -> Self {
        PromptLibError::Other(err.to_string())
    }
}

impl PromptLibError {
    /// Shorthand for building an `InvalidArgs` error
    pub fn invalid_args(command: &str, reason: impl Into<String>) -> Self {
        PromptLibError::InvalidArgs {
            command: command.to_string(),
            reason:  reason.into(),
        }
    }

    /// Get user-friendly error message for display in the UI
    pub fn user_message(&self) -> String {
        match self {
            PromptLibError::ValidationError(msg) => msg.clone(),
            PromptLibError::DuplicateTitle { .. } => {
                "A prompt already exists with given title".to_string()
            },
            PromptLibError::NotFound { .. } => {
                "The selected prompt no longer exists. Please refresh the prompt list".to_string()
            },
            PromptLibError::CommandNotFound(cmd) => {
                format!("Command '{}' not found.", cmd)
            },
            PromptLibError::InvalidArgs { command, reason } => {
                format!("Invalid arguments for '{}': {}", command, reason)
            },
            PromptLibError::DatabaseError(err) => {
                format!("Database error: {}", err)
            },
            _ => self.to_string(),
        }
    }

    /// Get error category for logging/telemetry
    pub fn category(&self) -> &'static str {
        match self {
            PromptLibError::ValidationError(_) => "validation",
            PromptLibError::DuplicateTitle { .. } => "duplicate_title",
            PromptLibError::NotFound { .. } => "not_found",
            PromptLibError::CommandNotFound(_) => "command",
            PromptLibError::InvalidArgs { .. } => "arguments",
            PromptLibError::SerdeError(_) => "serialization",
            PromptLibError::DatabaseError(_) => "database",
            PromptLibError::IoError(_) => "io",
            PromptLibError::ConfigError(_) => "config",
            PromptLibError::Other(_) => "other",
        }
    }

    /// Whether the error is a user-facing warning that leaves the session usable
    ///
    /// Validation, duplicate-title and not-found errors never mutate storage
    /// and the user can correct the input and retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PromptLibError::ValidationError(_)
                | PromptLibError::DuplicateTitle { .. }
                | PromptLibError::NotFound { .. }
        )
    }
}
