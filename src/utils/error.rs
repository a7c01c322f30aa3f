use crate::domain::model::{EventId, ParticipantId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Participant {id} not found")]
    ParticipantNotFound { id: ParticipantId },

    #[error("Event '{description}' not found")]
    EventNotFound { description: String },

    #[error("Event {id} not found")]
    EventNotFoundById { id: EventId },

    #[error("Repository operation failed: {message}")]
    RepositoryError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Repository,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::ParticipantNotFound { .. }
            | PlannerError::EventNotFound { .. }
            | PlannerError::EventNotFoundById { .. } => ErrorCategory::NotFound,
            PlannerError::RepositoryError { .. }
            | PlannerError::IoError(_)
            | PlannerError::SerializationError(_) => ErrorCategory::Repository,
            PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound => ErrorSeverity::Medium,
            ErrorCategory::Repository => ErrorSeverity::Critical,
            ErrorCategory::Config => ErrorSeverity::High,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PlannerError::ParticipantNotFound { id } => {
                format!("Register participant {} before attaching it to an event", id)
            }
            PlannerError::EventNotFound { description } => {
                format!("Create an event described '{}' first", description)
            }
            PlannerError::EventNotFoundById { id } => {
                format!("Check that event {} exists in the store", id)
            }
            PlannerError::RepositoryError { .. }
            | PlannerError::IoError(_)
            | PlannerError::SerializationError(_) => {
                "Check that the data path is writable and its contents are intact".to_string()
            }
            PlannerError::ConfigValidationError { field, .. }
            | PlannerError::InvalidConfigValueError { field, .. }
            | PlannerError::MissingConfigError { field } => {
                format!("Fix the '{}' setting and run again", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::NotFound => format!("Reference could not be resolved: {}", self),
            ErrorCategory::Repository => format!("Storage failure: {}", self),
            ErrorCategory::Config => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
