// src/errors.rs
// DOCUMENTATION: Custom error types for the review engine
// PURPOSE: Centralized error handling for every review operation

use std::fmt;
use thiserror::Error;

/// Generic message shown to users when storage or an unexpected failure
/// aborts a request. The technical detail only goes to the logs.
pub const GENERIC_USER_MESSAGE: &str =
    "Se ha presentado un problema tratando de llevar a cabo la operación deseada";

/// Content policy identifiers
/// DOCUMENTATION: Each policy raises its own violation so callers can tell them apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// P1: low ratings need a long comment naming a concrete negative aspect
    NegativeSentimentFloor,
    /// P2: no links, bare domains or markup tags
    NoLinksOrMarkup,
    /// P3: no words from the profanity lexicon
    NoProfanity,
}

impl Policy {
    /// Stable code used in messages and logs
    pub fn code(&self) -> &'static str {
        match self {
            Policy::NegativeSentimentFloor => "POL-REV-001",
            Policy::NoLinksOrMarkup => "POL-REV-002",
            Policy::NoProfanity => "POL-REV-003",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Discriminant of [`ReviewError`], handy for assertions and log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Obligatory,
    Length,
    Format,
    Range,
    PolicyViolation(Policy),
    NotFound,
    InvalidState,
    DuplicateReview,
    OwnershipMismatch,
    Persistence,
    Unexpected,
}

/// Review engine error types
/// DOCUMENTATION: Business-rule variants carry the user-facing message;
/// Persistence and Unexpected carry a technical message for operators as well
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Error de obligatoriedad: {0}")]
    Obligatory(String),

    #[error("Error de longitud: {0}")]
    Length(String),

    #[error("Error de formato: {0}")]
    Format(String),

    #[error("Error de rango: {0}")]
    Range(String),

    #[error("{policy}: {message}")]
    PolicyViolation { policy: Policy, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    DuplicateReview(String),

    #[error("{0}")]
    OwnershipMismatch(String),

    #[error("{user_message}")]
    Persistence {
        user_message: String,
        technical_message: String,
    },

    #[error("{user_message}")]
    Unexpected {
        user_message: String,
        technical_message: String,
    },
}

impl ReviewError {
    pub fn policy(policy: Policy, message: impl Into<String>) -> Self {
        ReviewError::PolicyViolation {
            policy,
            message: message.into(),
        }
    }

    /// Storage failure with a generic user message
    pub fn persistence(technical_message: impl Into<String>) -> Self {
        ReviewError::Persistence {
            user_message: GENERIC_USER_MESSAGE.to_string(),
            technical_message: technical_message.into(),
        }
    }

    pub fn unexpected(
        user_message: impl Into<String>,
        technical_message: impl Into<String>,
    ) -> Self {
        ReviewError::Unexpected {
            user_message: user_message.into(),
            technical_message: technical_message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ReviewError::Obligatory(_) => ErrorKind::Obligatory,
            ReviewError::Length(_) => ErrorKind::Length,
            ReviewError::Format(_) => ErrorKind::Format,
            ReviewError::Range(_) => ErrorKind::Range,
            ReviewError::PolicyViolation { policy, .. } => ErrorKind::PolicyViolation(*policy),
            ReviewError::NotFound(_) => ErrorKind::NotFound,
            ReviewError::InvalidState(_) => ErrorKind::InvalidState,
            ReviewError::DuplicateReview(_) => ErrorKind::DuplicateReview,
            ReviewError::OwnershipMismatch(_) => ErrorKind::OwnershipMismatch,
            ReviewError::Persistence { .. } => ErrorKind::Persistence,
            ReviewError::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    /// True for rule violations the client can fix by changing the request
    pub fn is_business(&self) -> bool {
        !matches!(
            self,
            ReviewError::Persistence { .. } | ReviewError::Unexpected { .. }
        )
    }

    /// Message safe to show to the client
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Message for operator logs
    pub fn technical_message(&self) -> String {
        match self {
            ReviewError::Persistence {
                technical_message, ..
            }
            | ReviewError::Unexpected {
                technical_message, ..
            } => technical_message.clone(),
            other => other.to_string(),
        }
    }
}
