use serde::Serialize;
use thiserror::Error;

/// A single rejected field in a signup payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid data: {} field(s) rejected", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Email already registered on the waitlist")]
    AlreadyRegistered,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Email delivery error: {0}")]
    Email(String),

    #[error("Not found")]
    NotFound,
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::AlreadyRegistered => ErrorCode::AlreadyRegistered,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::Email(_) => ErrorCode::EmailError,
            AppError::NotFound => ErrorCode::NotFound,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    ValidationError,
    AlreadyRegistered,
    DatabaseError,
    EmailError,
    NotFound,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::AlreadyRegistered => "ALREADY_REGISTERED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::EmailError => "EMAIL_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
