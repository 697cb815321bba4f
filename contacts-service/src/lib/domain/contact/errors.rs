use thiserror::Error;

use crate::user::errors::EmailError;

/// Error for ContactId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for first/last name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for phone number validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Phone too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Phone too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid date format. Should be YYYY-MM-DD.")]
pub struct BirthdayError;

/// Top-level error for all contact operations
#[derive(Debug, Clone, Error)]
pub enum ContactError {
    #[error("Invalid contact ID: {0}")]
    InvalidContactId(#[from] ContactIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid phone: {0}")]
    InvalidPhone(#[from] PhoneError),

    #[error("{0}")]
    InvalidBirthday(#[from] BirthdayError),

    #[error("Contact not found")]
    NotFound(String),

    #[error("Contact already exists with the same email")]
    EmailAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
