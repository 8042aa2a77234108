use std::fmt;

use crate::domain::entities::RequestStatus;

// Domain-level errors for manager login.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingEmail,
    InvalidEmail,
    MissingPassword,
    InvalidCredentials,
    StorageFailure,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            AuthError::MissingEmail => "Email is required",
            AuthError::InvalidEmail => "Invalid email format",
            AuthError::MissingPassword => "Password is required",
            AuthError::InvalidCredentials => "Invalid email or password",
            AuthError::StorageFailure => "storage error",
        };
        f.write_str(message)
    }
}

// First failing rule of the request validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    EmployeeNameRequired,
    StartDateRequired,
    StartDateInvalid,
    EndDateRequired,
    EndDateInvalid,
    StartAfterEnd,
    StartDateInPast,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ValidationError::EmployeeNameRequired => "Employee name is required",
            ValidationError::StartDateRequired => "Start date is required",
            ValidationError::StartDateInvalid => "Start date is not a valid date",
            ValidationError::EndDateRequired => "End date is required",
            ValidationError::EndDateInvalid => "End date is not a valid date",
            ValidationError::StartAfterEnd => "Start date must be before end date",
            ValidationError::StartDateInPast => "Start date cannot be in the past",
        };
        f.write_str(message)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmissionError {
    Invalid(ValidationError),
    UnknownManager,
    StorageFailure,
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::Invalid(err) => err.fmt(f),
            SubmissionError::UnknownManager => f.write_str("Invalid manager ID"),
            SubmissionError::StorageFailure => f.write_str("storage error"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum DecisionError {
    NotFound,
    Forbidden,
    AlreadyDecided(RequestStatus),
    StorageFailure,
}

impl fmt::Display for DecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionError::NotFound => f.write_str("Request not found"),
            DecisionError::Forbidden => f.write_str("Request belongs to another manager"),
            DecisionError::AlreadyDecided(status) => {
                write!(f, "Request has already been {}", status.as_str())
            }
            DecisionError::StorageFailure => f.write_str("storage error"),
        }
    }
}
