//! Domain error types.
//!
//! Every rejected command maps to one of these; a rejected command leaves the
//! state exactly as it was.

/// Why a student form was rejected. Fields are checked in form order and the
/// first failure is reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentValidationError {
    #[error("First name is required")]
    MissingFirstName,
    #[error("Father's name is required")]
    MissingFatherName,
    #[error("Mobile number is required")]
    MissingMobileNumber,
    #[error("Mobile number must contain at least 10 digits")]
    InvalidMobileNumber,
    #[error("Registration number is required")]
    MissingRegistrationNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassValidationError {
    #[error("Class name cannot be empty")]
    EmptyName,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttendanceError {
    #[error("Day {0} is outside the 1..=30 attendance grid")]
    DayOutOfRange(u8),
}

/// Any rejection a command can produce
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Student(#[from] StudentValidationError),
    #[error(transparent)]
    Class(#[from] ClassValidationError),
    #[error(transparent)]
    Attendance(#[from] AttendanceError),
}
