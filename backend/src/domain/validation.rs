//! Input validation for student forms and class names.

use shared::StudentDraft;

use super::errors::{ClassValidationError, StudentValidationError};

/// Minimum number of digits a mobile number must contain
pub const MIN_MOBILE_DIGITS: usize = 10;

/// True when the text holds at least ten digits once everything that is not
/// a digit has been stripped. No country-code handling.
pub fn is_valid_mobile_number(mobile: &str) -> bool {
    mobile.chars().filter(|c| c.is_ascii_digit()).count() >= MIN_MOBILE_DIGITS
}

/// Validate a student form in field order, reporting the first problem
pub fn validate_student_draft(draft: &StudentDraft) -> Result<(), StudentValidationError> {
    if draft.first_name.trim().is_empty() {
        return Err(StudentValidationError::MissingFirstName);
    }
    if draft.father_name.trim().is_empty() {
        return Err(StudentValidationError::MissingFatherName);
    }
    if draft.mobile_number.trim().is_empty() {
        return Err(StudentValidationError::MissingMobileNumber);
    }
    if !is_valid_mobile_number(&draft.mobile_number) {
        return Err(StudentValidationError::InvalidMobileNumber);
    }
    if draft.registration_number.trim().is_empty() {
        return Err(StudentValidationError::MissingRegistrationNumber);
    }
    Ok(())
}

pub fn validate_class_name(name: &str) -> Result<(), ClassValidationError> {
    if name.trim().is_empty() {
        return Err(ClassValidationError::EmptyName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> StudentDraft {
        StudentDraft {
            first_name: "Zahra".to_string(),
            father_name: "Nasir".to_string(),
            mobile_number: "0799 555 123".to_string(),
            registration_number: "REG-042".to_string(),
            fees_paid: false,
            notes: String::new(),
        }
    }

    #[test]
    fn test_is_valid_mobile_number() {
        assert!(!is_valid_mobile_number("123-456-78")); // 8 digits
        assert!(is_valid_mobile_number("0700123456"));
        assert!(is_valid_mobile_number("+93 070 012 3456"));
        assert!(!is_valid_mobile_number(""));
        assert!(!is_valid_mobile_number("phone: none"));
        assert!(is_valid_mobile_number("(070) 012-3456"));
    }

    #[test]
    fn test_validate_student_draft_accepts_complete_form() {
        assert!(validate_student_draft(&valid_draft()).is_ok());
    }

    #[test]
    fn test_validate_student_draft_reports_first_missing_field() {
        let mut draft = valid_draft();
        draft.first_name = "   ".to_string();
        draft.father_name = String::new();
        assert_eq!(
            validate_student_draft(&draft),
            Err(StudentValidationError::MissingFirstName)
        );

        let mut draft = valid_draft();
        draft.father_name = String::new();
        assert_eq!(
            validate_student_draft(&draft),
            Err(StudentValidationError::MissingFatherName)
        );

        let mut draft = valid_draft();
        draft.mobile_number = " ".to_string();
        assert_eq!(
            validate_student_draft(&draft),
            Err(StudentValidationError::MissingMobileNumber)
        );

        let mut draft = valid_draft();
        draft.registration_number = "\t".to_string();
        assert_eq!(
            validate_student_draft(&draft),
            Err(StudentValidationError::MissingRegistrationNumber)
        );
    }

    #[test]
    fn test_validate_student_draft_rejects_short_mobile() {
        let mut draft = valid_draft();
        draft.mobile_number = "123-456-78".to_string();
        assert_eq!(
            validate_student_draft(&draft),
            Err(StudentValidationError::InvalidMobileNumber)
        );
    }

    #[test]
    fn test_validate_class_name() {
        assert!(validate_class_name("Level 3 - Evening").is_ok());
        assert_eq!(validate_class_name("  "), Err(ClassValidationError::EmptyName));
    }
}
