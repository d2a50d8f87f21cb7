//! Roster operations for a single class.
//!
//! Each operation takes the current roster by reference and returns a new
//! one. An unknown student ID is never an error: the roster comes back
//! unchanged, since the student may already have been removed earlier in the
//! session.

use chrono::Utc;
use log::{info, warn};

use shared::{AttendanceMark, Student, StudentDraft, DAYS_IN_MONTH, PERMANENT_ABSENCE_THRESHOLD};

use super::errors::{AttendanceError, StudentValidationError};
use super::stats::student_stats;
use super::validation::validate_student_draft;

/// Result of setting a day mark
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceUpdate {
    pub students: Vec<Student>,
    /// The mark that was applied
    pub mark: AttendanceMark,
    /// Set when this mark took the student to exactly five absences; the
    /// operator should be asked whether to move them to the permanent-absent
    /// list. Nothing has been committed.
    pub permanent_absent_prompt: bool,
}

/// Stable, case-insensitive sort by first name
pub fn sort_students_alphabetically(mut students: Vec<Student>) -> Vec<Student> {
    students.sort_by_cached_key(|s| s.first_name.to_lowercase());
    students
}

/// `max(serial numbers, 0) + 1`
pub fn next_serial_number(students: &[Student]) -> u32 {
    students.iter().map(|s| s.serial_number).max().unwrap_or(0) + 1
}

/// Validate and append a new student, returning the new roster and the new ID
pub fn add_student(
    students: &[Student],
    draft: StudentDraft,
) -> Result<(Vec<Student>, String), StudentValidationError> {
    validate_student_draft(&draft)?;

    let id = Student::generate_id(Utc::now().timestamp_millis() as u64);
    let student = Student {
        id: id.clone(),
        serial_number: next_serial_number(students),
        first_name: draft.first_name.trim().to_string(),
        father_name: draft.father_name.trim().to_string(),
        mobile_number: draft.mobile_number.trim().to_string(),
        registration_number: draft.registration_number.trim().to_string(),
        fees_paid: draft.fees_paid,
        notes: draft.notes.trim().to_string(),
        attendance: Default::default(),
        is_permanent_absent: false,
    };

    info!("Adding student {} ({}) with serial {}", student.first_name, id, student.serial_number);

    let mut updated = students.to_vec();
    updated.push(student);
    Ok((sort_students_alphabetically(updated), id))
}

/// Replace a student's profile and fee flag. ID, serial number, attendance
/// and the permanent-absence flag are kept.
pub fn edit_student(
    students: &[Student],
    student_id: &str,
    draft: StudentDraft,
) -> Result<Vec<Student>, StudentValidationError> {
    validate_student_draft(&draft)?;

    if !students.iter().any(|s| s.id == student_id) {
        warn!("Edit ignored, student not found: {}", student_id);
        return Ok(students.to_vec());
    }

    let updated = students
        .iter()
        .map(|s| {
            if s.id != student_id {
                return s.clone();
            }
            Student {
                first_name: draft.first_name.trim().to_string(),
                father_name: draft.father_name.trim().to_string(),
                mobile_number: draft.mobile_number.trim().to_string(),
                registration_number: draft.registration_number.trim().to_string(),
                fees_paid: draft.fees_paid,
                notes: draft.notes.trim().to_string(),
                ..s.clone()
            }
        })
        .collect();

    info!("Updated student {}", student_id);
    Ok(sort_students_alphabetically(updated))
}

/// Hard delete. Must only be called after the operator has confirmed.
pub fn delete_student(students: &[Student], student_id: &str) -> Vec<Student> {
    let updated: Vec<Student> = students
        .iter()
        .filter(|s| s.id != student_id)
        .cloned()
        .collect();

    if updated.len() == students.len() {
        warn!("Delete ignored, student not found: {}", student_id);
    } else {
        info!("Deleted student {}", student_id);
    }
    updated
}

/// Set one day's mark for a student.
///
/// Never touches the permanent-absence flag. The prompt fires only on the
/// mark that lands the absent count exactly on the threshold, so it can fire
/// again if the count later drops and climbs back to five.
pub fn update_attendance(
    students: &[Student],
    student_id: &str,
    day: u8,
    mark: AttendanceMark,
) -> Result<AttendanceUpdate, AttendanceError> {
    if !(1..=DAYS_IN_MONTH).contains(&day) {
        return Err(AttendanceError::DayOutOfRange(day));
    }

    let mut permanent_absent_prompt = false;
    let mut found = false;

    let updated = students
        .iter()
        .map(|s| {
            if s.id != student_id {
                return s.clone();
            }
            found = true;

            let mut student = s.clone();
            match mark {
                AttendanceMark::Unmarked => {
                    student.attendance.remove(&day);
                }
                _ => {
                    student.attendance.insert(day, mark);
                }
            }

            if mark == AttendanceMark::Absent
                && student_stats(&student).absent == PERMANENT_ABSENCE_THRESHOLD
            {
                permanent_absent_prompt = true;
            }
            student
        })
        .collect();

    if !found {
        warn!("Attendance update ignored, student not found: {}", student_id);
    }

    Ok(AttendanceUpdate {
        students: updated,
        mark,
        permanent_absent_prompt,
    })
}

/// Advance a day's mark one step through Unmarked, Present, Absent, Leave
pub fn toggle_attendance(
    students: &[Student],
    student_id: &str,
    day: u8,
) -> Result<AttendanceUpdate, AttendanceError> {
    let current = students
        .iter()
        .find(|s| s.id == student_id)
        .map(|s| s.mark_for(day))
        .unwrap_or_default();
    update_attendance(students, student_id, day, current.next())
}

/// Commit or lift the permanent-absence flag
pub fn set_permanent_absent(students: &[Student], student_id: &str, value: bool) -> Vec<Student> {
    update_one(students, student_id, |s| s.is_permanent_absent = value)
}

pub fn set_fees_paid(students: &[Student], student_id: &str, value: bool) -> Vec<Student> {
    update_one(students, student_id, |s| s.fees_paid = value)
}

pub fn active_students(students: &[Student]) -> Vec<&Student> {
    students.iter().filter(|s| s.is_active()).collect()
}

pub fn permanent_absent_students(students: &[Student]) -> Vec<&Student> {
    students.iter().filter(|s| s.is_permanent_absent).collect()
}

/// Active students marked Absent on `day`
pub fn absent_students_for_day(students: &[Student], day: u8) -> Vec<&Student> {
    students
        .iter()
        .filter(|s| s.is_active() && s.mark_for(day) == AttendanceMark::Absent)
        .collect()
}

fn update_one(students: &[Student], student_id: &str, apply: impl Fn(&mut Student)) -> Vec<Student> {
    if !students.iter().any(|s| s.id == student_id) {
        warn!("Update ignored, student not found: {}", student_id);
    }
    students
        .iter()
        .map(|s| {
            let mut student = s.clone();
            if student.id == student_id {
                apply(&mut student);
            }
            student
        })
        .collect()
}
