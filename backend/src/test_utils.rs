//! Builders shared by the unit tests.

use std::collections::BTreeMap;

use shared::{AttendanceMark, ClassInfo, Month, Student, StudentDraft};

/// A student with a valid profile and no attendance
pub fn create_test_student(id: &str, first_name: &str, serial_number: u32) -> Student {
    Student {
        id: id.to_string(),
        serial_number,
        first_name: first_name.to_string(),
        father_name: format!("{} Sr", first_name),
        mobile_number: "0700123456".to_string(),
        registration_number: format!("REG-{}", serial_number),
        fees_paid: false,
        notes: String::new(),
        attendance: BTreeMap::new(),
        is_permanent_absent: false,
    }
}

/// Set the same mark on every listed day
pub fn mark_days(student: &mut Student, days: &[u8], mark: AttendanceMark) {
    for day in days {
        student.attendance.insert(*day, mark);
    }
}

pub fn create_test_draft(first_name: &str) -> StudentDraft {
    StudentDraft {
        first_name: first_name.to_string(),
        father_name: "Habib".to_string(),
        mobile_number: "+93 070 012 3456".to_string(),
        registration_number: format!("REG-{}", first_name.to_lowercase()),
        fees_paid: false,
        notes: String::new(),
    }
}

pub fn create_test_class(id: &str, name: &str, students: Vec<Student>) -> ClassInfo {
    ClassInfo {
        id: id.to_string(),
        name: name.to_string(),
        month: Month::Jawza,
        start_date_afghan: "1403-03-01".to_string(),
        start_date_gregorian: "2024-05-21".to_string(),
        end_date_afghan: "1403-03-31".to_string(),
        end_date_gregorian: "2024-06-20".to_string(),
        start_time: "16:00".to_string(),
        end_time: "17:30".to_string(),
        speaking_teacher: "Mr. Farid".to_string(),
        grammar_teacher: "Ms. Laila".to_string(),
        students,
        archived_months: Vec::new(),
        created_at: "2024-05-20T08:00:00+00:00".to_string(),
    }
}
