//! Month archival and rollover.
//!
//! A rollover is computed as one complete replacement `ClassInfo`: the
//! snapshot is appended, the roster is reset, the month label advanced and
//! the dates cleared. Callers install the returned value in a single step.

use chrono::{DateTime, Utc};
use log::info;

use shared::{ArchivedMonth, ClassInfo, Month, Student};

/// Snapshot the class's current month, stamped with the current time
pub fn create_archived_month(class: &ClassInfo) -> ArchivedMonth {
    create_archived_month_at(class, Utc::now())
}

/// Snapshot the class's current month.
///
/// Every student is copied through `Student::deep_copy`, so the archive
/// shares nothing with the live roster.
pub fn create_archived_month_at(class: &ClassInfo, now: DateTime<Utc>) -> ArchivedMonth {
    let students: Vec<Student> = class.students.iter().map(Student::deep_copy).collect();
    let permanent_absent_list: Vec<Student> = class
        .students
        .iter()
        .filter(|s| s.is_permanent_absent)
        .map(Student::deep_copy)
        .collect();
    let total_students = class.students.iter().filter(|s| s.is_active()).count();

    ArchivedMonth {
        id: ArchivedMonth::generate_id(now.timestamp_millis() as u64),
        month: class.month,
        start_date_afghan: class.start_date_afghan.clone(),
        start_date_gregorian: class.start_date_gregorian.clone(),
        end_date_afghan: class.end_date_afghan.clone(),
        end_date_gregorian: class.end_date_gregorian.clone(),
        start_time: class.start_time.clone(),
        end_time: class.end_time.clone(),
        speaking_teacher: class.speaking_teacher.clone(),
        grammar_teacher: class.grammar_teacher.clone(),
        students,
        archived_at: now.to_rfc3339(),
        total_students,
        permanent_absent_list,
    }
}

/// Clear attendance, fee and permanent-absence state for every student.
/// Identity and profile fields are kept as they are.
pub fn reset_for_new_month(students: &[Student]) -> Vec<Student> {
    students
        .iter()
        .map(|student| Student {
            attendance: Default::default(),
            fees_paid: false,
            is_permanent_absent: false,
            ..student.deep_copy()
        })
        .collect()
}

/// Suggested label for the next month
pub fn default_next_month(class: &ClassInfo) -> Month {
    class.month.next()
}

/// Archive the current month and start `next_month`
pub fn roll_over(class: &ClassInfo, next_month: Month) -> ClassInfo {
    roll_over_at(class, next_month, Utc::now())
}

pub fn roll_over_at(class: &ClassInfo, next_month: Month, now: DateTime<Utc>) -> ClassInfo {
    let archive = create_archived_month_at(class, now);
    let students = reset_for_new_month(&class.students);

    info!(
        "Rolling class {} over from {} to {} ({} active students archived)",
        class.id, class.month, next_month, archive.total_students
    );

    let mut archived_months = class.archived_months.clone();
    archived_months.push(archive);

    ClassInfo {
        month: next_month,
        start_date_afghan: String::new(),
        start_date_gregorian: String::new(),
        end_date_afghan: String::new(),
        end_date_gregorian: String::new(),
        students,
        archived_months,
        ..class.clone()
    }
}
