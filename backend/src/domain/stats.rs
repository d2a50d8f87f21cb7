//! Attendance statistics.
//!
//! All functions here are pure: they read a roster and return tallies. Every
//! percentage has an explicit zero branch so an empty roster or an unmarked
//! month never yields NaN.

use shared::{
    AttendanceBand, AttendanceMark, AttendanceStats, ClassInfo, ClassOverview, DailyAttendance,
    Student, StudentStats, DAYS_IN_MONTH, PERMANENT_ABSENCE_THRESHOLD,
};

/// Count Present/Absent/Leave over days 1..=30; unmarked days are ignored
pub fn student_stats(student: &Student) -> StudentStats {
    let mut stats = StudentStats::default();
    for day in 1..=DAYS_IN_MONTH {
        match student.mark_for(day) {
            AttendanceMark::Present => stats.present += 1,
            AttendanceMark::Absent => stats.absent += 1,
            AttendanceMark::Leave => stats.leave += 1,
            AttendanceMark::Unmarked => {}
        }
    }
    stats
}

/// Aggregate over the active students of a roster.
///
/// `total_students` is the active count, not the roster length.
pub fn class_stats(students: &[Student]) -> AttendanceStats {
    let mut stats = AttendanceStats::default();

    for student in students.iter().filter(|s| s.is_active()) {
        let tally = student_stats(student);
        stats.total_students += 1;
        stats.total_present += tally.present;
        stats.total_absent += tally.absent;
        stats.total_leave += tally.leave;
        if student.fees_paid {
            stats.fees_paid_count += 1;
        } else {
            stats.fees_unpaid_count += 1;
        }
    }

    let recorded = stats.total_present + stats.total_absent + stats.total_leave;
    stats.average_attendance = percentage(stats.total_present as f64, recorded as f64);
    stats
}

/// Whether a student has reached the permanent-absence threshold.
///
/// This only recommends; committing the flag is a separate explicit action.
pub fn check_permanent_absent(student: &Student) -> bool {
    student_stats(student).absent >= PERMANENT_ABSENCE_THRESHOLD
}

/// Per-day marks across the active students, days 1..=30
pub fn daily_stats(students: &[Student]) -> Vec<DailyAttendance> {
    (1..=DAYS_IN_MONTH)
        .map(|day| {
            let mut present = 0;
            let mut absent = 0;
            let mut leave = 0;
            for student in students.iter().filter(|s| s.is_active()) {
                match student.mark_for(day) {
                    AttendanceMark::Present => present += 1,
                    AttendanceMark::Absent => absent += 1,
                    AttendanceMark::Leave => leave += 1,
                    AttendanceMark::Unmarked => {}
                }
            }

            let total = present + absent + leave;
            let present_rate = percentage(present as f64, total as f64);
            let band = if total == 0 {
                AttendanceBand::Unrecorded
            } else if present_rate >= 80.0 {
                AttendanceBand::Good
            } else if present_rate >= 60.0 {
                AttendanceBand::Fair
            } else {
                AttendanceBand::Low
            };

            DailyAttendance {
                day,
                present,
                absent,
                leave,
                present_rate,
                band,
            }
        })
        .collect()
}

/// Overview for the statistics tab. Fee counts here span the whole roster.
pub fn class_overview(class: &ClassInfo) -> ClassOverview {
    let total_enrolled = class.students.len();
    let active_students = class.students.iter().filter(|s| s.is_active()).count();
    let fees_paid = class.students.iter().filter(|s| s.fees_paid).count();
    let fees_unpaid = total_enrolled - fees_paid;

    ClassOverview {
        total_enrolled,
        active_students,
        permanent_absent: total_enrolled - active_students,
        attendance_rate: class_stats(&class.students).average_attendance,
        fees_paid,
        fees_unpaid,
        fees_paid_percentage: percentage(fees_paid as f64, total_enrolled as f64),
        fees_unpaid_percentage: percentage(fees_unpaid as f64, total_enrolled as f64),
        archived_months: class.archived_months.len(),
        current_month: class.month,
    }
}

/// Render a percentage with one decimal place
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}", value)
}

fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
