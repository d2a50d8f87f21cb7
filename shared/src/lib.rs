use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Number of day slots in the attendance grid of one month
pub const DAYS_IN_MONTH: u8 = 30;

/// Absence count at which a student is proposed for the permanent-absent list
pub const PERMANENT_ABSENCE_THRESHOLD: u32 = 5;

/// A single attendance mark for one student on one day.
///
/// Persisted as the single-letter codes used by the browser application:
/// `"P"`, `"A"`, `"L"` and `""` for an unmarked day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttendanceMark {
    #[serde(rename = "P")]
    Present,
    #[serde(rename = "A")]
    Absent,
    #[serde(rename = "L")]
    Leave,
    #[default]
    #[serde(rename = "")]
    Unmarked,
}

impl AttendanceMark {
    /// Next mark when the same day cell is toggled repeatedly:
    /// Unmarked -> Present -> Absent -> Leave -> Unmarked
    pub fn next(self) -> Self {
        match self {
            AttendanceMark::Unmarked => AttendanceMark::Present,
            AttendanceMark::Present => AttendanceMark::Absent,
            AttendanceMark::Absent => AttendanceMark::Leave,
            AttendanceMark::Leave => AttendanceMark::Unmarked,
        }
    }

    /// Short code used in reports; unmarked days render as `-`
    pub fn symbol(self) -> &'static str {
        match self {
            AttendanceMark::Present => "P",
            AttendanceMark::Absent => "A",
            AttendanceMark::Leave => "L",
            AttendanceMark::Unmarked => "-",
        }
    }
}

/// The fixed list of month labels a class can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Month {
    #[default]
    Hamal,
    Sawr,
    Jawza,
    Saratan,
    Asad,
    Sonbola,
    Mizan,
    Aqrab,
    Qaws,
    Jadi,
    Dalwa,
    Hoot,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Hamal,
        Month::Sawr,
        Month::Jawza,
        Month::Saratan,
        Month::Asad,
        Month::Sonbola,
        Month::Mizan,
        Month::Aqrab,
        Month::Qaws,
        Month::Jadi,
        Month::Dalwa,
        Month::Hoot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Month::Hamal => "Hamal",
            Month::Sawr => "Sawr",
            Month::Jawza => "Jawza",
            Month::Saratan => "Saratan",
            Month::Asad => "Asad",
            Month::Sonbola => "Sonbola",
            Month::Mizan => "Mizan",
            Month::Aqrab => "Aqrab",
            Month::Qaws => "Qaws",
            Month::Jadi => "Jadi",
            Month::Dalwa => "Dalwa",
            Month::Hoot => "Hoot",
        }
    }

    /// Position in the fixed list, 0-based
    pub fn index(self) -> usize {
        Month::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }

    /// Cyclic successor, wrapping from Hoot back to Hamal
    pub fn next(self) -> Self {
        Month::ALL[(self.index() + 1) % Month::ALL.len()]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownMonthError(pub String);

impl fmt::Display for UnknownMonthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown month label: {}", self.0)
    }
}

impl std::error::Error for UnknownMonthError {}

impl FromStr for Month {
    type Err = UnknownMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMonthError(s.to_string()))
    }
}

/// One enrollee in a class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    /// Display order before alphabetical sorting; unique within a class
    pub serial_number: u32,
    pub first_name: String,
    pub father_name: String,
    pub mobile_number: String,
    pub registration_number: String,
    pub fees_paid: bool,
    pub notes: String,
    /// Day number (1..=30) to mark; missing days are unmarked
    #[serde(default)]
    pub attendance: BTreeMap<u8, AttendanceMark>,
    pub is_permanent_absent: bool,
}

impl Student {
    /// Generate a student ID: "student::<epoch_millis>::<random suffix>"
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("student::{}::{}", epoch_millis, short_suffix())
    }

    /// Mark recorded for a day, `Unmarked` when nothing is stored
    pub fn mark_for(&self, day: u8) -> AttendanceMark {
        self.attendance.get(&day).copied().unwrap_or_default()
    }

    /// Active students count towards every aggregate and the daily grid
    pub fn is_active(&self) -> bool {
        !self.is_permanent_absent
    }

    /// Field-by-field copy sharing no state with `self`.
    ///
    /// Archive snapshots are built from this so that later roster edits can
    /// never reach into an archived month.
    pub fn deep_copy(&self) -> Student {
        Student {
            id: self.id.clone(),
            serial_number: self.serial_number,
            first_name: self.first_name.clone(),
            father_name: self.father_name.clone(),
            mobile_number: self.mobile_number.clone(),
            registration_number: self.registration_number.clone(),
            fees_paid: self.fees_paid,
            notes: self.notes.clone(),
            attendance: self
                .attendance
                .iter()
                .map(|(day, mark)| (*day, *mark))
                .collect(),
            is_permanent_absent: self.is_permanent_absent,
        }
    }
}

/// Form input for adding or editing a student
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub first_name: String,
    pub father_name: String,
    pub mobile_number: String,
    pub registration_number: String,
    pub fees_paid: bool,
    pub notes: String,
}

/// One class/section with its roster and archive history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub id: String,
    pub name: String,
    pub month: Month,
    pub start_date_afghan: String,
    pub start_date_gregorian: String,
    pub end_date_afghan: String,
    pub end_date_gregorian: String,
    pub start_time: String,
    pub end_time: String,
    pub speaking_teacher: String,
    pub grammar_teacher: String,
    #[serde(default)]
    pub students: Vec<Student>,
    /// Append-only, oldest first
    #[serde(default)]
    pub archived_months: Vec<ArchivedMonth>,
    pub created_at: String, // RFC 3339 timestamp
}

impl ClassInfo {
    /// Generate a class ID: "class::<epoch_millis>::<random suffix>"
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("class::{}::{}", epoch_millis, short_suffix())
    }

    pub fn find_student(&self, student_id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == student_id)
    }
}

/// Partial update of a class's schedule metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassInfoUpdate {
    pub month: Option<Month>,
    pub start_date_afghan: Option<String>,
    pub start_date_gregorian: Option<String>,
    pub end_date_afghan: Option<String>,
    pub end_date_gregorian: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub speaking_teacher: Option<String>,
    pub grammar_teacher: Option<String>,
}

/// Immutable snapshot of a class month, taken at rollover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedMonth {
    pub id: String,
    pub month: Month,
    pub start_date_afghan: String,
    pub start_date_gregorian: String,
    pub end_date_afghan: String,
    pub end_date_gregorian: String,
    pub start_time: String,
    pub end_time: String,
    pub speaking_teacher: String,
    pub grammar_teacher: String,
    /// Full roster at archive time, active and permanently absent alike
    pub students: Vec<Student>,
    pub archived_at: String, // RFC 3339 timestamp
    /// Active students at archive time
    pub total_students: usize,
    pub permanent_absent_list: Vec<Student>,
}

impl ArchivedMonth {
    /// Generate an archive ID: "archive::<epoch_millis>::<random suffix>"
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("archive::{}::{}", epoch_millis, short_suffix())
    }
}

/// Present/absent/leave tally for one student over the 30-day grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentStats {
    pub present: u32,
    pub absent: u32,
    pub leave: u32,
}

impl StudentStats {
    pub fn recorded_days(&self) -> u32 {
        self.present + self.absent + self.leave
    }
}

/// Aggregate over the active students of a roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceStats {
    pub total_students: usize,
    pub total_present: u32,
    pub total_absent: u32,
    pub total_leave: u32,
    /// Percentage of recorded marks that are Present, 0 when nothing is recorded
    pub average_attendance: f64,
    pub fees_paid_count: usize,
    pub fees_unpaid_count: usize,
}

/// Colour band for one day of the daily attendance summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceBand {
    /// 80% or more present
    Good,
    /// 60% up to 80% present
    Fair,
    /// Below 60% present
    Low,
    /// Nobody has a mark for this day
    Unrecorded,
}

/// Marks for one day across the active students
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAttendance {
    pub day: u8,
    pub present: u32,
    pub absent: u32,
    pub leave: u32,
    pub present_rate: f64,
    pub band: AttendanceBand,
}

/// Class-level overview shown on the statistics tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassOverview {
    pub total_enrolled: usize,
    pub active_students: usize,
    pub permanent_absent: usize,
    pub attendance_rate: f64,
    /// Fee counts cover the full roster, permanently absent included
    pub fees_paid: usize,
    pub fees_unpaid: usize,
    pub fees_paid_percentage: f64,
    pub fees_unpaid_percentage: f64,
    pub archived_months: usize,
    pub current_month: Month,
}

fn short_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..9].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_student() -> Student {
        let mut attendance = BTreeMap::new();
        attendance.insert(1, AttendanceMark::Present);
        attendance.insert(2, AttendanceMark::Absent);
        Student {
            id: "student::1702516122000::abc123def".to_string(),
            serial_number: 3,
            first_name: "Ahmad".to_string(),
            father_name: "Karim".to_string(),
            mobile_number: "0700123456".to_string(),
            registration_number: "R-17".to_string(),
            fees_paid: true,
            notes: "Front row".to_string(),
            attendance,
            is_permanent_absent: false,
        }
    }

    #[test]
    fn test_generate_ids() {
        let student_id = Student::generate_id(1702516122000);
        assert!(student_id.starts_with("student::1702516122000::"));

        let class_id = ClassInfo::generate_id(1702516122000);
        assert!(class_id.starts_with("class::1702516122000::"));

        let archive_id = ArchivedMonth::generate_id(1702516122000);
        assert!(archive_id.starts_with("archive::1702516122000::"));

        // Same millisecond must still give distinct IDs
        assert_ne!(Student::generate_id(1), Student::generate_id(1));
    }

    #[test]
    fn test_mark_cycle() {
        let mut mark = AttendanceMark::Unmarked;
        let mut seen = Vec::new();
        for _ in 0..4 {
            mark = mark.next();
            seen.push(mark);
        }
        assert_eq!(
            seen,
            vec![
                AttendanceMark::Present,
                AttendanceMark::Absent,
                AttendanceMark::Leave,
                AttendanceMark::Unmarked,
            ]
        );
    }

    #[test]
    fn test_month_next_wraps() {
        assert_eq!(Month::Hamal.next(), Month::Sawr);
        assert_eq!(Month::Dalwa.next(), Month::Hoot);
        assert_eq!(Month::Hoot.next(), Month::Hamal);
        assert_eq!(Month::Qaws.index(), 8);
    }

    #[test]
    fn test_month_from_str() {
        assert_eq!("Jawza".parse::<Month>().unwrap(), Month::Jawza);
        assert_eq!(" hoot ".parse::<Month>().unwrap(), Month::Hoot);
        assert!("January".parse::<Month>().is_err());
        assert_eq!(Month::Mizan.to_string(), "Mizan");
    }

    #[test]
    fn test_mark_for_defaults_to_unmarked() {
        let student = sample_student();
        assert_eq!(student.mark_for(1), AttendanceMark::Present);
        assert_eq!(student.mark_for(2), AttendanceMark::Absent);
        assert_eq!(student.mark_for(30), AttendanceMark::Unmarked);
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let original = sample_student();
        let mut copy = original.deep_copy();
        assert_eq!(copy, original);

        copy.attendance.insert(3, AttendanceMark::Leave);
        copy.first_name.push_str(" Jan");
        assert_eq!(original.mark_for(3), AttendanceMark::Unmarked);
        assert_eq!(original.first_name, "Ahmad");
    }

    #[test]
    fn test_student_json_uses_browser_format() {
        let json = serde_json::to_value(sample_student()).unwrap();
        assert_eq!(json["firstName"], "Ahmad");
        assert_eq!(json["isPermanentAbsent"], false);
        assert_eq!(json["attendance"]["1"], "P");
        assert_eq!(json["attendance"]["2"], "A");
    }

    #[test]
    fn test_student_parses_browser_json() {
        let json = r#"{
            "id": "1702516122000-k3j4h5g6f",
            "serialNumber": 1,
            "firstName": "Mina",
            "fatherName": "Rahim",
            "mobileNumber": "+93 070 012 3456",
            "registrationNumber": "A1",
            "feesPaid": false,
            "notes": "",
            "attendance": {"4": "L", "5": ""},
            "isPermanentAbsent": false
        }"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.first_name, "Mina");
        assert_eq!(student.mark_for(4), AttendanceMark::Leave);
        assert_eq!(student.mark_for(5), AttendanceMark::Unmarked);
    }
}
