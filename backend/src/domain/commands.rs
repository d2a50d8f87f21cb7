//! Operator actions accepted by the tracker.
//!
//! Roster commands act on the currently selected class. With no class
//! selected they change nothing.

use serde::{Deserialize, Serialize};
use shared::{AttendanceMark, ClassInfoUpdate, Month, StudentDraft};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    CreateClass {
        name: String,
    },
    RenameClass {
        class_id: String,
        name: String,
    },
    /// Removes the class along with its students and archive history
    DeleteClass {
        class_id: String,
    },
    SelectClass {
        class_id: Option<String>,
    },
    UpdateClassInfo {
        class_id: String,
        update: ClassInfoUpdate,
    },
    AddStudent {
        draft: StudentDraft,
    },
    EditStudent {
        student_id: String,
        draft: StudentDraft,
    },
    DeleteStudent {
        student_id: String,
    },
    UpdateAttendance {
        student_id: String,
        day: u8,
        mark: AttendanceMark,
    },
    /// Cycle the day's mark: Unmarked, Present, Absent, Leave
    ToggleAttendance {
        student_id: String,
        day: u8,
    },
    SetFeesPaid {
        student_id: String,
        paid: bool,
    },
    /// Sent after the operator confirms the five-absence prompt, or to
    /// restore a student
    SetPermanentAbsent {
        student_id: String,
        value: bool,
    },
    /// Archive the selected class's month and start `next_month`
    StartNewMonth {
        next_month: Month,
    },
}

impl Command {
    /// True for commands that only make sense with a class selected
    pub fn needs_selected_class(&self) -> bool {
        matches!(
            self,
            Command::AddStudent { .. }
                | Command::EditStudent { .. }
                | Command::DeleteStudent { .. }
                | Command::UpdateAttendance { .. }
                | Command::ToggleAttendance { .. }
                | Command::SetFeesPaid { .. }
                | Command::SetPermanentAbsent { .. }
                | Command::StartNewMonth { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_selected_class() {
        assert!(Command::ToggleAttendance { student_id: "s1".to_string(), day: 1 }.needs_selected_class());
        assert!(Command::StartNewMonth { next_month: Month::Asad }.needs_selected_class());
        assert!(!Command::CreateClass { name: "A".to_string() }.needs_selected_class());
        assert!(!Command::SelectClass { class_id: None }.needs_selected_class());
    }

    #[test]
    fn test_command_json() {
        let json = r#"{"type":"update_attendance","student_id":"s1","day":4,"mark":"A"}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(
            command,
            Command::UpdateAttendance {
                student_id: "s1".to_string(),
                day: 4,
                mark: AttendanceMark::Absent,
            }
        );
    }
}
