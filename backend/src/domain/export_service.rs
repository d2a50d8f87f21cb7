//! Report export for classes and archived months.
//!
//! Reports are plain text meant for download or printing. The roster table is
//! tab-separated so it pastes straight into a spreadsheet.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::info;

use shared::{ArchivedMonth, ClassInfo, Student, DAYS_IN_MONTH};

use super::errors::AttendanceError;
use super::roster::{absent_students_for_day, active_students, permanent_absent_students};
use super::stats::student_stats;
use crate::config::TrackerConfig;

/// Which report to produce for the current month of a class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    DailyAbsent { day: u8 },
    PermanentAbsent,
    FullAttendance,
    MonthlySummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportExport {
    pub content: String,
    pub filename: String,
    /// Students listed in the main body of the report
    pub student_count: usize,
}

/// Export service that renders reports with the institute's branding
#[derive(Clone)]
pub struct ExportService {
    config: TrackerConfig,
}

impl ExportService {
    pub fn new(config: TrackerConfig) -> Self {
        Self { config }
    }

    /// Render a report dated today
    pub fn export_class_report(&self, class: &ClassInfo, kind: ReportKind) -> Result<ReportExport, AttendanceError> {
        self.export_class_report_on(class, kind, Local::now().date_naive())
    }

    pub fn export_class_report_on(
        &self,
        class: &ClassInfo,
        kind: ReportKind,
        generated_on: NaiveDate,
    ) -> Result<ReportExport, AttendanceError> {
        let export = match kind {
            ReportKind::DailyAbsent { day } => self.daily_absent_report(class, day)?,
            ReportKind::PermanentAbsent => self.permanent_absent_report(class),
            ReportKind::FullAttendance => self.full_attendance_report(class, generated_on),
            ReportKind::MonthlySummary => self.monthly_summary_report(class, generated_on),
        };

        info!(
            "Exported {:?} report for class {} ({} students, {} bytes) as {}",
            kind,
            class.name,
            export.student_count,
            export.content.len(),
            export.filename
        );
        Ok(export)
    }

    /// Report for one archived month of a class
    pub fn archive_report(&self, class_name: &str, archive: &ArchivedMonth) -> ReportExport {
        let rule = "=".repeat(50);
        let thin_rule = "-".repeat(50);

        let mut content = String::new();
        content.push_str(&format!("{}\n", self.config.institute_name));
        content.push_str(&format!("Monthly Report - {}\n", archive.month));
        content.push_str(&format!("{}\n\n", rule));
        content.push_str(&format!("Class: {}\n", class_name));
        content.push_str(&format!("Month: {}\n", archive.month));
        content.push_str(&format!(
            "Start Date: {} ({})\n",
            archive.start_date_afghan, archive.start_date_gregorian
        ));
        content.push_str(&format!(
            "End Date: {} ({})\n",
            archive.end_date_afghan, archive.end_date_gregorian
        ));
        content.push_str(&format!("Timing: {} - {}\n", archive.start_time, archive.end_time));
        content.push_str(&format!("Speaking Teacher: {}\n", archive.speaking_teacher));
        content.push_str(&format!("Grammar Teacher: {}\n", archive.grammar_teacher));
        content.push_str(&format!("Total Students: {}\n\n", archive.total_students));

        content.push_str("STUDENT ATTENDANCE\n");
        content.push_str(&format!("{}\n", thin_rule));

        let active = active_students(&archive.students);
        for (index, student) in active.iter().enumerate() {
            let stats = student_stats(student);
            content.push_str(&format!("{}. {} ({})\n", index + 1, student.first_name, student.father_name));
            content.push_str(&format!(
                "   Reg: {} | Mobile: {}\n",
                student.registration_number, student.mobile_number
            ));
            content.push_str(&format!(
                "   Present: {} | Absent: {} | Leave: {}\n",
                stats.present, stats.absent, stats.leave
            ));
            content.push_str(&format!("   Fee Paid: {}\n\n", yes_no(student.fees_paid)));
        }

        if !archive.permanent_absent_list.is_empty() {
            content.push_str("\nPERMANENT ABSENT LIST\n");
            content.push_str(&format!("{}\n", thin_rule));
            for (index, student) in archive.permanent_absent_list.iter().enumerate() {
                content.push_str(&format!(
                    "{}. {} - {} - {}\n",
                    index + 1,
                    student.first_name,
                    student.father_name,
                    student.mobile_number
                ));
            }
        }

        ReportExport {
            content,
            filename: format!("{}-{}-archive.txt", safe_file_stem(class_name), archive.month),
            student_count: active.len(),
        }
    }

    /// Tab-separated table of active students for the clipboard
    pub fn roster_table(&self, class: &ClassInfo) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(Vec::new());

        writer.write_record(["Serial", "Name", "Father", "Mobile", "Reg #", "Fee", "P", "A", "L"])?;
        for (index, student) in active_students(&class.students).iter().enumerate() {
            let stats = student_stats(student);
            writer.write_record([
                (index + 1).to_string(),
                student.first_name.clone(),
                student.father_name.clone(),
                student.mobile_number.clone(),
                student.registration_number.clone(),
                yes_no(student.fees_paid).to_string(),
                stats.present.to_string(),
                stats.absent.to_string(),
                stats.leave.to_string(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush roster table: {}", e.error()))?;
        Ok(String::from_utf8(bytes)?)
    }

    fn daily_absent_report(&self, class: &ClassInfo, day: u8) -> Result<ReportExport, AttendanceError> {
        if !(1..=DAYS_IN_MONTH).contains(&day) {
            return Err(AttendanceError::DayOutOfRange(day));
        }

        let absent = absent_students_for_day(&class.students, day);
        let content = format!("Daily Absent List - Day {}\n\n{}", day, contact_lines(&absent));

        Ok(ReportExport {
            content,
            filename: format!("{}-day-{}-absent.txt", safe_file_stem(&class.name), day),
            student_count: absent.len(),
        })
    }

    fn permanent_absent_report(&self, class: &ClassInfo) -> ReportExport {
        let withdrawn = permanent_absent_students(&class.students);
        let content = format!("Permanent Absent List\n\n{}", contact_lines(&withdrawn));

        ReportExport {
            content,
            filename: format!("{}-permanent-absent.txt", safe_file_stem(&class.name)),
            student_count: withdrawn.len(),
        }
    }

    fn full_attendance_report(&self, class: &ClassInfo, generated_on: NaiveDate) -> ReportExport {
        let active = active_students(&class.students);
        let mut content = self.class_header(class, "Complete Attendance Record", 70, active.len());

        content.push_str("ATTENDANCE REGISTER\n");
        content.push_str(&format!("{}\n\n", "-".repeat(70)));

        content.push_str("#\tName\t\t\tFather\t\t\t");
        for day in 1..=DAYS_IN_MONTH {
            content.push_str(&format!("{}\t", day));
        }
        content.push_str("P\tA\tL\n");
        content.push_str(&format!("{}\n", "-".repeat(200)));

        for (index, student) in active.iter().enumerate() {
            let stats = student_stats(student);
            content.push_str(&format!(
                "{}\t{:<16}\t{:<16}\t",
                index + 1,
                student.first_name,
                student.father_name
            ));
            for day in 1..=DAYS_IN_MONTH {
                content.push_str(&format!("{}\t", student.mark_for(day).symbol()));
            }
            content.push_str(&format!("{}\t{}\t{}\n", stats.present, stats.absent, stats.leave));
        }

        let withdrawn = permanent_absent_students(&class.students);
        if !withdrawn.is_empty() {
            content.push_str("\n\nPERMANENT ABSENT LIST\n");
            content.push_str(&format!("{}\n", "-".repeat(70)));
            for (index, student) in withdrawn.iter().enumerate() {
                content.push_str(&format!(
                    "{}. {} - {} | Mobile: {}\n",
                    index + 1,
                    student.first_name,
                    student.father_name,
                    student.mobile_number
                ));
            }
        }

        content.push_str(&self.footer(70, generated_on));

        ReportExport {
            content,
            filename: format!("{}-{}-attendance.txt", safe_file_stem(&class.name), class.month),
            student_count: active.len(),
        }
    }

    fn monthly_summary_report(&self, class: &ClassInfo, generated_on: NaiveDate) -> ReportExport {
        let active = active_students(&class.students);
        let mut content = self.class_header(class, "Monthly Attendance Report", 60, active.len());

        content.push_str("ATTENDANCE DETAILS\n");
        content.push_str(&format!("{}\n\n", "-".repeat(60)));

        for (index, student) in active.iter().enumerate() {
            let stats = student_stats(student);
            content.push_str(&format!("{}. {} ({})\n", index + 1, student.first_name, student.father_name));
            content.push_str(&format!("   Registration: {}\n", student.registration_number));
            content.push_str(&format!("   Mobile: {}\n", student.mobile_number));
            content.push_str(&format!(
                "   Fee Status: {}\n",
                if student.fees_paid { "Paid" } else { "Unpaid" }
            ));
            content.push_str(&format!(
                "   Attendance: P={} | A={} | L={}\n",
                stats.present, stats.absent, stats.leave
            ));
            content.push_str(&day_grid(student));
            content.push_str("\n\n");
        }

        let withdrawn = permanent_absent_students(&class.students);
        if !withdrawn.is_empty() {
            content.push_str("\nPERMANENT ABSENT LIST\n");
            content.push_str(&format!("{}\n", "-".repeat(60)));
            for (index, student) in withdrawn.iter().enumerate() {
                content.push_str(&format!("{}. {} - {}\n", index + 1, student.first_name, student.father_name));
                content.push_str(&format!("   Mobile: {}\n", student.mobile_number));
            }
        }

        content.push_str(&self.footer(60, generated_on));

        ReportExport {
            content,
            filename: format!("{}-{}-full-report.txt", safe_file_stem(&class.name), class.month),
            student_count: active.len(),
        }
    }

    fn class_header(&self, class: &ClassInfo, title: &str, width: usize, total_students: usize) -> String {
        let mut header = String::new();
        header.push_str(&format!("{}\n", self.config.institute_name));
        header.push_str(&format!("{}\n", title));
        header.push_str(&format!("{}\n\n", "=".repeat(width)));
        header.push_str(&format!("Class: {}\n", class.name));
        header.push_str(&format!("Month: {}\n", class.month));
        header.push_str(&format!(
            "Period: {} to {}\n",
            class.start_date_afghan, class.end_date_afghan
        ));
        header.push_str(&format!("Timing: {} - {}\n", class.start_time, class.end_time));
        header.push_str(&format!("Speaking Teacher: {}\n", class.speaking_teacher));
        header.push_str(&format!("Grammar Teacher: {}\n", class.grammar_teacher));
        header.push_str(&format!("Total Students: {}\n\n", total_students));
        header
    }

    fn footer(&self, width: usize, generated_on: NaiveDate) -> String {
        format!(
            "\n\n{}\nAdministrator: {}\nDeveloped by: {}\nGenerated: {}\n",
            "=".repeat(width),
            self.config.administrator,
            self.config.developer,
            generated_on.format("%Y-%m-%d")
        )
    }
}

/// `Days: 1:P 2:- ...` wrapped every ten days
fn day_grid(student: &Student) -> String {
    let mut grid = String::from("   Days: ");
    for day in 1..=DAYS_IN_MONTH {
        grid.push_str(&format!("{}:{} ", day, student.mark_for(day).symbol()));
        if day % 10 == 0 && day < DAYS_IN_MONTH {
            grid.push_str("\n         ");
        }
    }
    grid
}

fn contact_lines(students: &[&Student]) -> String {
    students
        .iter()
        .enumerate()
        .map(|(index, s)| format!("{}. {} - {} - {}", index + 1, s.first_name, s.father_name, s.mobile_number))
        .collect::<Vec<_>>()
        .join("\n")
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// "Level 2 / Evening" -> "Level_2_Evening"
fn safe_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let collapsed = stem
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if collapsed.is_empty() {
        "class".to_string()
    } else {
        collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::archive::create_archived_month;
    use crate::test_utils::{create_test_class, create_test_student, mark_days};
    use shared::AttendanceMark;

    fn sample_class() -> ClassInfo {
        let mut ali = create_test_student("s1", "Ali", 1);
        ali.fees_paid = true;
        mark_days(&mut ali, &[1, 2], AttendanceMark::Present);
        mark_days(&mut ali, &[3], AttendanceMark::Absent);

        let mut bashir = create_test_student("s2", "Bashir", 2);
        mark_days(&mut bashir, &[3], AttendanceMark::Absent);
        mark_days(&mut bashir, &[4], AttendanceMark::Leave);

        let mut cyrus = create_test_student("s3", "Cyrus", 3);
        cyrus.is_permanent_absent = true;
        cyrus.mobile_number = "0788000111".to_string();
        mark_days(&mut cyrus, &[1, 2, 3, 4, 5], AttendanceMark::Absent);

        create_test_class("c1", "Level 2 Evening", vec![ali, bashir, cyrus])
    }

    fn service() -> ExportService {
        ExportService::new(TrackerConfig::default())
    }

    fn generated_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
    }

    #[test]
    fn test_daily_absent_report() {
        let export = service()
            .export_class_report_on(&sample_class(), ReportKind::DailyAbsent { day: 3 }, generated_on())
            .unwrap();

        assert_eq!(export.student_count, 2);
        assert_eq!(export.filename, "Level_2_Evening-day-3-absent.txt");
        assert_eq!(
            export.content,
            "Daily Absent List - Day 3\n\n1. Ali - Ali Sr - 0700123456\n2. Bashir - Bashir Sr - 0700123456"
        );
    }

    #[test]
    fn test_daily_absent_report_rejects_bad_day() {
        let result = service().export_class_report_on(&sample_class(), ReportKind::DailyAbsent { day: 31 }, generated_on());
        assert_eq!(result, Err(AttendanceError::DayOutOfRange(31)));
    }

    #[test]
    fn test_permanent_absent_report() {
        let export = service()
            .export_class_report_on(&sample_class(), ReportKind::PermanentAbsent, generated_on())
            .unwrap();
        assert_eq!(export.student_count, 1);
        assert!(export.content.starts_with("Permanent Absent List\n\n"));
        assert!(export.content.contains("1. Cyrus - Cyrus Sr - 0788000111"));
    }

    #[test]
    fn test_full_attendance_report() {
        let export = service()
            .export_class_report_on(&sample_class(), ReportKind::FullAttendance, generated_on())
            .unwrap();

        assert_eq!(export.filename, "Level_2_Evening-Jawza-attendance.txt");
        assert_eq!(export.student_count, 2);
        let content = &export.content;
        assert!(content.starts_with("PRINCETON Course Attendance System\nComplete Attendance Record\n"));
        assert!(content.contains("Class: Level 2 Evening\n"));
        assert!(content.contains("Period: 1403-03-01 to 1403-03-31\n"));
        assert!(content.contains("Total Students: 2\n"));
        assert!(content.contains("1\tAli             \tAli Sr          \tP\tP\tA\t-\t"));
        assert!(content.contains("\t2\t1\t0\n"));
        assert!(content.contains("PERMANENT ABSENT LIST"));
        assert!(content.contains("1. Cyrus - Cyrus Sr | Mobile: 0788000111"));
        assert!(content.contains("Administrator: Aziz Ahmad\n"));
        assert!(content.ends_with("Generated: 2024-06-20\n"));
    }

    #[test]
    fn test_monthly_summary_report() {
        let export = service()
            .export_class_report_on(&sample_class(), ReportKind::MonthlySummary, generated_on())
            .unwrap();

        assert_eq!(export.filename, "Level_2_Evening-Jawza-full-report.txt");
        let content = &export.content;
        assert!(content.contains("Monthly Attendance Report\n"));
        assert!(content.contains("1. Ali (Ali Sr)\n   Registration: REG-1\n"));
        assert!(content.contains("   Fee Status: Paid\n"));
        assert!(content.contains("   Fee Status: Unpaid\n"));
        assert!(content.contains("   Attendance: P=2 | A=1 | L=0\n"));
        assert!(content.contains("   Days: 1:P 2:P 3:A 4:- "));
        assert!(content.contains("10:- \n         11:- "));
        assert!(content.contains("1. Cyrus - Cyrus Sr\n   Mobile: 0788000111\n"));
    }

    #[test]
    fn test_archive_report() {
        let class = sample_class();
        let archive = create_archived_month(&class);
        let export = service().archive_report(&class.name, &archive);

        assert_eq!(export.filename, "Level_2_Evening-Jawza-archive.txt");
        assert_eq!(export.student_count, 2);
        assert!(export.content.contains("Monthly Report - Jawza\n"));
        assert!(export.content.contains("Start Date: 1403-03-01 (2024-05-21)\n"));
        assert!(export.content.contains("Total Students: 2\n"));
        assert!(export.content.contains("   Present: 2 | Absent: 1 | Leave: 0\n"));
        assert!(export.content.contains("   Fee Paid: Yes\n"));
        assert!(export.content.contains("1. Cyrus - Cyrus Sr - 0788000111\n"));
    }

    #[test]
    fn test_roster_table() {
        let table = service().roster_table(&sample_class()).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Serial\tName\tFather\tMobile\tReg #\tFee\tP\tA\tL");
        assert_eq!(lines[1], "1\tAli\tAli Sr\t0700123456\tREG-1\tYes\t2\t1\t0");
        assert_eq!(lines[2], "2\tBashir\tBashir Sr\t0700123456\tREG-2\tNo\t0\t1\t1");
    }

    #[test]
    fn test_custom_branding() {
        let config = TrackerConfig {
            institute_name: "Herat English Academy".to_string(),
            administrator: "Office".to_string(),
            ..Default::default()
        };
        let export = ExportService::new(config)
            .export_class_report_on(&sample_class(), ReportKind::FullAttendance, generated_on())
            .unwrap();
        assert!(export.content.starts_with("Herat English Academy\n"));
        assert!(export.content.contains("Administrator: Office\n"));
    }

    #[test]
    fn test_safe_file_stem() {
        assert_eq!(safe_file_stem("Level 2 / Evening"), "Level_2_Evening");
        assert_eq!(safe_file_stem("IELTS-Prep"), "IELTS-Prep");
        assert_eq!(safe_file_stem("  "), "class");
    }
}
