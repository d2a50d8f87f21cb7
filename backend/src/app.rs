//! # Tracker State Container
//!
//! `TrackerState` holds every class and the current selection. Commands are
//! applied by `TrackerState::apply`, a pure transition that returns the next
//! state without touching storage. `Tracker` owns the state together with a
//! `ClassRepository`: it installs each new state in one step and then writes
//! the keys that changed.
//!
//! Write failures are logged and otherwise ignored. The in-memory state stays
//! authoritative for the rest of the session.

use log::{error, info, warn};

use shared::{AttendanceStats, ClassInfo, ClassOverview, Student};

use crate::domain::archive::roll_over;
use crate::domain::classes::{
    create_class, delete_class, find_class, rename_class, repair_selection, update_class, update_class_info,
};
use crate::domain::commands::Command;
use crate::domain::errors::DomainError;
use crate::domain::roster::{
    add_student, delete_student, edit_student, set_fees_paid, set_permanent_absent, toggle_attendance,
    update_attendance, AttendanceUpdate,
};
use crate::domain::stats::{class_overview, class_stats};
use crate::storage::{ClassRepository, KeyValueStore};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerState {
    pub classes: Vec<ClassInfo>,
    pub selected_class_id: Option<String>,
}

/// What a command produced besides the new state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    /// ID of a newly created class or student
    pub created_id: Option<String>,
    /// Student whose fifth absence was just recorded. The host should ask
    /// whether to send `SetPermanentAbsent`.
    pub permanent_absent_prompt: Option<String>,
    /// ID of the archive written by a month rollover
    pub archived_month_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: TrackerState,
    pub outcome: Outcome,
}

impl TrackerState {
    /// Build a state, repairing a selection that points at a missing class
    pub fn new(classes: Vec<ClassInfo>, selected_class_id: Option<String>) -> Self {
        let selected_class_id = repair_selection(&classes, selected_class_id.as_deref());
        Self { classes, selected_class_id }
    }

    pub fn selected_class(&self) -> Option<&ClassInfo> {
        self.selected_class_id
            .as_deref()
            .and_then(|id| find_class(&self.classes, id))
    }

    /// Compute the state after `command`. A rejected command returns the
    /// error and no state.
    pub fn apply(&self, command: Command) -> Result<Transition, DomainError> {
        match command {
            Command::CreateClass { name } => {
                let (classes, class_id) = create_class(&self.classes, &name)?;
                Ok(Transition {
                    state: TrackerState {
                        classes,
                        selected_class_id: Some(class_id.clone()),
                    },
                    outcome: Outcome {
                        created_id: Some(class_id),
                        ..Default::default()
                    },
                })
            }
            Command::RenameClass { class_id, name } => {
                let classes = rename_class(&self.classes, &class_id, &name)?;
                Ok(self.with_classes(classes))
            }
            Command::DeleteClass { class_id } => {
                let classes = delete_class(&self.classes, &class_id);
                let selected_class_id = repair_selection(&classes, self.selected_class_id.as_deref());
                Ok(Transition {
                    state: TrackerState { classes, selected_class_id },
                    outcome: Outcome::default(),
                })
            }
            Command::SelectClass { class_id } => {
                if let Some(ref id) = class_id {
                    if find_class(&self.classes, id).is_none() {
                        warn!("Select ignored, class not found: {}", id);
                        return Ok(self.unchanged());
                    }
                }
                Ok(Transition {
                    state: TrackerState {
                        classes: self.classes.clone(),
                        selected_class_id: class_id,
                    },
                    outcome: Outcome::default(),
                })
            }
            Command::UpdateClassInfo { class_id, update } => {
                Ok(self.with_classes(update_class_info(&self.classes, &class_id, update)))
            }
            Command::AddStudent { draft } => self.with_roster(|students| {
                let (students, student_id) = add_student(students, draft)?;
                Ok((
                    students,
                    Outcome {
                        created_id: Some(student_id),
                        ..Default::default()
                    },
                ))
            }),
            Command::EditStudent { student_id, draft } => {
                self.with_roster(|students| Ok((edit_student(students, &student_id, draft)?, Outcome::default())))
            }
            Command::DeleteStudent { student_id } => {
                self.with_roster(|students| Ok((delete_student(students, &student_id), Outcome::default())))
            }
            Command::UpdateAttendance { student_id, day, mark } => self.with_roster(|students| {
                let update = update_attendance(students, &student_id, day, mark)?;
                Ok(attendance_outcome(update, student_id))
            }),
            Command::ToggleAttendance { student_id, day } => self.with_roster(|students| {
                let update = toggle_attendance(students, &student_id, day)?;
                Ok(attendance_outcome(update, student_id))
            }),
            Command::SetFeesPaid { student_id, paid } => {
                self.with_roster(|students| Ok((set_fees_paid(students, &student_id, paid), Outcome::default())))
            }
            Command::SetPermanentAbsent { student_id, value } => self.with_roster(|students| {
                Ok((set_permanent_absent(students, &student_id, value), Outcome::default()))
            }),
            Command::StartNewMonth { next_month } => {
                let Some(class) = self.selected_class() else {
                    warn!("New month ignored, no class selected");
                    return Ok(self.unchanged());
                };

                let rolled = roll_over(class, next_month);
                let archived_month_id = rolled.archived_months.last().map(|a| a.id.clone());
                let classes = update_class(&self.classes, &class.id, |c| *c = rolled);

                Ok(Transition {
                    state: TrackerState {
                        classes,
                        selected_class_id: self.selected_class_id.clone(),
                    },
                    outcome: Outcome {
                        archived_month_id,
                        ..Default::default()
                    },
                })
            }
        }
    }

    fn unchanged(&self) -> Transition {
        Transition {
            state: self.clone(),
            outcome: Outcome::default(),
        }
    }

    fn with_classes(&self, classes: Vec<ClassInfo>) -> Transition {
        Transition {
            state: TrackerState {
                classes,
                selected_class_id: self.selected_class_id.clone(),
            },
            outcome: Outcome::default(),
        }
    }

    /// Run a roster operation against the selected class
    fn with_roster<F>(&self, operation: F) -> Result<Transition, DomainError>
    where
        F: FnOnce(&[Student]) -> Result<(Vec<Student>, Outcome), DomainError>,
    {
        let Some(class) = self.selected_class() else {
            warn!("Roster command ignored, no class selected");
            return Ok(self.unchanged());
        };

        let (students, outcome) = operation(&class.students)?;
        let classes = update_class(&self.classes, &class.id, |c| c.students = students);
        Ok(Transition {
            state: TrackerState {
                classes,
                selected_class_id: self.selected_class_id.clone(),
            },
            outcome,
        })
    }
}

fn attendance_outcome(update: AttendanceUpdate, student_id: String) -> (Vec<Student>, Outcome) {
    let permanent_absent_prompt = update.permanent_absent_prompt.then_some(student_id);
    (
        update.students,
        Outcome {
            permanent_absent_prompt,
            ..Default::default()
        },
    )
}

/// Owns the tracker state and writes it through a repository
pub struct Tracker<S: KeyValueStore> {
    state: TrackerState,
    repository: ClassRepository<S>,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Load stored classes and selection. Unreadable data is logged and
    /// replaced by the empty defaults.
    pub fn load(repository: ClassRepository<S>) -> Self {
        let classes = repository.load_classes().unwrap_or_else(|e| {
            error!("Failed to load classes, starting empty: {:#}", e);
            Vec::new()
        });
        let selected = repository.load_selected_class().unwrap_or_else(|e| {
            error!("Failed to load class selection: {:#}", e);
            None
        });

        let state = TrackerState::new(classes, selected);
        info!(
            "Tracker loaded with {} classes, selected: {:?}",
            state.classes.len(),
            state.selected_class_id
        );
        Self { state, repository }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn repository(&self) -> &ClassRepository<S> {
        &self.repository
    }

    pub fn selected_class(&self) -> Option<&ClassInfo> {
        self.state.selected_class()
    }

    /// Statistics over the selected class's active students
    pub fn selected_class_stats(&self) -> Option<AttendanceStats> {
        self.selected_class().map(|class| class_stats(&class.students))
    }

    pub fn selected_class_overview(&self) -> Option<ClassOverview> {
        self.selected_class().map(class_overview)
    }

    /// Apply `command`, install the result and persist what changed
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, DomainError> {
        let Transition { state, outcome } = self.state.apply(command)?;
        let previous = std::mem::replace(&mut self.state, state);
        self.persist_changes(&previous);
        Ok(outcome)
    }

    fn persist_changes(&self, previous: &TrackerState) {
        if self.state.classes != previous.classes {
            if let Err(e) = self.repository.save_classes(&self.state.classes) {
                error!("Failed to save classes: {:#}", e);
            }
        }
        if self.state.selected_class_id != previous.selected_class_id {
            if let Err(e) = self
                .repository
                .save_selected_class(self.state.selected_class_id.as_deref())
            {
                error!("Failed to save class selection: {:#}", e);
            }
        }
    }
}
