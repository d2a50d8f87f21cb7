//! # Domain Module
//!
//! Business rules for the class attendance tracker.
//!
//! Everything here works on plain values: an operation takes the current
//! classes or roster by reference and hands back a new one. Nothing in this
//! module touches storage, so the state container can install a result in a
//! single step and persist it afterwards.
//!
//! ## Module Organization
//!
//! - **validation**: Student form and class name checks
//! - **roster**: Student add/edit/delete, attendance marks, fee and
//!   permanent-absence flags
//! - **classes**: Class creation, rename, metadata edits and selection repair
//! - **stats**: Per-student, per-class and per-day attendance figures
//! - **archive**: Month snapshots and rollover to the next month
//! - **export_service**: Plain-text reports and the roster table
//! - **commands**: The operator actions the state container accepts
//!
//! ## Business Rules
//!
//! - A month has 30 tracked days
//! - Five absences raise a prompt to move a student to the permanent-absent
//!   list; the flag only changes when the operator confirms
//! - Permanently absent students are left out of statistics and reports
//! - Archived months are deep copies and never change after rollover

pub mod archive;
pub mod classes;
pub mod commands;
pub mod errors;
pub mod export_service;
pub mod roster;
pub mod stats;
pub mod validation;

pub use commands::Command;
pub use errors::{AttendanceError, ClassValidationError, DomainError, StudentValidationError};
pub use export_service::{ExportService, ReportExport, ReportKind};
pub use roster::AttendanceUpdate;
