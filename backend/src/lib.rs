//! # Attendance Tracker Backend
//!
//! Domain logic, persistence and reporting for a class attendance register.
//!
//! A host (desktop shell, web view bridge, CLI) loads a [`Tracker`] over a
//! storage backend, renders its state, and turns operator actions into
//! [`Command`]s:
//!
//! ```no_run
//! use attendance_tracker::{Command, Tracker};
//! use attendance_tracker::storage::{ClassRepository, FileStore};
//!
//! # fn main() -> anyhow::Result<()> {
//! attendance_tracker::logging::init_logging();
//! let data_dir = attendance_tracker::config::default_data_directory()?;
//! let mut tracker = Tracker::load(ClassRepository::new(FileStore::new(&data_dir)?));
//! tracker.dispatch(Command::CreateClass { name: "Level 1 Evening".to_string() })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Layers
//!
//! - **domain**: pure operations on classes, rosters and attendance marks
//! - **storage**: key-value persistence of the class list and selection
//! - **app**: the state container tying the two together
//! - **config** / **logging**: data directory, report branding and logger setup

pub mod app;
pub mod config;
pub mod domain;
pub mod logging;
pub mod storage;

#[cfg(test)]
mod test_utils;

pub use app::{Outcome, Tracker, TrackerState, Transition};
pub use config::TrackerConfig;
pub use domain::{Command, DomainError, ExportService, ReportExport, ReportKind};
