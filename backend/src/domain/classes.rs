//! Class-level operations over the full class collection.

use chrono::Utc;
use log::{info, warn};

use shared::{ClassInfo, ClassInfoUpdate, Month};

use super::errors::ClassValidationError;
use super::validation::validate_class_name;

/// Create an empty class starting at the first month of the year.
/// Returns the new collection and the new class ID.
pub fn create_class(
    classes: &[ClassInfo],
    name: &str,
) -> Result<(Vec<ClassInfo>, String), ClassValidationError> {
    validate_class_name(name)?;

    let now = Utc::now();
    let class = ClassInfo {
        id: ClassInfo::generate_id(now.timestamp_millis() as u64),
        name: name.trim().to_string(),
        month: Month::Hamal,
        start_date_afghan: String::new(),
        start_date_gregorian: String::new(),
        end_date_afghan: String::new(),
        end_date_gregorian: String::new(),
        start_time: String::new(),
        end_time: String::new(),
        speaking_teacher: String::new(),
        grammar_teacher: String::new(),
        students: Vec::new(),
        archived_months: Vec::new(),
        created_at: now.to_rfc3339(),
    };

    info!("Created class: {} with ID: {}", class.name, class.id);

    let id = class.id.clone();
    let mut updated = classes.to_vec();
    updated.push(class);
    Ok((updated, id))
}

pub fn rename_class(
    classes: &[ClassInfo],
    class_id: &str,
    name: &str,
) -> Result<Vec<ClassInfo>, ClassValidationError> {
    validate_class_name(name)?;
    Ok(update_class(classes, class_id, |c| c.name = name.trim().to_string()))
}

/// Apply the fields that are present in `update`
pub fn update_class_info(classes: &[ClassInfo], class_id: &str, update: ClassInfoUpdate) -> Vec<ClassInfo> {
    update_class(classes, class_id, |c| {
        if let Some(month) = update.month {
            c.month = month;
        }
        if let Some(ref value) = update.start_date_afghan {
            c.start_date_afghan = value.clone();
        }
        if let Some(ref value) = update.start_date_gregorian {
            c.start_date_gregorian = value.clone();
        }
        if let Some(ref value) = update.end_date_afghan {
            c.end_date_afghan = value.clone();
        }
        if let Some(ref value) = update.end_date_gregorian {
            c.end_date_gregorian = value.clone();
        }
        if let Some(ref value) = update.start_time {
            c.start_time = value.clone();
        }
        if let Some(ref value) = update.end_time {
            c.end_time = value.clone();
        }
        if let Some(ref value) = update.speaking_teacher {
            c.speaking_teacher = value.clone();
        }
        if let Some(ref value) = update.grammar_teacher {
            c.grammar_teacher = value.clone();
        }
    })
}

/// Remove a class together with its roster and archive history
pub fn delete_class(classes: &[ClassInfo], class_id: &str) -> Vec<ClassInfo> {
    let updated: Vec<ClassInfo> = classes.iter().filter(|c| c.id != class_id).cloned().collect();
    if updated.len() == classes.len() {
        warn!("Delete ignored, class not found: {}", class_id);
    } else {
        info!("Deleted class {}", class_id);
    }
    updated
}

/// Keep a selection that still exists. A selection pointing at a removed
/// class falls back to the first remaining class, or to none.
pub fn repair_selection(classes: &[ClassInfo], selected: Option<&str>) -> Option<String> {
    match selected {
        None => None,
        Some(id) if classes.iter().any(|c| c.id == id) => Some(id.to_string()),
        Some(_) => classes.first().map(|c| c.id.clone()),
    }
}

pub fn find_class<'a>(classes: &'a [ClassInfo], class_id: &str) -> Option<&'a ClassInfo> {
    classes.iter().find(|c| c.id == class_id)
}

/// Replace one class with `apply`'s edit; unknown IDs leave the collection as is
pub(crate) fn update_class(
    classes: &[ClassInfo],
    class_id: &str,
    apply: impl FnOnce(&mut ClassInfo),
) -> Vec<ClassInfo> {
    let mut updated = classes.to_vec();
    match updated.iter_mut().find(|c| c.id == class_id) {
        Some(class) => apply(class),
        None => warn!("Update ignored, class not found: {}", class_id),
    }
    updated
}
