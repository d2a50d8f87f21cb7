//! Typed access to the stored class list and class selection.

use anyhow::{Context, Result};
use log::{debug, info};

use shared::ClassInfo;

use super::traits::KeyValueStore;

/// JSON array of every class
pub const CLASSES_KEY: &str = "princeton-classes";
/// JSON string holding the selected class ID, or `null`
pub const SELECTED_CLASS_KEY: &str = "princeton-selected-class";

pub struct ClassRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ClassRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load all classes; nothing stored yet means an empty list
    pub fn load_classes(&self) -> Result<Vec<ClassInfo>> {
        match self.store.get(CLASSES_KEY)? {
            Some(json) => {
                let classes: Vec<ClassInfo> = serde_json::from_str(&json)
                    .with_context(|| format!("Failed to parse stored {}", CLASSES_KEY))?;
                info!("Loaded {} classes", classes.len());
                Ok(classes)
            }
            None => {
                debug!("No stored classes, starting empty");
                Ok(Vec::new())
            }
        }
    }

    pub fn save_classes(&self, classes: &[ClassInfo]) -> Result<()> {
        let json = serde_json::to_string_pretty(classes).context("Failed to serialize classes")?;
        self.store.set(CLASSES_KEY, &json)?;
        debug!("Saved {} classes", classes.len());
        Ok(())
    }

    pub fn load_selected_class(&self) -> Result<Option<String>> {
        match self.store.get(SELECTED_CLASS_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse stored {}", SELECTED_CLASS_KEY)),
            None => Ok(None),
        }
    }

    pub fn save_selected_class(&self, class_id: Option<&str>) -> Result<()> {
        let json = serde_json::to_string(&class_id).context("Failed to serialize class selection")?;
        self.store.set(SELECTED_CLASS_KEY, &json)?;
        debug!("Saved class selection: {:?}", class_id);
        Ok(())
    }

    /// Drop both keys
    pub fn clear(&self) -> Result<()> {
        self.store.remove(CLASSES_KEY)?;
        self.store.remove(SELECTED_CLASS_KEY)?;
        info!("Cleared stored classes and selection");
        Ok(())
    }
}
