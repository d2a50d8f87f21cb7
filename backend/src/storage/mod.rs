//! # Storage Module
//!
//! Persistence for the tracker's class data.
//!
//! Data is kept as JSON strings under two fixed keys in a key-value store.
//! The store is a trait so the same repository works over files on disk or
//! an in-process map in tests.
//!
//! ## Key Responsibilities
//!
//! - **Key-Value Abstraction**: `KeyValueStore` with get/set/remove
//! - **File Storage**: One JSON file per key, written atomically
//! - **Class Repository**: Typed load/save of the class list and selection

pub mod class_repository;
pub mod file_store;
pub mod memory_store;
pub mod traits;

pub use class_repository::{ClassRepository, CLASSES_KEY, SELECTED_CLASS_KEY};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use traits::KeyValueStore;
