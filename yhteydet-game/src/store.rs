//! Weekly completion persistence.
//!
//! The engine only speaks an abstract key-value contract; any storage
//! medium (browser storage, file, remote call) satisfies it. Records are
//! read once when weekly mode starts and written once when a weekly
//! session terminates.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

/// Outcome of one week's play, persisted under the week's key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WeeklyRecord {
    pub completed: bool,
    #[serde(default)]
    pub mistakes: u8,
    #[serde(default)]
    pub solved_order: Vec<u8>,
}

/// Trait for abstracting weekly-record save/load operations.
/// Platform-specific implementations should provide this.
pub trait WeeklyStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the record stored for a week key, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load(&self, week_key: &str) -> Result<Option<WeeklyRecord>, Self::Error>;

    /// Persist the record for a week key, overwriting any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save(&self, week_key: &str, record: &WeeklyRecord) -> Result<(), Self::Error>;

    /// Remove the record for a week key. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be removed.
    fn delete(&self, week_key: &str) -> Result<(), Self::Error>;
}

/// In-memory store backend; shares its map across clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Rc<RefCell<HashMap<String, WeeklyRecord>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl WeeklyStore for MemoryStore {
    type Error = Infallible;

    fn load(&self, week_key: &str) -> Result<Option<WeeklyRecord>, Self::Error> {
        Ok(self.records.borrow().get(week_key).cloned())
    }

    fn save(&self, week_key: &str, record: &WeeklyRecord) -> Result<(), Self::Error> {
        self.records
            .borrow_mut()
            .insert(week_key.to_string(), record.clone());
        Ok(())
    }

    fn delete(&self, week_key: &str) -> Result<(), Self::Error> {
        self.records.borrow_mut().remove(week_key);
        Ok(())
    }
}
