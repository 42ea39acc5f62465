//! Tracking of currently mapped (shown) windows.
//!
//! The tracker keeps map notifications in arrival order. A map does not
//! check for an existing record, so a window mapped twice without an unmap
//! in between is recorded twice; an unmap removes every record for the id.

use std::collections::TryReserveError;
use std::fmt;

use parking_lot::Mutex;

/// X11 window (drawable) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for WindowId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Window geometry queried at map time, used for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowAttributes {
    pub width: i32,
    pub height: i32,
    pub border_width: i32,
}

/// Ordered collection of mapped window records.
#[derive(Debug, Default)]
pub struct WindowTracker {
    records: Mutex<Vec<WindowId>>,
}

impl WindowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for `id`.
    ///
    /// Returns false if storage for the record could not be allocated; the
    /// window is then simply not tracked.
    pub fn on_map(&self, id: WindowId) -> bool {
        push_record(&mut self.records.lock(), id, |records| records.try_reserve(1))
    }

    /// Remove every record for `id`, returning how many were removed.
    pub fn on_unmap(&self, id: WindowId) -> usize {
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|&record| record != id);
        before - records.len()
    }

    pub fn is_mapped(&self, id: WindowId) -> bool {
        self.records.lock().contains(&id)
    }

    /// Number of records held for `id`.
    pub fn count(&self, id: WindowId) -> usize {
        self.records.lock().iter().filter(|&&record| record == id).count()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Copy of the records in insertion order.
    pub fn snapshot(&self) -> Vec<WindowId> {
        self.records.lock().clone()
    }
}

/// Append `id` once `reserve` made room for it.
fn push_record(
    records: &mut Vec<WindowId>,
    id: WindowId,
    reserve: impl FnOnce(&mut Vec<WindowId>) -> Result<(), TryReserveError>,
) -> bool {
    if let Err(err) = reserve(records) {
        log::warn!(target: "XMapWindow", "cannot track window {id}: {err}");
        return false;
    }
    records.push(id);
    true
}
