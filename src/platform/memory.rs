//! In-memory page collaborators for tests and headless hosts.
//!
//! Each type hands out cloneable handles over shared interior state, so a
//! harness can keep one handle to drive or inspect the page while the
//! restorer owns another.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use position_store::{SessionStorage, StorageError};
use serde_json::Value;

use crate::core::history::History;
use crate::core::position::ScrollPoint;
use crate::core::viewport::Viewport;

#[derive(Debug)]
struct HistoryEntry {
    url: String,
    state: Option<Value>,
}

#[derive(Debug)]
struct HistoryInner {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    native_restoration_disabled: bool,
}

/// Browser-like session history held in process memory.
///
/// Starts with a single stateless entry, the way a fresh tab does. `back` and
/// `forward` move the cursor the way user traversal would; the caller plays
/// the browser and feeds the resulting state to the restorer's pop state
/// handler.
#[derive(Clone, Debug)]
pub struct MemoryHistory {
    inner: Rc<RefCell<HistoryInner>>,
}

impl MemoryHistory {
    #[must_use]
    pub fn new(initial_url: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HistoryInner {
                entries: vec![HistoryEntry {
                    url: initial_url.into(),
                    state: None,
                }],
                cursor: 0,
                native_restoration_disabled: false,
            })),
        }
    }

    /// Moves one entry back when possible and returns the state of the entry
    /// that is current afterwards.
    pub fn back(&self) -> Option<Value> {
        let mut inner = self.inner.borrow_mut();
        if inner.cursor > 0 {
            inner.cursor -= 1;
        }
        inner.entries[inner.cursor].state.clone()
    }

    /// Moves one entry forward when possible and returns the state of the
    /// entry that is current afterwards.
    pub fn forward(&self) -> Option<Value> {
        let mut inner = self.inner.borrow_mut();
        if inner.cursor + 1 < inner.entries.len() {
            inner.cursor += 1;
        }
        inner.entries[inner.cursor].state.clone()
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.inner.borrow().cursor
    }

    #[must_use]
    pub fn current_url(&self) -> String {
        let inner = self.inner.borrow();
        inner.entries[inner.cursor].url.clone()
    }

    /// State attached to the current entry, if any.
    #[must_use]
    pub fn current_state(&self) -> Option<Value> {
        let inner = self.inner.borrow();
        inner.entries[inner.cursor].state.clone()
    }

    #[must_use]
    pub fn native_restoration_disabled(&self) -> bool {
        self.inner.borrow().native_restoration_disabled
    }
}

impl History for MemoryHistory {
    fn state(&self) -> Option<Value> {
        self.current_state()
    }

    fn location_href(&self) -> String {
        self.current_url()
    }

    fn replace_state(&mut self, state: Value, url: &str) {
        let mut inner = self.inner.borrow_mut();
        let cursor = inner.cursor;
        inner.entries[cursor] = HistoryEntry {
            url: url.to_string(),
            state: Some(state),
        };
    }

    fn push_state(&mut self, state: Value, url: &str) {
        let mut inner = self.inner.borrow_mut();
        let cursor = inner.cursor;
        inner.entries.truncate(cursor + 1);
        inner.entries.push(HistoryEntry {
            url: url.to_string(),
            state: Some(state),
        });
        inner.cursor += 1;
    }

    fn disable_native_scroll_restoration(&mut self) {
        self.inner.borrow_mut().native_restoration_disabled = true;
    }
}

/// Viewport whose offset lives in a shared cell.
#[derive(Clone, Debug, Default)]
pub struct MemoryViewport {
    point: Rc<Cell<ScrollPoint>>,
}

impl MemoryViewport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the user scrolling the page.
    pub fn scroll_to(&self, point: ScrollPoint) {
        self.point.set(point);
    }

    #[must_use]
    pub fn position(&self) -> ScrollPoint {
        self.point.get()
    }
}

impl Viewport for MemoryViewport {
    fn scroll_position(&self) -> ScrollPoint {
        self.point.get()
    }

    fn set_scroll_position(&mut self, point: ScrollPoint) {
        self.point.set(point);
    }
}

#[derive(Debug, Default)]
struct StorageInner {
    items: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

/// Session storage over a shared map, with switches to make either direction
/// fail the way a browser with storage disabled or full would.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<StorageInner>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.borrow_mut().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Seeds an item directly, bypassing the failure switches.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.borrow_mut().items.insert(key.into(), value.into());
    }

    /// Reads an item directly, bypassing the failure switches.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().items.get(key).cloned()
    }

    /// Drops every item, the way the browser does when the session ends.
    pub fn clear(&self) {
        self.inner.borrow_mut().items.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().items.is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.inner.borrow();
        if inner.fail_reads {
            return Err(StorageError::new("session storage reads are disabled"));
        }
        Ok(inner.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(StorageError::new("session storage writes are disabled"));
        }
        inner.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn push_discards_forward_entries() {
        let history = MemoryHistory::new("/start");
        let mut handle = history.clone();
        handle.push_state(json!({"n": 1}), "/one");
        handle.push_state(json!({"n": 2}), "/two");

        history.back();
        handle.push_state(json!({"n": 3}), "/three");

        assert_eq!(history.entry_count(), 3);
        assert_eq!(history.current_url(), "/three");
        assert_eq!(history.forward(), Some(json!({"n": 3})));
    }

    #[test]
    fn traversal_stops_at_both_ends() {
        let history = MemoryHistory::new("/start");
        let mut handle = history.clone();
        handle.push_state(json!({"n": 1}), "/one");

        assert_eq!(history.back(), None);
        assert_eq!(history.back(), None);
        assert_eq!(history.cursor(), 0);

        assert_eq!(history.forward(), Some(json!({"n": 1})));
        assert_eq!(history.forward(), Some(json!({"n": 1})));
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn replace_keeps_the_cursor_in_place() {
        let history = MemoryHistory::new("/start");
        let mut handle = history.clone();
        handle.push_state(json!({"n": 1}), "/one");

        handle.replace_state(json!({"n": 9}), "/one-b");

        assert_eq!(history.entry_count(), 2);
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.current_url(), "/one-b");
        assert_eq!(history.current_state(), Some(json!({"n": 9})));
    }

    #[test]
    fn viewport_clones_share_their_offset() {
        let viewport = MemoryViewport::new();
        let mut handle = viewport.clone();

        handle.set_scroll_position(ScrollPoint::new(3.0, 120.0));

        assert_eq!(viewport.position(), ScrollPoint::new(3.0, 120.0));
    }

    #[test]
    fn storage_switches_fail_each_direction() {
        let storage = MemoryStorage::new();
        let mut handle = storage.clone();

        storage.set_fail_writes(true);
        assert!(handle.set_item("k", "v").is_err());
        storage.set_fail_writes(false);
        assert!(handle.set_item("k", "v").is_ok());

        storage.set_fail_reads(true);
        assert!(handle.get_item("k").is_err());
        storage.set_fail_reads(false);
        assert_eq!(handle.get_item("k").unwrap(), Some("v".to_string()));
    }
}
