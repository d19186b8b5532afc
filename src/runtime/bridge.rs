//! Single gate to both persistence substrates: history entry state for the
//! per-entry record and session storage for the per-epoch offsets.

use position_store::{NavigationState, PositionStore, ResetToken, SessionStorage, StoredPositions};

use crate::core::history::History;

/// Couples the history and storage halves of persistence so handlers cannot
/// update one and forget the other.
pub struct StateBridge {
    history: Box<dyn History>,
    positions: PositionStore,
}

impl StateBridge {
    #[must_use]
    pub fn new(history: Box<dyn History>, storage: Box<dyn SessionStorage>) -> Self {
        Self {
            history,
            positions: PositionStore::new(storage),
        }
    }

    pub fn disable_native_scroll_restoration(&mut self) {
        self.history.disable_native_scroll_restoration();
    }

    /// Record attached to the current history entry, when one is intact.
    #[must_use]
    pub fn read_navigation_state(&self) -> Option<NavigationState> {
        NavigationState::from_value(self.history.state().as_ref())
    }

    /// Rewrites the current entry's record in place, keeping its URL.
    pub fn replace_navigation_state(&mut self, state: NavigationState) {
        let href = self.history.location_href();
        self.history.replace_state(state.to_value(), &href);
    }

    /// Opens a new history entry at `href` carrying `state`.
    pub fn push_navigation_state(&mut self, state: NavigationState, href: &str) {
        self.history.push_state(state.to_value(), href);
    }

    #[must_use]
    pub fn load_positions(&self, token: ResetToken) -> Option<StoredPositions> {
        self.positions.load(token)
    }

    pub fn save_positions(&mut self, token: ResetToken, positions: &StoredPositions) {
        self.positions.save(token, positions);
    }
}
