//! Tracking state for the current page: history depth, epoch token and the
//! offsets captured so far.

use position_store::{NavigationState, ResetToken};

use crate::core::position::PositionLog;

/// Everything the restorer knows about where the page sits in session history
/// and which offsets it has captured getting there.
///
/// The registry starts each page load in a fresh epoch. [`reset`](Self::reset)
/// returns to that blank state whenever the recorded trail can no longer be
/// trusted, so stale offsets are never replayed.
pub struct PositionRegistry {
    pub(crate) current_index: usize,
    pub(crate) reset_token: ResetToken,
    pub(crate) log: PositionLog,
}

impl PositionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_index: 0,
            reset_token: ResetToken::fresh(),
            log: PositionLog::new(),
        }
    }

    /// Starts over in a new epoch: depth zero, empty log, fresh token.
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.reset_token = ResetToken::fresh();
        self.log.clear();
    }

    /// Record identifying the current entry, ready to attach to history state.
    #[must_use]
    pub fn navigation_state(&self) -> NavigationState {
        NavigationState::new(self.current_index, self.reset_token)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn reset_token(&self) -> ResetToken {
        self.reset_token
    }

    #[must_use]
    pub fn log(&self) -> &PositionLog {
        &self.log
    }
}

impl Default for PositionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
