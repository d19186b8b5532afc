//! One-shot completion signal for server round trips.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type OnceCallback = Box<dyn FnOnce()>;

#[derive(Default)]
struct SignalState {
    next_id: u64,
    pending: Vec<(u64, OnceCallback)>,
}

/// Signal the transport layer fires when it finishes handling a server
/// response.
///
/// Clones share one subscriber list, so the transport can hold one handle
/// while the restorer holds another. Subscriptions are one-shot: a callback
/// runs on the next [`fire`](Self::fire) at most once, and dropping its
/// [`RoundTripSubscription`] before that cancels it.
#[derive(Clone, Default)]
pub struct RoundTripSignal {
    state: Rc<RefCell<SignalState>>,
}

impl RoundTripSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for the next fire only.
    pub fn subscribe_once(&self, callback: impl FnOnce() + 'static) -> RoundTripSubscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id = state.next_id.wrapping_add(1);
        state.pending.push((id, Box::new(callback)));
        RoundTripSubscription {
            id,
            state: Rc::downgrade(&self.state),
        }
    }

    /// Invokes every pending callback once and forgets it.
    pub fn fire(&self) {
        // Drain before invoking so callbacks may subscribe or cancel freely.
        let drained: Vec<(u64, OnceCallback)> =
            self.state.borrow_mut().pending.drain(..).collect();
        for (_, callback) in drained {
            callback();
        }
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }
}

/// Handle for one pending callback. Dropping it cancels the callback if the
/// signal has not fired yet.
pub struct RoundTripSubscription {
    id: u64,
    state: Weak<RefCell<SignalState>>,
}

impl RoundTripSubscription {
    /// Whether the callback is still waiting for the signal.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self.state.upgrade() {
            Some(state) => state.borrow().pending.iter().any(|(id, _)| *id == self.id),
            None => false,
        }
    }
}

impl Drop for RoundTripSubscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().pending.retain(|(id, _)| *id != self.id);
        }
    }
}
