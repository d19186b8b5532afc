//! Scroll restoration driver for history navigation.
//!
//! Browsers restore scroll offsets on their own only for pages they render
//! synchronously. When content is produced by a server round trip after
//! navigation, the offsets must be captured, persisted and replayed by hand:
//! into history entry state for the per-entry depth record, and into session
//! storage for the offsets themselves, keyed by a reset token so that one
//! page load never replays another epoch's positions.
//!
//! [`ScrollRestorer`] owns that protocol. Hosts feed it the events a page
//! sees (unload, pop state, the two navigation phases) and it keeps the
//! viewport, the history record and the stored offsets in step.

use std::cell::RefCell;
use std::rc::Rc;

use position_store::{NavigationState, ResetToken, SessionStorage};
use serde_json::Value;

use crate::core::history::History;
use crate::core::position::{PositionLog, ScrollPoint};
use crate::core::viewport::Viewport;
use crate::error::ScrollRestoreError;
use crate::runtime::bridge::StateBridge;
use crate::runtime::registry::PositionRegistry;
use crate::runtime::signal::{RoundTripSignal, RoundTripSubscription};

const MANIPULATED_STATE_WARNING: &str = "unable to restore scroll position: \
     history state is missing its tracking record, it has been manipulated \
     or the site was left in an unexpected way";

/// Captures scroll offsets around navigation and replays them when the user
/// travels back or forward.
///
/// One restorer serves one page load. Construction adopts whatever trail the
/// current history entry points at, so reloads and traversals into an earlier
/// epoch resume where that epoch left off; restoration triggered this way
/// waits for the first completed round trip, when the page has content to
/// scroll.
pub struct ScrollRestorer {
    registry: PositionRegistry,
    bridge: StateBridge,
    viewport: Rc<RefCell<dyn Viewport>>,
    round_trips: RoundTripSignal,
    pending_restore: Option<RoundTripSubscription>,
    ignore_next_pop_state: bool,
}

impl ScrollRestorer {
    pub fn new(
        viewport: impl Viewport + 'static,
        history: impl History + 'static,
        storage: impl SessionStorage + 'static,
        round_trips: RoundTripSignal,
    ) -> Self {
        let mut restorer = Self {
            registry: PositionRegistry::new(),
            bridge: StateBridge::new(Box::new(history), Box::new(storage)),
            viewport: Rc::new(RefCell::new(viewport)),
            round_trips,
            pending_restore: None,
            ignore_next_pop_state: false,
        };
        // Native restoration fights the deferred replay, so it goes first.
        restorer.bridge.disable_native_scroll_restoration();
        restorer.read_and_restore(true);
        restorer
    }

    /// Persists the page's trail while the entry is still current.
    ///
    /// Runs in the unload path, so storage trouble is logged and swallowed;
    /// the history record is still written either way.
    pub fn on_before_unload(&mut self) {
        self.capture_current_position();
        self.bridge
            .replace_navigation_state(self.registry.navigation_state());
        self.bridge
            .save_positions(self.registry.reset_token(), &self.registry.log.to_stored());
    }

    /// Handles the host's pop state event for a back or forward traversal.
    ///
    /// `state` is the raw state of the entry that just became current.
    /// `triggers_round_trip` tells the restorer whether this traversal makes
    /// the page re-render through the server, in which case restoration waits
    /// for [`RoundTripSignal::fire`] instead of running immediately.
    pub fn on_pop_state_event(&mut self, state: Option<&Value>, triggers_round_trip: bool) {
        if self.ignore_next_pop_state {
            // A framework-initiated fragment change moved the entry without a
            // real traversal; realign its record and stand down once.
            self.bridge
                .replace_navigation_state(self.registry.navigation_state());
            self.ignore_next_pop_state = false;
            return;
        }

        self.capture_current_position();

        let Some(incoming) = NavigationState::from_value(state) else {
            log::warn!("{MANIPULATED_STATE_WARNING}");
            self.reset_tracking();
            return;
        };

        if incoming.history_reset_token != self.registry.reset_token() {
            // The entry belongs to another epoch; offsets in memory do not
            // apply to it. Re-derive the trail from storage or start over.
            self.read_and_restore(triggers_round_trip);
            return;
        }

        self.registry.current_index = incoming.history_index;
        self.restore_scroll_position(triggers_round_trip);
    }

    /// Makes the next pop state event realign the entry's record instead of
    /// restoring anything. Used when the host changes the fragment itself and
    /// the resulting event is not a user traversal.
    pub fn set_ignore_scroll_restoration_on_next_pop_state_event(&mut self, ignore: bool) {
        self.ignore_next_pop_state = ignore;
    }

    /// Runs before the host swaps content for a navigation it handles
    /// client side. Captures the leaving entry's offsets and moves the trail
    /// one entry deeper; the host pushes the new entry itself afterwards.
    pub fn before_client_navigation(&mut self, new_href: &str) {
        self.capture_current_position();
        self.bridge
            .replace_navigation_state(self.registry.navigation_state());

        // With a fragment the browser positions the page; otherwise start
        // the new view at the top.
        if !has_fragment(new_href) {
            self.reset_scroll();
        }

        self.registry.current_index += 1;
        self.registry.log.truncate(self.registry.current_index);
    }

    /// Runs after a server round trip navigated the page to `href`.
    ///
    /// The payload carries the offsets the page had when the navigation was
    /// issued (`scrollPositionX`, `scrollPositionY`) and the destination
    /// `href`; this records them for the entry being left, opens the new
    /// entry and drops any forward trail.
    pub fn after_server_navigation(&mut self, payload: &Value) -> Result<(), ScrollRestoreError> {
        let x = number_field(payload, "scrollPositionX")?;
        let y = number_field(payload, "scrollPositionY")?;
        let href = string_field(payload, "href")?;

        self.registry
            .log
            .record(self.registry.current_index, ScrollPoint::new(x, y));
        self.bridge
            .replace_navigation_state(self.registry.navigation_state());

        if !has_fragment(href) {
            self.reset_scroll();
        }

        self.registry.current_index += 1;
        self.bridge
            .push_navigation_state(self.registry.navigation_state(), href);
        self.registry.log.truncate(self.registry.current_index);
        Ok(())
    }

    #[must_use]
    pub fn current_history_index(&self) -> usize {
        self.registry.current_index()
    }

    #[must_use]
    pub fn reset_token(&self) -> ResetToken {
        self.registry.reset_token()
    }

    /// Number of history depths with a captured offset pair.
    #[must_use]
    pub fn recorded_positions(&self) -> usize {
        self.registry.log.len()
    }

    /// Whether a restoration is parked on the round-trip signal.
    #[must_use]
    pub fn has_pending_restore(&self) -> bool {
        self.pending_restore
            .as_ref()
            .is_some_and(RoundTripSubscription::is_active)
    }

    /// Adopts the trail the current history entry points at, or resets when
    /// there is none to adopt.
    fn read_and_restore(&mut self, delay: bool) {
        let Some(recorded) = self.bridge.read_navigation_state() else {
            self.reset_tracking();
            return;
        };

        // Depth and epoch come from the entry even if the offsets are gone;
        // a failed load below resets both anyway.
        self.registry.current_index = recorded.history_index;
        self.registry.reset_token = recorded.history_reset_token;

        match self.bridge.load_positions(recorded.history_reset_token) {
            Some(stored) => {
                self.registry.log = PositionLog::from_stored(&stored);
                self.restore_scroll_position(delay);
            }
            None => {
                log::warn!(
                    "history state names scroll tracking token <{}> but session \
                     storage has no positions for it; the site was left in an \
                     unexpected way",
                    recorded.history_reset_token
                );
                self.reset_tracking();
            }
        }
    }

    /// Starts a fresh epoch and drops any restoration still parked on the
    /// signal, so nothing from the abandoned epoch can reach the viewport.
    fn reset_tracking(&mut self) {
        self.pending_restore = None;
        self.registry.reset();
    }

    fn capture_current_position(&mut self) {
        let point = self.viewport.borrow().scroll_position();
        let index = self.registry.current_index;
        self.registry.log.record(index, point);
    }

    fn reset_scroll(&mut self) {
        self.viewport.borrow_mut().set_scroll_position(ScrollPoint::ORIGIN);
    }

    /// Applies the offsets recorded for the current depth, now or on the next
    /// completed round trip.
    fn restore_scroll_position(&mut self, delay: bool) {
        // A newer restoration supersedes one still parked on the signal.
        self.pending_restore = None;

        let index = self.registry.current_index;
        let Some(point) = self.registry.log.get(index) else {
            log::warn!(
                "no scroll position recorded for history index {index} \
                 ({} recorded); {MANIPULATED_STATE_WARNING}",
                self.registry.log.len()
            );
            self.reset_tracking();
            return;
        };

        let target = point.trunc();
        if delay {
            let viewport = Rc::downgrade(&self.viewport);
            self.pending_restore = Some(self.round_trips.subscribe_once(move || {
                if let Some(viewport) = viewport.upgrade() {
                    viewport.borrow_mut().set_scroll_position(target);
                }
            }));
        } else {
            self.viewport.borrow_mut().set_scroll_position(target);
        }
    }
}

fn has_fragment(href: &str) -> bool {
    href.contains('#')
}

fn number_field(payload: &Value, field: &'static str) -> Result<f64, ScrollRestoreError> {
    payload
        .get(field)
        .and_then(Value::as_f64)
        .ok_or(ScrollRestoreError::MissingNavigationField { field })
}

fn string_field<'a>(payload: &'a Value, field: &'static str) -> Result<&'a str, ScrollRestoreError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .ok_or(ScrollRestoreError::MissingNavigationField { field })
}
