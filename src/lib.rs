//! Scroll position restoration for pages that render through server round
//! trips.
//!
//! Invariant: single epoch gate — offsets are only ever replayed for the
//! reset token the current history entry carries.
//!
//! # Public API Overview
//! - Implement [`Viewport`], [`History`] and [`SessionStorage`] over the host
//!   page, or use the in-memory ones from [`platform`].
//! - Construct a [`ScrollRestorer`] per page load and feed it navigation
//!   events (`on_before_unload`, `on_pop_state_event`,
//!   `before_client_navigation`, `after_server_navigation`).
//! - Fire the shared [`RoundTripSignal`] when a server response has been
//!   handled; deferred restorations run there.

pub mod core;
pub mod error;
pub mod platform;
pub mod runtime;

/// Scroll offset primitives.
pub use crate::core::position::{PositionLog, ScrollPoint};

/// Traits host pages implement.
pub use crate::core::history::History;
pub use crate::core::viewport::Viewport;

/// Restoration driver and the round-trip completion signal.
pub use crate::runtime::restorer::ScrollRestorer;
pub use crate::runtime::signal::{RoundTripSignal, RoundTripSubscription};

/// Error surfaced by the restorer's fallible operations.
pub use crate::error::ScrollRestoreError;

/// Persistence records and the storage seam, re-exported from the store
/// crate.
pub use position_store::{
    storage_key, NavigationState, PositionStore, ResetToken, SessionStorage, StorageError,
    StoredPositions,
};
