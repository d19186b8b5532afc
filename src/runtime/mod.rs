//! Runtime orchestration: the restorer and its collaborating state.

pub mod bridge;
pub mod registry;
pub mod restorer;
pub mod signal;

pub use bridge::StateBridge;
pub use registry::PositionRegistry;
pub use restorer::ScrollRestorer;
pub use signal::{RoundTripSignal, RoundTripSubscription};
