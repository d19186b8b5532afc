//! Core types and the traits host pages implement.

pub mod history;
pub mod position;
pub mod viewport;

pub use history::History;
pub use position::{PositionLog, ScrollPoint};
pub use viewport::Viewport;
