//! Host page integrations.

pub mod memory;

pub use memory::{MemoryHistory, MemoryStorage, MemoryViewport};
