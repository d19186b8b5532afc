#![allow(unused_imports)]

use scroll_restore::platform::{MemoryHistory, MemoryStorage, MemoryViewport};
use scroll_restore::{
    storage_key, History, NavigationState, PositionLog, PositionStore, ResetToken,
    RoundTripSignal, RoundTripSubscription, ScrollPoint, ScrollRestoreError, ScrollRestorer,
    SessionStorage, StorageError, StoredPositions, Viewport,
};

#[test]
fn public_api_exports_compile() {}
