mod error;
mod keys;
mod schema;
mod store;

pub use error::{PositionStoreError, StorageError};
pub use keys::{storage_key, STORAGE_KEY_PREFIX};
pub use schema::{
    NavigationState, ResetToken, StoredPositions, HISTORY_INDEX_FIELD, HISTORY_TOKEN_FIELD,
};
pub use store::{PositionStore, SessionStorage};
