use crate::error::{PositionStoreError, StorageError};
use crate::keys::storage_key;
use crate::schema::{ResetToken, StoredPositions};

/// Minimal session storage surface, keyed strings in, keyed strings out.
///
/// `get_item` distinguishes an absent key (`Ok(None)`) from a backend that
/// could not answer at all (`Err`).
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Scroll position persistence over a session storage backend.
///
/// The `load`/`save` pair is what navigation handlers call: storage trouble
/// is logged and collapsed into absence, because a handler running during
/// unload or traversal has nobody to report it to. The `try_` variants keep
/// the error for callers that do.
pub struct PositionStore {
    storage: Box<dyn SessionStorage>,
}

impl PositionStore {
    #[must_use]
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Positions stored for `token`'s epoch, or `None` when there are none.
    ///
    /// A missing key, an undecodable value and an unreachable backend all
    /// come back as `None`; the latter two are logged.
    #[must_use]
    pub fn load(&self, token: ResetToken) -> Option<StoredPositions> {
        match self.try_load(token) {
            Ok(found) => found,
            Err(error) => {
                log::error!("failed to get session storage: {error}");
                None
            }
        }
    }

    pub fn try_load(&self, token: ResetToken) -> Result<Option<StoredPositions>, PositionStoreError> {
        let key = storage_key(token);
        let Some(raw) = self
            .storage
            .get_item(&key)
            .map_err(|source| PositionStoreError::read(&key, source))?
        else {
            return Ok(None);
        };
        let positions =
            serde_json::from_str(&raw).map_err(|source| PositionStoreError::decode(&key, source))?;
        Ok(Some(positions))
    }

    /// Stores `positions` under `token`'s key, logging instead of failing.
    pub fn save(&mut self, token: ResetToken, positions: &StoredPositions) {
        if let Err(error) = self.try_save(token, positions) {
            log::error!("failed to set session storage: {error}");
        }
    }

    pub fn try_save(
        &mut self,
        token: ResetToken,
        positions: &StoredPositions,
    ) -> Result<(), PositionStoreError> {
        let key = storage_key(token);
        let payload = serde_json::to_string(positions)
            .map_err(|source| PositionStoreError::encode(&key, source))?;
        self.storage
            .set_item(&key, &payload)
            .map_err(|source| PositionStoreError::write(&key, source))
    }
}
