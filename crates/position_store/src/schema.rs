use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

pub const HISTORY_INDEX_FIELD: &str = "historyIndex";
pub const HISTORY_TOKEN_FIELD: &str = "historyResetToken";

/// Opaque marker for one scroll tracking epoch.
///
/// A fresh token is minted whenever tracking restarts, so positions captured
/// before the restart can never be replayed after it. Tokens travel through
/// history entry state and storage keys as plain JSON numbers; two tokens are
/// equal only when their bit patterns are.
#[derive(Debug, Clone, Copy)]
pub struct ResetToken(f64);

impl ResetToken {
    /// Mints a token for a new epoch, strictly greater than any token minted
    /// earlier in this process.
    #[must_use]
    pub fn fresh() -> Self {
        static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

        let now = epoch_micros();
        let mut last = LAST_ISSUED.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match LAST_ISSUED.compare_exchange(last, next, Ordering::Relaxed, Ordering::Relaxed) {
                // Microsecond counts stay well inside f64's exact integer range.
                Ok(_) => return Self(next as f64),
                Err(observed) => last = observed,
            }
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for ResetToken {
    fn from(raw: f64) -> Self {
        Self(raw)
    }
}

impl PartialEq for ResetToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for ResetToken {}

impl fmt::Display for ResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn epoch_micros() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000) as i64
}

/// Record attached to a history entry: how deep the entry sits in the session
/// history and which epoch its positions belong to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationState {
    pub history_index: usize,
    pub history_reset_token: ResetToken,
}

impl NavigationState {
    #[must_use]
    pub fn new(history_index: usize, history_reset_token: ResetToken) -> Self {
        Self {
            history_index,
            history_reset_token,
        }
    }

    /// Reads a record back out of a raw history state value.
    ///
    /// History state is writable by anything running in the page, so this
    /// accepts only what it can use: an object carrying a non-negative
    /// integral index and a numeric token. Anything else is `None`.
    #[must_use]
    pub fn from_value(value: Option<&Value>) -> Option<Self> {
        let state = value?.as_object()?;
        let history_index = index_from(state.get(HISTORY_INDEX_FIELD)?)?;
        let history_reset_token = ResetToken::from(state.get(HISTORY_TOKEN_FIELD)?.as_f64()?);
        Some(Self {
            history_index,
            history_reset_token,
        })
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut state = serde_json::Map::new();
        state.insert(
            HISTORY_INDEX_FIELD.to_string(),
            Value::from(self.history_index as u64),
        );
        state.insert(
            HISTORY_TOKEN_FIELD.to_string(),
            Value::from(self.history_reset_token.value()),
        );
        Value::Object(state)
    }
}

fn index_from(value: &Value) -> Option<usize> {
    if let Some(index) = value.as_u64() {
        return (index <= u64::from(u32::MAX)).then_some(index as usize);
    }
    // Values written by other runtimes may arrive as integral floats.
    let raw = value.as_f64()?;
    if raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= f64::from(u32::MAX) {
        return Some(raw as usize);
    }
    None
}

/// Scroll offsets for every tracked history entry of one epoch, in the shape
/// they are stored under the epoch's storage key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPositions {
    pub x_positions: Vec<f64>,
    pub y_positions: Vec<f64>,
}

impl StoredPositions {
    #[must_use]
    pub fn new(x_positions: Vec<f64>, y_positions: Vec<f64>) -> Self {
        Self {
            x_positions,
            y_positions,
        }
    }
}
