//! Error types surfaced by the restorer's public operations.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScrollRestoreError {
    /// A server navigation payload arrived without a field the contract
    /// requires. The caller broke the protocol; no tracking state was touched.
    #[error("server navigation payload is missing required field '{field}'")]
    MissingNavigationField { field: &'static str },
}
