use crate::schema::ResetToken;

/// Prefix shared by every scroll position entry in session storage.
pub const STORAGE_KEY_PREFIX: &str = "scrollPos-";

/// Storage key holding the positions of the epoch marked by `token`.
///
/// The token is embedded in its plain numeric text form, with no fraction
/// digits for integral values, so keys match those written by other runtimes
/// sharing the storage.
#[must_use]
pub fn storage_key(token: ResetToken) -> String {
    format!("{STORAGE_KEY_PREFIX}{token}")
}
