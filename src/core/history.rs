//! Session history seam between the restorer and the host page.

use serde_json::Value;

/// The slice of browser session history the restorer needs.
///
/// State values are raw JSON: the current entry may have been written by an
/// earlier page load, another runtime or not at all, so no shape is assumed
/// here. Decoding is the caller's business.
pub trait History {
    /// State attached to the current history entry, if any.
    fn state(&self) -> Option<Value>;

    /// Full URL of the current history entry.
    fn location_href(&self) -> String;

    /// Swaps the current entry's state and URL in place, keeping its position
    /// in the entry list.
    fn replace_state(&mut self, state: Value, url: &str);

    /// Appends a new current entry, discarding any entries forward of it.
    fn push_state(&mut self, state: Value, url: &str);

    /// Turns off the host's own scroll restoration where the host has one.
    ///
    /// Hosts without a native mechanism keep the default no-op.
    fn disable_native_scroll_restoration(&mut self) {}
}
