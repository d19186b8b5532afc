//! Viewport seam between the restorer and the host page.

use crate::core::position::ScrollPoint;

/// Read and write access to the page's scroll offset.
///
/// Implementations wrap whatever the host provides, a real document view or
/// an in-memory stand-in. Offsets use CSS pixel coordinates with the origin
/// at the top left.
pub trait Viewport {
    /// Current scroll offset of the page.
    fn scroll_position(&self) -> ScrollPoint;

    /// Scrolls the page to `point`.
    fn set_scroll_position(&mut self, point: ScrollPoint);
}
